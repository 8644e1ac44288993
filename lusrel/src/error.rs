use strum::Display;
use thiserror::Error;

/// What a name in a relational namespace was declared as. The namespace is
/// flat: one map from name to kind, regardless of which collection the
/// declaration lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeclKind {
    Input,
    Output,
    Local,
    Assumption,
    Constraint,
    Property,
    Node,
    Function,
    Constant,
    TypeAlias,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationalError {
    /// A name was reused within one flat namespace scope. The conflicting
    /// declaration is not registered.
    #[error("`{name}` is already used in this namespace (declared as a {existing})")]
    NameConflict { name: String, existing: DeclKind },

    /// A call to a compiled relational node supplied the wrong number of
    /// arguments.
    #[error("`{node}` expects {expected} arguments, but received {supplied}")]
    ArityMismatch {
        node: String,
        expected: usize,
        supplied: usize,
    },
}

pub type RelationalResult<T> = Result<T, RelationalError>;
