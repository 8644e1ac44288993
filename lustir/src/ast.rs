//! Declaration model.
//!
//! Top-level and node-body declarations of the dataflow language. Everything
//! here is an immutable value object built once; the accumulating builders
//! live in [`crate::build`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use strum::{EnumDiscriminants, EnumIs};

use crate::{
    expr::{Expr, Location},
    types::{Type, TypeDef},
};

/// A declared variable slot: a name and its type. No expression attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarDecl {
    pub id: String,
    pub ty: Type,
}

impl VarDecl {
    pub fn new(id: impl Into<String>, ty: Type) -> Self {
        VarDecl { id: id.into(), ty }
    }
}

/// A stream equation: ordered binding identifiers on the left, a defining
/// expression on the right. An empty left-hand side is a void call and
/// renders as `()`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    pub location: Location,
    pub lhs: SmallVec<[String; 1]>,
    pub expr: Expr,
}

impl Equation {
    pub fn new(lhs: impl IntoIterator<Item = String>, expr: Expr) -> Self {
        Equation {
            location: Location::NULL,
            lhs: lhs.into_iter().collect(),
            expr,
        }
    }

    /// The common single-target form `name = expr`.
    pub fn single(name: impl Into<String>, expr: Expr) -> Self {
        Equation {
            location: Location::NULL,
            lhs: smallvec![name.into()],
            expr,
        }
    }
}

/// A named constant, rendered as `const id = expr;`. The declared type is
/// optional and not part of the surface rendering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    pub id: String,
    pub ty: Option<Type>,
    pub expr: Expr,
}

impl Constant {
    pub fn new(id: impl Into<String>, ty: Option<Type>, expr: Expr) -> Self {
        Constant {
            id: id.into(),
            ty,
            expr,
        }
    }
}

/// A local definition inside a contract body: `var x : t = expr;`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarDef {
    pub var: VarDecl,
    pub expr: Expr,
}

/// A named behavioral partition of a contract, guarded by require/ensure
/// expression lists. Both lists are ordered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mode {
    pub id: String,
    pub require: Vec<Expr>,
    pub ensure: Vec<Expr>,
}

/// An import of another contract into a contract body, wiring concrete input
/// expressions and output identifiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContractImport {
    pub id: String,
    pub inputs: Vec<Expr>,
    /// Identifier expressions naming the caller variables bound to outputs.
    pub outputs: Vec<Expr>,
}

/// The closed set of contract body items. Item order is semantically
/// meaningful and preserved top-to-bottom.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(ContractItemKind))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContractItem {
    Assume(Expr),
    Guarantee(Expr),
    Mode(Mode),
    Import(ContractImport),
    Constant(Constant),
    VarDef(VarDef),
}

/// An ordered sequence of contract items. The transform traversal requires
/// at least one item; see [`crate::visit`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContractBody {
    pub items: Vec<ContractItem>,
}

impl ContractBody {
    pub fn new(items: Vec<ContractItem>) -> Self {
        ContractBody { items }
    }
}

/// A standalone, independently checkable contract declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contract {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
    pub body: ContractBody,
}

/// An uninterpreted function signature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
}

impl Function {
    pub fn new(id: impl Into<String>, inputs: Vec<VarDecl>, outputs: Vec<VarDecl>) -> Self {
        Function {
            id: id.into(),
            inputs,
            outputs,
        }
    }
}

/// A function declared elsewhere, optionally constrained by a contract.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportedFunction {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
    pub contract: Option<ContractBody>,
}

/// A node declared elsewhere, optionally constrained by a contract.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportedNode {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
    pub contract: Option<ContractBody>,
}

/// The simplified node form: a stateless unit with equations but no IVC
/// hints and no realizability-input set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatelessNode {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
    pub contract: Option<ContractBody>,
    pub locals: Vec<VarDecl>,
    pub equations: Vec<Equation>,
    pub assertions: Vec<Expr>,
    /// Names of boolean locals/outputs to verify.
    pub properties: Vec<String>,
}

/// A named unit of the dataflow language.
///
/// Invariant (caller-enforced, see [`crate::analysis::check_node`]): every
/// property, IVC hint, realizability-input name, and identifier asserted
/// over must be declared as an input, output, or local of this node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: String,
    pub inputs: Vec<VarDecl>,
    pub outputs: Vec<VarDecl>,
    pub locals: Vec<VarDecl>,
    pub equations: Vec<Equation>,
    /// Boolean stream assertions, rendered as `assert e;`.
    pub assertions: Vec<Expr>,
    /// Names of boolean locals/outputs to verify.
    pub properties: Vec<String>,
    /// `Some` marks the node for an open-system realizability check over the
    /// listed input names; `None` emits no marker at all.
    pub realizability_inputs: Option<Vec<String>>,
    pub contract: Option<ContractBody>,
    /// Minimal-core hint names (`--%IVC`).
    pub ivc: Vec<String>,
}

/// A complete program: ordered declaration groups plus an optional entry
/// node name.
///
/// Invariant (caller-enforced, see [`crate::analysis::check_program`]): all
/// top-level declarations share one flat namespace, and `main` names a
/// declared node or stateless node.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    pub types: Vec<TypeDef>,
    pub constants: Vec<Constant>,
    pub functions: Vec<Function>,
    pub imported_functions: Vec<ImportedFunction>,
    pub imported_nodes: Vec<ImportedNode>,
    pub contracts: Vec<Contract>,
    pub stateless_nodes: Vec<StatelessNode>,
    pub nodes: Vec<Node>,
    pub main: Option<String>,
}
