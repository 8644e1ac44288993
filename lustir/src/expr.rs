//! Expression model.
//!
//! Expressions form a closed sum type ([`ExprKind`]) wrapped together with a
//! source [`Location`]. All expressions are immutable value objects; the
//! traversal framework ([`crate::visit`]) rebuilds rather than mutates.
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumIs};

use crate::types::Type;

/// A position in the original source text.
///
/// Trees built programmatically carry [`Location::NULL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// The "no location" sentinel.
    pub const NULL: Location = Location { line: 0, column: 0 };
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Prefix operators. `pre` is the unit-delay stream operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Negative,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "pre")]
    Pre,
}

/// Infix operators. `->` is the initial-step selection operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Times,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "div")]
    IntDivide,
    #[strum(serialize = "mod")]
    Modulus,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "<>")]
    NotEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = ">=")]
    GreaterEqual,
    #[strum(serialize = "<=")]
    LessEqual,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "xor")]
    Xor,
    #[strum(serialize = "=>")]
    Implies,
    #[strum(serialize = "->")]
    Arrow,
}

/// An expression: a variant tag plus its source location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expr {
    pub location: Location,
    pub kind: ExprKind,
}

/// The closed set of expression variants.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(ExprType))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExprKind {
    Bool(bool),
    Int(BigInt),
    /// Exact decimal literal; rendered in plain (non-exponential) form.
    Real(BigDecimal),
    Id(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    IfThenElse {
        cond: Box<Expr>,
        then: Box<Expr>,
        els: Box<Expr>,
    },
    /// Numeric cast to `target`; only `int` and `real` targets are printable.
    Cast {
        target: Type,
        expr: Box<Expr>,
    },
    ArrayLit(Vec<Expr>),
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayUpdate {
        array: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    /// Record literal: type identifier plus ordered field bindings.
    RecordLit {
        id: String,
        fields: Vec<(String, Expr)>,
    },
    RecordAccess {
        record: Box<Expr>,
        field: String,
    },
    RecordUpdate {
        record: Box<Expr>,
        field: String,
        value: Box<Expr>,
    },
    /// Possibly empty; the empty tuple renders as `()`.
    Tuple(Vec<Expr>),
    FunctionCall {
        function: String,
        args: Vec<Expr>,
    },
    NodeCall {
        node: String,
        args: Vec<Expr>,
    },
    /// A clocked node call: `condact(clock, call, default args...)`.
    Condact {
        clock: Box<Expr>,
        call: Box<Expr>,
        args: Vec<Expr>,
    },
    /// A contract mode reference, rendered as `::a::b`. The path is non-empty.
    ModeRef(Vec<String>),
}

impl Expr {
    /// Wrap a variant with no source location.
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            location: Location::NULL,
            kind,
        }
    }

    /// Wrap a variant at a known source location.
    pub fn at(location: Location, kind: ExprKind) -> Self {
        Expr { location, kind }
    }
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Expr::new(kind)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::new(ExprKind::Bool(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::new(ExprKind::Int(BigInt::from(value)))
    }
}

impl From<BigInt> for Expr {
    fn from(value: BigInt) -> Self {
        Expr::new(ExprKind::Int(value))
    }
}

impl From<BigDecimal> for Expr {
    fn from(value: BigDecimal) -> Self {
        Expr::new(ExprKind::Real(value))
    }
}
