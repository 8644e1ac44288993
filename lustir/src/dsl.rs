//! Shorthand constructors for common expression shapes.
//!
//! Generated code (the relational compiler, the temporal operator library)
//! is built almost entirely out of these.
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::expr::{BinaryOp, Expr, ExprKind, UnaryOp};

pub fn id(name: impl Into<String>) -> Expr {
    Expr::new(ExprKind::Id(name.into()))
}

pub fn tt() -> Expr {
    Expr::new(ExprKind::Bool(true))
}

pub fn ff() -> Expr {
    Expr::new(ExprKind::Bool(false))
}

pub fn integer(value: i64) -> Expr {
    Expr::new(ExprKind::Int(BigInt::from(value)))
}

pub fn real(value: BigDecimal) -> Expr {
    Expr::new(ExprKind::Real(value))
}

fn unary(op: UnaryOp, expr: Expr) -> Expr {
    Expr::new(ExprKind::Unary(op, Box::new(expr)))
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(ExprKind::Binary(op, Box::new(left), Box::new(right)))
}

pub fn negative(expr: Expr) -> Expr {
    unary(UnaryOp::Negative, expr)
}

pub fn not(expr: Expr) -> Expr {
    unary(UnaryOp::Not, expr)
}

/// The unit-delay stream operator `pre e`.
pub fn pre(expr: Expr) -> Expr {
    unary(UnaryOp::Pre, expr)
}

pub fn and(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::And, left, right)
}

pub fn or(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Or, left, right)
}

pub fn xor(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Xor, left, right)
}

pub fn implies(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Implies, left, right)
}

pub fn equal(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Equal, left, right)
}

pub fn plus(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Plus, left, right)
}

pub fn minus(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Minus, left, right)
}

pub fn greater(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Greater, left, right)
}

pub fn greater_equal(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::GreaterEqual, left, right)
}

/// The initial-step selection operator `left -> right`.
pub fn arrow(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Arrow, left, right)
}

/// Left-associated conjunction of all `exprs`; `true` when the list is
/// empty.
pub fn conjoin(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    let mut iter = exprs.into_iter();
    match iter.next() {
        None => tt(),
        Some(first) => iter.fold(first, and),
    }
}

pub fn node_call(node: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::NodeCall {
        node: node.into(),
        args: args.into_iter().collect(),
    })
}

pub fn function_call(function: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::FunctionCall {
        function: function.into(),
        args: args.into_iter().collect(),
    })
}
