use lustir::expr::Expr;

/// A named boolean expression, used as an assumption, constraint, or
/// property of a relational specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub id: String,
    pub expr: Expr,
}

impl Relation {
    pub fn new(id: impl Into<String>, expr: Expr) -> Self {
        Relation {
            id: id.into(),
            expr,
        }
    }
}
