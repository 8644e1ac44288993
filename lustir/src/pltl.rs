//! Past-time temporal operator library.
//!
//! Four reusable node definitions encoding the past-time LTL operators as
//! ordinary `pre`/`->` recurrences, plus matching call-expression
//! constructors. These are library code, not syntax: a program using
//! [`historically`] must also declare [`historically_node`].
use crate::{ast::Node, build::NodeBuilder, dsl, expr::Expr, types::Type};

pub const HISTORICALLY: &str = "historically";
pub const ONCE: &str = "once";
pub const SINCE: &str = "since";
pub const TRIGGERS: &str = "triggers";

/// All four operator definitions, in canonical order.
pub fn all_nodes() -> Vec<Node> {
    vec![
        historically_node(),
        once_node(),
        triggers_node(),
        since_node(),
    ]
}

/// `historically(x)`: x has held at every step up to and including now.
///
/// ```text
/// holds = (signal and (true -> (pre holds)));
/// ```
pub fn historically_node() -> Node {
    let mut node = NodeBuilder::new(HISTORICALLY);
    let signal = node.create_input("signal", Type::Bool);
    node.create_output("holds", Type::Bool);
    node.define(
        "holds",
        dsl::and(signal, dsl::arrow(dsl::tt(), dsl::pre(dsl::id("holds")))),
    );
    node.build()
}

/// Call expression `historically(e)`.
pub fn historically(e: Expr) -> Expr {
    dsl::node_call(HISTORICALLY, [e])
}

/// `once(x)`: x has held at some step up to and including now.
///
/// ```text
/// holds = (signal or (false -> (pre holds)));
/// ```
pub fn once_node() -> Node {
    let mut node = NodeBuilder::new(ONCE);
    let signal = node.create_input("signal", Type::Bool);
    node.create_output("holds", Type::Bool);
    node.define(
        "holds",
        dsl::or(signal, dsl::arrow(dsl::ff(), dsl::pre(dsl::id("holds")))),
    );
    node.build()
}

/// Call expression `once(e)`.
pub fn once(e: Expr) -> Expr {
    dsl::node_call(ONCE, [e])
}

/// `since(x, y)`: y held at some past step and x has held at every step
/// since then.
///
/// ```text
/// holds = (y or (x and (false -> (pre holds))));
/// ```
pub fn since_node() -> Node {
    let mut node = NodeBuilder::new(SINCE);
    let x = node.create_input("x", Type::Bool);
    let y = node.create_input("y", Type::Bool);
    node.create_output("holds", Type::Bool);
    node.define(
        "holds",
        dsl::or(
            y,
            dsl::and(x, dsl::arrow(dsl::ff(), dsl::pre(dsl::id("holds")))),
        ),
    );
    node.build()
}

/// Call expression `since(x, y)`.
pub fn since(x: Expr, y: Expr) -> Expr {
    dsl::node_call(SINCE, [x, y])
}

/// `triggers(x, y)`: the dual of `since`: y has held at every step since
/// the last step x held, including that step.
///
/// ```text
/// holds = (y and (x or (true -> (pre holds))));
/// ```
pub fn triggers_node() -> Node {
    let mut node = NodeBuilder::new(TRIGGERS);
    let x = node.create_input("x", Type::Bool);
    let y = node.create_input("y", Type::Bool);
    node.create_output("holds", Type::Bool);
    node.define(
        "holds",
        dsl::and(
            y,
            dsl::or(x, dsl::arrow(dsl::tt(), dsl::pre(dsl::id("holds")))),
        ),
    );
    node.build()
}

/// Call expression `triggers(x, y)`.
pub fn triggers(x: Expr, y: Expr) -> Expr {
    dsl::node_call(TRIGGERS, [x, y])
}
