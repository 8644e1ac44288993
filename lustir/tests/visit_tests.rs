use std::collections::BTreeSet;

use lustir::{
    ast::{
        Constant, Contract, ContractBody, ContractItem, Equation, ImportedNode, Node, Program,
        VarDecl,
    },
    build::{NodeBuilder, ProgramBuilder},
    dsl,
    expr::{Expr, ExprKind},
    types::{Type, TypeDef},
    visit::{Descend, Identity, Rewrite, Visit, map_expr, walk_expr},
};

/// Collects every identifier occurrence the traversal reaches.
#[derive(Default)]
struct Ids {
    descend: Descend,
    seen: BTreeSet<String>,
}

impl Ids {
    fn with(descend: Descend) -> Self {
        Ids {
            descend,
            ..Default::default()
        }
    }
}

impl Visit for Ids {
    fn descend(&self) -> Descend {
        self.descend
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let ExprKind::Id(name) = &expr.kind {
            self.seen.insert(name.clone());
        }
        walk_expr(self, expr);
    }
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_program() -> Program {
    let mut program = ProgramBuilder::new();
    program.add_type(TypeDef::new("t", Type::Bool));
    program.add_constant(Constant::new("k", None, dsl::id("base")));
    program.add_contract(Contract {
        id: "spec".to_string(),
        inputs: vec![VarDecl::new("cx", Type::Bool)],
        outputs: vec![VarDecl::new("cy", Type::Bool)],
        body: ContractBody::new(vec![ContractItem::Guarantee(dsl::id("g"))]),
    });
    program.add_imported_node(ImportedNode {
        id: "ext".to_string(),
        inputs: vec![VarDecl::new("ix", Type::Bool)],
        outputs: vec![VarDecl::new("iy", Type::Bool)],
        contract: Some(ContractBody::new(vec![ContractItem::Assume(dsl::id(
            "ia",
        ))])),
    });

    let mut node = NodeBuilder::new("n");
    node.create_input("a", Type::Bool);
    node.create_input("b", Type::Bool);
    node.create_output("y", Type::Bool);
    node.define("y", dsl::and(dsl::id("a"), dsl::id("b")));
    program.add_node(node.build());

    program.build()
}

#[test]
fn default_walk_skips_contract_only_groups() {
    let program = sample_program();
    let mut ids = Ids::default();
    ids.visit_program(&program);

    assert_eq!(ids.seen, names(&["base", "a", "b"]));
}

#[test]
fn contract_descent_reaches_standalone_contracts() {
    let program = sample_program();
    let mut ids = Ids::with(Descend::CONTRACTS);
    ids.visit_program(&program);

    assert_eq!(ids.seen, names(&["base", "a", "b", "g"]));
}

#[test]
fn imported_node_contracts_need_both_flags() {
    let program = sample_program();

    // The imported-node group alone does not open its contract body.
    let mut ids = Ids::with(Descend::IMPORTED_NODES);
    ids.visit_program(&program);
    assert!(!ids.seen.contains("ia"));

    let mut ids = Ids::with(Descend::IMPORTED_NODES | Descend::CONTRACTS);
    ids.visit_program(&program);
    assert_eq!(ids.seen, names(&["base", "a", "b", "g", "ia"]));
}

#[test]
fn expression_walk_reaches_every_position() {
    let expr = dsl::and(
        dsl::id("x"),
        Expr::new(ExprKind::IfThenElse {
            cond: Box::new(dsl::id("c")),
            then: Box::new(dsl::plus(dsl::id("y"), dsl::integer(1))),
            els: Box::new(Expr::new(ExprKind::ArrayAccess {
                array: Box::new(dsl::id("z")),
                index: Box::new(dsl::id("i")),
            })),
        }),
    );

    let mut ids = Ids::default();
    ids.visit_expr(&expr);
    assert_eq!(ids.seen, names(&["x", "c", "y", "z", "i"]));
}

#[test]
fn identity_rewrite_reconstructs_an_equal_program() {
    let program = sample_program();
    assert_eq!(Identity.rewrite_program(&program), program);
}

/// Renames free occurrences of `x` while leaving binding positions alone.
struct RenameX;

impl Rewrite for RenameX {
    fn rewrite_expr(&mut self, expr: &Expr) -> Expr {
        match &expr.kind {
            ExprKind::Id(name) if name == "x" => dsl::id("x_new"),
            _ => map_expr(self, expr),
        }
    }
}

#[test]
fn rewrite_substitutes_without_touching_equation_targets() {
    let mut node = NodeBuilder::new("n");
    node.create_input("y", Type::Bool);
    node.create_output("x", Type::Bool);
    node.add_equation(Equation::single("x", dsl::and(dsl::id("x"), dsl::id("y"))));
    let node = node.build();

    let rewritten: Node = RenameX.rewrite_node(&node);
    assert_eq!(rewritten.equations[0].to_string(), "x = (x_new and y);");
    assert_eq!(rewritten.outputs[0].id, "x");
}

/// Appends `_r` to every identifier the traversal rebuilds through.
struct RenameIds {
    descend: Descend,
}

impl Rewrite for RenameIds {
    fn descend(&self) -> Descend {
        self.descend
    }

    fn rewrite_expr(&mut self, expr: &Expr) -> Expr {
        match &expr.kind {
            ExprKind::Id(name) => dsl::id(format!("{name}_r")),
            _ => map_expr(self, expr),
        }
    }
}

fn contracted_node() -> Node {
    let mut node = NodeBuilder::new("n");
    node.create_input("x", Type::Bool);
    node.create_output("y", Type::Bool);
    node.set_contract(ContractBody::new(vec![ContractItem::Assume(dsl::id("x"))]));
    node.define("y", dsl::id("x"));
    node.build()
}

#[test]
fn contract_descent_rebuilds_node_contracts() {
    let node = contracted_node();
    let rewritten = RenameIds {
        descend: Descend::CONTRACTS,
    }
    .rewrite_node(&node);

    assert_eq!(rewritten.equations[0].to_string(), "y = x_r;");
    let body = rewritten.contract.as_ref().unwrap();
    assert_eq!(body.items, [ContractItem::Assume(dsl::id("x_r"))]);
}

#[test]
fn without_contract_descent_node_contracts_pass_through() {
    let node = contracted_node();
    let rewritten = RenameIds {
        descend: Descend::empty(),
    }
    .rewrite_node(&node);

    assert_eq!(rewritten.equations[0].to_string(), "y = x_r;");
    assert_eq!(rewritten.contract, node.contract);
}

#[test]
#[should_panic(expected = "at least one item")]
fn rewriting_an_empty_contract_body_panics() {
    let _ = Identity.rewrite_contract_body(&ContractBody::new(vec![]));
}
