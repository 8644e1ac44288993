use lustir::{
    analysis::{self, ReferenceError},
    build::{NodeBuilder, ProgramBuilder},
    dsl,
    types::{Type, TypeDef},
};

fn checked_node(property: &str) -> lustir::ast::Node {
    let mut node = NodeBuilder::new("n");
    node.create_input("x", Type::Bool);
    node.create_output("y", Type::Bool);
    node.define("y", dsl::id("x"));
    node.add_property(property);
    node.build()
}

#[test]
fn identifiers_collects_every_occurrence() {
    let expr = dsl::implies(
        dsl::and(dsl::id("a"), dsl::id("b")),
        dsl::node_call("historically", [dsl::id("a")]),
    );
    let ids = analysis::identifiers(&expr);
    assert_eq!(
        ids.into_iter().collect::<Vec<_>>(),
        ["a".to_string(), "b".to_string()]
    );
}

#[test]
fn node_check_accepts_declared_names() {
    assert_eq!(analysis::check_node(&checked_node("y")), Ok(()));
}

#[test]
fn node_check_rejects_dangling_property() {
    assert_eq!(
        analysis::check_node(&checked_node("missing")),
        Err(ReferenceError::UnknownProperty {
            node: "n".to_string(),
            name: "missing".to_string(),
        })
    );
}

#[test]
fn node_check_rejects_an_assertion_over_undeclared_names() {
    let mut node = NodeBuilder::new("n");
    node.create_input("x", Type::Bool);
    node.create_output("y", Type::Bool);
    node.define("y", dsl::id("x"));
    node.add_assertion(dsl::and(dsl::id("x"), dsl::id("ghost")));

    assert_eq!(
        analysis::check_node(&node.build()),
        Err(ReferenceError::UnknownAssertionId {
            node: "n".to_string(),
            name: "ghost".to_string(),
        })
    );
}

#[test]
fn node_check_rejects_dangling_realizability_input() {
    let mut node = NodeBuilder::new("n");
    node.create_input("x", Type::Bool);
    node.create_output("y", Type::Bool);
    node.define("y", dsl::id("x"));
    node.set_realizability_inputs(vec!["ghost".to_string()]);

    assert_eq!(
        analysis::check_node(&node.build()),
        Err(ReferenceError::UnknownRealizabilityInput {
            node: "n".to_string(),
            name: "ghost".to_string(),
        })
    );
}

#[test]
fn program_check_rejects_a_reused_top_level_name() {
    let mut program = ProgramBuilder::new();
    program.add_type(TypeDef::new("n", Type::Bool));
    program.add_node(checked_node("y"));

    assert_eq!(
        analysis::check_program(&program.build()),
        Err(ReferenceError::DuplicateTopLevel {
            name: "n".to_string(),
        })
    );
}

#[test]
fn program_check_resolves_main() {
    let mut program = ProgramBuilder::new();
    program.add_node(checked_node("y")).set_main("n");
    assert_eq!(analysis::check_program(&program.build()), Ok(()));

    let mut program = ProgramBuilder::new();
    program.add_node(checked_node("y")).set_main("other");
    assert_eq!(
        analysis::check_program(&program.build()),
        Err(ReferenceError::UnknownMain {
            name: "other".to_string(),
        })
    );
}
