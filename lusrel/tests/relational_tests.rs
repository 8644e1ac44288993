use lusrel::{DeclKind, RelationalError, RelationalNodeBuilder, RelationalProgramBuilder};
use lustir::{analysis, ast::Node, dsl, types::Type};

fn var_ids(decls: &[lustir::ast::VarDecl]) -> Vec<&str> {
    decls.iter().map(|vd| vd.id.as_str()).collect()
}

fn equation_texts(node: &Node) -> Vec<String> {
    node.equations.iter().map(|eq| eq.to_string()).collect()
}

/// An input `i`, an output `o`, one assumption and one property over them.
fn sensor_spec() -> RelationalNodeBuilder {
    let mut builder = RelationalNodeBuilder::new("sensor");
    let i = builder.create_input("i", Type::Int).unwrap();
    let o = builder.create_output("o", Type::Int).unwrap();
    builder
        .create_assumption("a", dsl::greater(i, dsl::integer(0)))
        .unwrap();
    builder
        .create_property("p", dsl::greater_equal(o, dsl::integer(0)))
        .unwrap();
    builder
}

#[test]
fn namespace_rejects_reuse_across_declaration_kinds() {
    let mut builder = RelationalNodeBuilder::new("n");
    builder.create_output("x", Type::Int).unwrap();

    assert_eq!(
        builder.create_input("x", Type::Bool),
        Err(RelationalError::NameConflict {
            name: "x".to_string(),
            existing: DeclKind::Output,
        })
    );

    // The failed declaration must not leave anything behind.
    builder.create_input("y", Type::Bool).unwrap();
    let node = builder.build();
    assert_eq!(var_ids(&node.inputs), ["y", "x"]);
    assert!(node.outputs.is_empty());
}

#[test]
fn conflict_message_names_the_existing_kind() {
    let err = RelationalError::NameConflict {
        name: "x".to_string(),
        existing: DeclKind::TypeAlias,
    };
    assert_eq!(
        err.to_string(),
        "`x` is already used in this namespace (declared as a type_alias)"
    );
}

#[test]
fn plain_build_exposes_relations_as_outputs() {
    let mut builder = RelationalNodeBuilder::new("n");
    let i = builder.create_input("i", Type::Int).unwrap();
    builder
        .create_assumption("a", dsl::greater(i.clone(), dsl::integer(0)))
        .unwrap();
    builder
        .create_constraint("c", dsl::greater(i, dsl::integer(1)))
        .unwrap();

    let returns: Vec<String> = builder
        .return_variables()
        .iter()
        .map(|e| e.to_string())
        .collect();
    assert_eq!(returns, ["a", "c"]);

    let node = builder.build();
    assert_eq!(var_ids(&node.inputs), ["i"]);
    assert_eq!(var_ids(&node.outputs), ["a", "c"]);
    assert_eq!(equation_texts(&node), ["a = (i > 0);", "c = (i > 1);"]);
    assert!(node.properties.is_empty());
}

#[test]
fn declared_outputs_and_locals_become_node_inputs() {
    let mut builder = RelationalNodeBuilder::new("n");
    builder.create_input("i", Type::Int).unwrap();
    builder.create_output("o", Type::Int).unwrap();
    builder.create_local("l", Type::Int).unwrap();

    let node = builder.build();
    assert_eq!(var_ids(&node.inputs), ["i", "o", "l"]);
}

#[test]
fn entailment_build_crunches_properties_under_the_conjunct() {
    let node = sensor_spec().build_entailment();

    assert_eq!(var_ids(&node.inputs), ["i", "o"]);
    assert_eq!(var_ids(&node.outputs), ["a"]);
    assert_eq!(var_ids(&node.locals), ["conjunct", "p"]);
    assert_eq!(
        equation_texts(&node),
        [
            "a = (i > 0);",
            "conjunct = historically(a);",
            "p = (conjunct => (o >= 0));",
        ]
    );
    assert_eq!(node.properties, ["p"]);
    assert_eq!(node.ivc, ["a"]);
    assert_eq!(analysis::check_node(&node), Ok(()));
}

#[test]
fn consistency_build_counts_steps_from_zero() {
    let mut builder = RelationalNodeBuilder::new("n");
    let i = builder.create_input("i", Type::Int).unwrap();
    builder
        .create_assumption("a", dsl::greater(i, dsl::integer(0)))
        .unwrap();

    let node = builder.build_consistency(5);
    assert_eq!(
        equation_texts(&node),
        [
            "a = (i > 0);",
            "conjunct = historically(a);",
            "step = (0 -> ((pre step) + 1));",
            "consistent = (not ((step = 5) and conjunct));",
        ]
    );
    assert_eq!(node.properties, ["consistent"]);
    assert_eq!(node.ivc, ["a"]);
    assert_eq!(var_ids(&node.locals), ["conjunct", "step", "consistent"]);
}

#[test]
fn realizability_build_asserts_assumptions_by_name() {
    let node = sensor_spec().build_realizability();

    assert_eq!(var_ids(&node.inputs), ["i", "o"]);
    // The assumption is asserted, not exposed as an output.
    assert!(node.outputs.is_empty());
    assert_eq!(var_ids(&node.locals), ["a", "conjunct", "p"]);
    assert_eq!(
        equation_texts(&node),
        [
            "a = (i > 0);",
            "conjunct = historically(a);",
            "p = (conjunct => (o >= 0));",
        ]
    );
    let assertions: Vec<String> = node.assertions.iter().map(|e| e.to_string()).collect();
    assert_eq!(assertions, ["a"]);
    assert_eq!(node.realizability_inputs, Some(vec!["i".to_string()]));

    let text = node.fmt(None).to_string();
    assert!(text.contains("  assert a;"));
    assert!(text.contains("  --%REALIZABLE i;"));
}

#[test]
fn call_arity_covers_inputs_outputs_and_locals() {
    let mut builder = RelationalNodeBuilder::new("n");
    builder.create_input("i", Type::Int).unwrap();
    builder.create_input("j", Type::Int).unwrap();
    builder.create_output("o", Type::Int).unwrap();

    assert_eq!(
        builder.call(vec![dsl::id("a"), dsl::id("b")]),
        Err(RelationalError::ArityMismatch {
            node: "n".to_string(),
            expected: 3,
            supplied: 2,
        })
    );

    let call = builder
        .call(vec![dsl::id("a"), dsl::id("b"), dsl::id("c")])
        .unwrap();
    assert_eq!(call.to_string(), "n(a, b, c)");
}

#[test]
fn program_seeds_the_temporal_operators() {
    let mut program = RelationalProgramBuilder::new();
    program.add_main_node(sensor_spec().build_entailment()).unwrap();
    let program = program.build();

    let ids: Vec<&str> = program.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["historically", "once", "sensor"]);
    assert_eq!(program.main.as_deref(), Some("sensor"));
    assert_eq!(analysis::check_program(&program), Ok(()));

    let text = program.to_string();
    assert_eq!(text.matches("--%MAIN;").count(), 1);
}

#[test]
fn program_namespace_reserves_the_operator_names() {
    let mut program = RelationalProgramBuilder::new();
    let node = RelationalNodeBuilder::new("historically").build();

    assert_eq!(
        program.add_node(node).map(|_| ()),
        Err(RelationalError::NameConflict {
            name: "historically".to_string(),
            existing: DeclKind::Node,
        })
    );
}

#[test]
fn program_declares_constants_and_type_aliases() {
    let mut program = RelationalProgramBuilder::new();
    let len = program
        .create_constant("len", Some(Type::Int), dsl::integer(4))
        .unwrap();
    assert_eq!(len.to_string(), "len");

    let alias = program
        .create_type_definition("window", Type::array(Type::Bool, 4))
        .unwrap();
    assert_eq!(alias, Type::named("window"));

    assert_eq!(
        program.create_constant("len", None, dsl::integer(5)),
        Err(RelationalError::NameConflict {
            name: "len".to_string(),
            existing: DeclKind::Constant,
        })
    );

    let program = program.build();
    assert_eq!(program.constants.len(), 1);
    assert_eq!(program.types[0].to_string(), "type window = bool[4];");
}
