use lustir::{dsl, pltl};

#[test]
fn operator_library_in_canonical_order() {
    let ids: Vec<String> = pltl::all_nodes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, ["historically", "once", "triggers", "since"]);
}

#[test]
fn historically_recurrence() {
    let node = pltl::historically_node();
    assert_eq!(node.id, pltl::HISTORICALLY);
    assert_eq!(node.equations.len(), 1);
    assert_eq!(
        node.equations[0].to_string(),
        "holds = (signal and (true -> (pre holds)));"
    );
}

#[test]
fn once_recurrence() {
    let node = pltl::once_node();
    assert_eq!(
        node.equations[0].to_string(),
        "holds = (signal or (false -> (pre holds)));"
    );
}

#[test]
fn since_recurrence() {
    let node = pltl::since_node();
    let inputs: Vec<&str> = node.inputs.iter().map(|vd| vd.id.as_str()).collect();
    assert_eq!(inputs, ["x", "y"]);
    assert_eq!(
        node.equations[0].to_string(),
        "holds = (y or (x and (false -> (pre holds))));"
    );
}

#[test]
fn triggers_recurrence() {
    let node = pltl::triggers_node();
    assert_eq!(
        node.equations[0].to_string(),
        "holds = (y and (x or (true -> (pre holds))));"
    );
}

#[test]
fn call_constructors_render_as_node_calls() {
    assert_eq!(pltl::historically(dsl::id("a")).to_string(), "historically(a)");
    assert_eq!(pltl::once(dsl::id("a")).to_string(), "once(a)");
    assert_eq!(
        pltl::since(dsl::id("a"), dsl::id("b")).to_string(),
        "since(a, b)"
    );
    assert_eq!(
        pltl::triggers(dsl::id("a"), dsl::id("b")).to_string(),
        "triggers(a, b)"
    );
}
