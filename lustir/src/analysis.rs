//! Opt-in reference validation.
//!
//! The declaration model itself does not check that property, IVC,
//! realizability-input, or asserted names resolve, nor that top-level names
//! are unique;
//! some callers rely on building intermediate trees that only become
//! well-formed once composed. These helpers let the callers who do want the
//! guarantee ask for it explicitly.
use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    ast::{Node, Program},
    expr::{Expr, ExprKind},
    visit::{Visit, walk_expr},
};

/// A dangling or duplicate name found by [`check_node`] / [`check_program`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("node `{node}` declares property `{name}`, which is not an input, output, or local")]
    UnknownProperty { node: String, name: String },

    #[error("node `{node}` declares IVC hint `{name}`, which is not an input, output, or local")]
    UnknownIvc { node: String, name: String },

    #[error("node `{node}` asserts over `{name}`, which is not an input, output, or local")]
    UnknownAssertionId { node: String, name: String },

    #[error(
        "node `{node}` declares realizability input `{name}`, which is not an input, output, or local"
    )]
    UnknownRealizabilityInput { node: String, name: String },

    #[error("the name `{name}` is declared more than once at the top level of the program")]
    DuplicateTopLevel { name: String },

    #[error("the program's main node `{name}` is not declared")]
    UnknownMain { name: String },
}

struct IdCollector {
    ids: BTreeSet<String>,
}

impl Visit for IdCollector {
    fn visit_expr(&mut self, expr: &Expr) {
        if let ExprKind::Id(name) = &expr.kind {
            self.ids.insert(name.clone());
        }
        walk_expr(self, expr);
    }
}

/// The set of identifier occurrences reachable from `expr`.
pub fn identifiers(expr: &Expr) -> BTreeSet<String> {
    let mut collector = IdCollector {
        ids: BTreeSet::new(),
    };
    collector.visit_expr(expr);
    collector.ids
}

/// The names declared as inputs, outputs, or locals of `node`.
pub fn declared_vars(node: &Node) -> BTreeSet<String> {
    node.inputs
        .iter()
        .chain(&node.outputs)
        .chain(&node.locals)
        .map(|vd| vd.id.clone())
        .collect()
}

/// Check that every property, IVC hint, realizability-input name, and
/// asserted identifier of `node` is a declared variable.
pub fn check_node(node: &Node) -> Result<(), ReferenceError> {
    let declared = declared_vars(node);

    for assertion in &node.assertions {
        for name in identifiers(assertion) {
            if !declared.contains(&name) {
                return Err(ReferenceError::UnknownAssertionId {
                    node: node.id.clone(),
                    name,
                });
            }
        }
    }

    for name in &node.properties {
        if !declared.contains(name) {
            return Err(ReferenceError::UnknownProperty {
                node: node.id.clone(),
                name: name.clone(),
            });
        }
    }

    for name in &node.ivc {
        if !declared.contains(name) {
            return Err(ReferenceError::UnknownIvc {
                node: node.id.clone(),
                name: name.clone(),
            });
        }
    }

    if let Some(inputs) = &node.realizability_inputs {
        for name in inputs {
            if !declared.contains(name) {
                return Err(ReferenceError::UnknownRealizabilityInput {
                    node: node.id.clone(),
                    name: name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Check the program-level invariants: one flat namespace across all
/// top-level declaration groups, and a resolvable `main`.
pub fn check_program(program: &Program) -> Result<(), ReferenceError> {
    let mut seen = BTreeSet::new();
    let mut check = |name: &String| {
        if !seen.insert(name.clone()) {
            return Err(ReferenceError::DuplicateTopLevel { name: name.clone() });
        }
        Ok(())
    };

    for type_def in &program.types {
        check(&type_def.id)?;
    }
    for constant in &program.constants {
        check(&constant.id)?;
    }
    for function in &program.functions {
        check(&function.id)?;
    }
    for imported in &program.imported_functions {
        check(&imported.id)?;
    }
    for imported in &program.imported_nodes {
        check(&imported.id)?;
    }
    for contract in &program.contracts {
        check(&contract.id)?;
    }
    for node in &program.stateless_nodes {
        check(&node.id)?;
    }
    for node in &program.nodes {
        check(&node.id)?;
    }

    if let Some(main) = &program.main {
        let resolves = program.nodes.iter().any(|n| &n.id == main)
            || program.stateless_nodes.iter().any(|n| &n.id == main);
        if !resolves {
            return Err(ReferenceError::UnknownMain { name: main.clone() });
        }
    }

    Ok(())
}
