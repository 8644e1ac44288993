//! Program-level relational compilation.
//!
//! [`RelationalProgramBuilder`] composes compiled relational nodes (plus
//! supporting constants, type aliases, and function signatures) into one
//! program with a designated entry node. The temporal operator definitions
//! `historically` and `once` are seeded into every relational program, so
//! both names are reserved from the start.
use std::collections::BTreeMap;

use log::debug;
use lustir::{
    ast::{Constant, Function, Node, Program},
    build::ProgramBuilder,
    dsl, pltl,
    expr::Expr,
    types::{Type, TypeDef},
};

use crate::error::{DeclKind, RelationalError, RelationalResult};

/// Accumulates the top-level declarations of a relational program under one
/// flat namespace.
#[derive(Debug, Clone)]
pub struct RelationalProgramBuilder {
    namespace: BTreeMap<String, DeclKind>,
    main: Option<String>,
    nodes: Vec<Node>,
    constants: Vec<Constant>,
    typedefs: Vec<TypeDef>,
    functions: Vec<Function>,
}

impl RelationalProgramBuilder {
    pub fn new() -> Self {
        let mut namespace = BTreeMap::new();
        let mut nodes = Vec::new();
        // The operator library ships with every relational program.
        for node in [pltl::historically_node(), pltl::once_node()] {
            namespace.insert(node.id.clone(), DeclKind::Node);
            nodes.push(node);
        }

        RelationalProgramBuilder {
            namespace,
            main: None,
            nodes,
            constants: Vec::new(),
            typedefs: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Reserve `name` in the flat namespace. On conflict nothing is
    /// registered and the namespace is left unchanged.
    fn reserve(&mut self, name: &str, kind: DeclKind) -> RelationalResult<()> {
        if let Some(existing) = self.namespace.get(name) {
            return Err(RelationalError::NameConflict {
                name: name.to_string(),
                existing: *existing,
            });
        }
        debug!("relational program: declared {} `{}`", kind, name);
        self.namespace.insert(name.to_string(), kind);
        Ok(())
    }

    /// Add `node` and designate it as the program's entry node.
    pub fn add_main_node(&mut self, node: Node) -> RelationalResult<&mut Self> {
        let id = node.id.clone();
        self.add_node(node)?;
        self.main = Some(id);
        Ok(self)
    }

    pub fn add_node(&mut self, node: Node) -> RelationalResult<&mut Self> {
        self.reserve(&node.id, DeclKind::Node)?;
        self.nodes.push(node);
        Ok(self)
    }

    /// Declare a constant and return the identifier expression referring to
    /// it.
    pub fn create_constant(
        &mut self,
        name: impl Into<String>,
        ty: Option<Type>,
        expr: Expr,
    ) -> RelationalResult<Expr> {
        let name = name.into();
        self.reserve(&name, DeclKind::Constant)?;
        self.constants.push(Constant::new(name.clone(), ty, expr));
        Ok(dsl::id(name))
    }

    /// Declare a type alias and return the named type referring to it.
    pub fn create_type_definition(
        &mut self,
        name: impl Into<String>,
        ty: Type,
    ) -> RelationalResult<Type> {
        let name = name.into();
        self.reserve(&name, DeclKind::TypeAlias)?;
        self.typedefs.push(TypeDef::new(name.clone(), ty));
        Ok(Type::Named(name))
    }

    pub fn add_function(&mut self, function: Function) -> RelationalResult<&mut Self> {
        self.reserve(&function.id, DeclKind::Function)?;
        self.functions.push(function);
        Ok(self)
    }

    /// Freeze the accumulated declarations into a [`Program`].
    pub fn build(self) -> Program {
        let mut program = ProgramBuilder::new();
        for node in self.nodes {
            program.add_node(node);
        }
        for constant in self.constants {
            program.add_constant(constant);
        }
        for typedef in self.typedefs {
            program.add_type(typedef);
        }
        for function in self.functions {
            program.add_function(function);
        }
        if let Some(main) = self.main {
            program.set_main(main);
        }
        program.build()
    }
}

impl Default for RelationalProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
