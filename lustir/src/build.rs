//! Accumulating builders for nodes and programs.
//!
//! These are plain two-phase accumulators: insertion methods during the
//! accumulation phase, then [`NodeBuilder::build`] / [`ProgramBuilder::build`]
//! consume the builder and freeze the accumulated state into an immutable
//! tree. They perform no name checking; the relational layer layers its own
//! namespace discipline on top.
use crate::{
    ast::{
        Constant, Contract, ContractBody, Equation, Function, ImportedFunction, ImportedNode,
        Node, Program, StatelessNode, VarDecl,
    },
    expr::{Expr, ExprKind},
    types::{Type, TypeDef},
};

/// Accumulates the parts of a [`Node`].
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    id: String,
    inputs: Vec<VarDecl>,
    outputs: Vec<VarDecl>,
    locals: Vec<VarDecl>,
    equations: Vec<Equation>,
    assertions: Vec<Expr>,
    properties: Vec<String>,
    realizability_inputs: Option<Vec<String>>,
    contract: Option<ContractBody>,
    ivc: Vec<String>,
}

impl NodeBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        NodeBuilder {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn add_input(&mut self, input: VarDecl) -> &mut Self {
        self.inputs.push(input);
        self
    }

    /// Declare an input and return the identifier expression referring to it.
    pub fn create_input(&mut self, name: impl Into<String>, ty: Type) -> Expr {
        let name = name.into();
        self.inputs.push(VarDecl::new(name.clone(), ty));
        Expr::new(ExprKind::Id(name))
    }

    pub fn add_output(&mut self, output: VarDecl) -> &mut Self {
        self.outputs.push(output);
        self
    }

    /// Declare an output and return the identifier expression referring to it.
    pub fn create_output(&mut self, name: impl Into<String>, ty: Type) -> Expr {
        let name = name.into();
        self.outputs.push(VarDecl::new(name.clone(), ty));
        Expr::new(ExprKind::Id(name))
    }

    pub fn add_local(&mut self, local: VarDecl) -> &mut Self {
        self.locals.push(local);
        self
    }

    /// Declare a local and return the identifier expression referring to it.
    pub fn create_local(&mut self, name: impl Into<String>, ty: Type) -> Expr {
        let name = name.into();
        self.locals.push(VarDecl::new(name.clone(), ty));
        Expr::new(ExprKind::Id(name))
    }

    pub fn add_equation(&mut self, equation: Equation) -> &mut Self {
        self.equations.push(equation);
        self
    }

    /// Shorthand for the single-target equation `name = expr`.
    pub fn define(&mut self, name: impl Into<String>, expr: Expr) -> &mut Self {
        self.equations.push(Equation::single(name, expr));
        self
    }

    pub fn add_assertion(&mut self, assertion: Expr) -> &mut Self {
        self.assertions.push(assertion);
        self
    }

    pub fn add_property(&mut self, name: impl Into<String>) -> &mut Self {
        self.properties.push(name.into());
        self
    }

    pub fn add_ivc(&mut self, name: impl Into<String>) -> &mut Self {
        self.ivc.push(name.into());
        self
    }

    pub fn set_realizability_inputs(&mut self, inputs: Vec<String>) -> &mut Self {
        self.realizability_inputs = Some(inputs);
        self
    }

    pub fn set_contract(&mut self, body: ContractBody) -> &mut Self {
        self.contract = Some(body);
        self
    }

    /// Freeze the accumulated state into a [`Node`].
    pub fn build(self) -> Node {
        Node {
            id: self.id,
            inputs: self.inputs,
            outputs: self.outputs,
            locals: self.locals,
            equations: self.equations,
            assertions: self.assertions,
            properties: self.properties,
            realizability_inputs: self.realizability_inputs,
            contract: self.contract,
            ivc: self.ivc,
        }
    }
}

/// Reopen an existing node for further accumulation.
impl From<Node> for NodeBuilder {
    fn from(node: Node) -> Self {
        NodeBuilder {
            id: node.id,
            inputs: node.inputs,
            outputs: node.outputs,
            locals: node.locals,
            equations: node.equations,
            assertions: node.assertions,
            properties: node.properties,
            realizability_inputs: node.realizability_inputs,
            contract: node.contract,
            ivc: node.ivc,
        }
    }
}

/// Accumulates the declaration groups of a [`Program`].
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    types: Vec<TypeDef>,
    constants: Vec<Constant>,
    functions: Vec<Function>,
    imported_functions: Vec<ImportedFunction>,
    imported_nodes: Vec<ImportedNode>,
    contracts: Vec<Contract>,
    stateless_nodes: Vec<StatelessNode>,
    nodes: Vec<Node>,
    main: Option<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, type_def: TypeDef) -> &mut Self {
        self.types.push(type_def);
        self
    }

    pub fn add_constant(&mut self, constant: Constant) -> &mut Self {
        self.constants.push(constant);
        self
    }

    pub fn add_function(&mut self, function: Function) -> &mut Self {
        self.functions.push(function);
        self
    }

    pub fn add_imported_function(&mut self, imported: ImportedFunction) -> &mut Self {
        self.imported_functions.push(imported);
        self
    }

    pub fn add_imported_node(&mut self, imported: ImportedNode) -> &mut Self {
        self.imported_nodes.push(imported);
        self
    }

    pub fn add_contract(&mut self, contract: Contract) -> &mut Self {
        self.contracts.push(contract);
        self
    }

    pub fn add_stateless_node(&mut self, node: StatelessNode) -> &mut Self {
        self.stateless_nodes.push(node);
        self
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn set_main(&mut self, main: impl Into<String>) -> &mut Self {
        self.main = Some(main.into());
        self
    }

    /// Freeze the accumulated state into a [`Program`].
    pub fn build(self) -> Program {
        Program {
            types: self.types,
            constants: self.constants,
            functions: self.functions,
            imported_functions: self.imported_functions,
            imported_nodes: self.imported_nodes,
            contracts: self.contracts,
            stateless_nodes: self.stateless_nodes,
            nodes: self.nodes,
            main: self.main,
        }
    }
}
