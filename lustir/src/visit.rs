//! Traversal framework.
//!
//! Two canonical traversals over the syntax tree, both driven by exhaustive
//! `match` over the closed variant sets:
//!
//! - [`Visit`]: a read-only walk for collection/analysis tasks. Override the
//!   `visit_*` method for the construct you care about and delegate back to
//!   the matching `walk_*` function to keep descending.
//! - [`Rewrite`]: a transform-and-rebuild traversal. The default
//!   implementation reconstructs an equivalent tree; overriding
//!   `rewrite_expr` is the usual way to substitute sub-expressions.
//!
//! Both traversals descend into the program's types, constants, functions,
//! and nodes by default. The remaining declaration groups (imported
//! functions, imported nodes, contracts, stateless nodes) are skipped unless
//! the traversal opts in through its [`Descend`] flags, so a plain program
//! walk ignores contract-only artifacts.
//!
//! Equation left-hand identifiers are binding occurrences, not expressions;
//! neither traversal touches them.
use bitflags::bitflags;

use crate::{
    ast::{
        Constant, Contract, ContractBody, ContractImport, ContractItem, Equation, Function,
        ImportedFunction, ImportedNode, Mode, Node, Program, StatelessNode, VarDecl, VarDef,
    },
    expr::{Expr, ExprKind},
    types::TypeDef,
};

bitflags! {
    /// Declaration groups a traversal descends into beyond the default set.
    ///
    /// [`Descend::CONTRACTS`] additionally enables descent into contract
    /// bodies attached to nodes and imported declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Descend: u8 {
        const IMPORTED_FUNCTIONS = 1 << 0;
        const IMPORTED_NODES = 1 << 1;
        const CONTRACTS = 1 << 2;
        const STATELESS_NODES = 1 << 3;
    }
}

impl Default for Descend {
    fn default() -> Self {
        Descend::empty()
    }
}

/// Read-only traversal. Every default method delegates to the matching
/// `walk_*` free function.
pub trait Visit {
    /// Which optional declaration groups this traversal descends into.
    fn descend(&self) -> Descend {
        Descend::empty()
    }

    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_type_def(&mut self, _type_def: &TypeDef) {}

    fn visit_constant(&mut self, constant: &Constant) {
        self.visit_expr(&constant.expr);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_var_decls(self, &function.inputs);
        walk_var_decls(self, &function.outputs);
    }

    fn visit_imported_function(&mut self, imported: &ImportedFunction) {
        walk_imported_function(self, imported);
    }

    fn visit_imported_node(&mut self, imported: &ImportedNode) {
        walk_imported_node(self, imported);
    }

    fn visit_contract(&mut self, contract: &Contract) {
        walk_contract(self, contract);
    }

    fn visit_contract_body(&mut self, body: &ContractBody) {
        walk_contract_body(self, body);
    }

    fn visit_contract_item(&mut self, item: &ContractItem) {
        walk_contract_item(self, item);
    }

    fn visit_stateless_node(&mut self, node: &StatelessNode) {
        walk_stateless_node(self, node);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_var_decl(&mut self, _var_decl: &VarDecl) {}

    fn visit_equation(&mut self, equation: &Equation) {
        self.visit_expr(&equation.expr);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

/// Default program descent: types, constants, functions, the opted-in
/// groups, then nodes.
pub fn walk_program<V: Visit + ?Sized>(v: &mut V, program: &Program) {
    let descend = v.descend();
    for type_def in &program.types {
        v.visit_type_def(type_def);
    }
    for constant in &program.constants {
        v.visit_constant(constant);
    }
    for function in &program.functions {
        v.visit_function(function);
    }
    if descend.contains(Descend::IMPORTED_FUNCTIONS) {
        for imported in &program.imported_functions {
            v.visit_imported_function(imported);
        }
    }
    if descend.contains(Descend::IMPORTED_NODES) {
        for imported in &program.imported_nodes {
            v.visit_imported_node(imported);
        }
    }
    if descend.contains(Descend::CONTRACTS) {
        for contract in &program.contracts {
            v.visit_contract(contract);
        }
    }
    if descend.contains(Descend::STATELESS_NODES) {
        for node in &program.stateless_nodes {
            v.visit_stateless_node(node);
        }
    }
    for node in &program.nodes {
        v.visit_node(node);
    }
}

pub fn walk_var_decls<V: Visit + ?Sized>(v: &mut V, var_decls: &[VarDecl]) {
    for var_decl in var_decls {
        v.visit_var_decl(var_decl);
    }
}

pub fn walk_exprs<V: Visit + ?Sized>(v: &mut V, exprs: &[Expr]) {
    for expr in exprs {
        v.visit_expr(expr);
    }
}

pub fn walk_imported_function<V: Visit + ?Sized>(v: &mut V, imported: &ImportedFunction) {
    walk_var_decls(v, &imported.inputs);
    walk_var_decls(v, &imported.outputs);
    if v.descend().contains(Descend::CONTRACTS) {
        if let Some(body) = &imported.contract {
            v.visit_contract_body(body);
        }
    }
}

pub fn walk_imported_node<V: Visit + ?Sized>(v: &mut V, imported: &ImportedNode) {
    walk_var_decls(v, &imported.inputs);
    walk_var_decls(v, &imported.outputs);
    if v.descend().contains(Descend::CONTRACTS) {
        if let Some(body) = &imported.contract {
            v.visit_contract_body(body);
        }
    }
}

pub fn walk_contract<V: Visit + ?Sized>(v: &mut V, contract: &Contract) {
    walk_var_decls(v, &contract.inputs);
    walk_var_decls(v, &contract.outputs);
    v.visit_contract_body(&contract.body);
}

pub fn walk_contract_body<V: Visit + ?Sized>(v: &mut V, body: &ContractBody) {
    for item in &body.items {
        v.visit_contract_item(item);
    }
}

pub fn walk_contract_item<V: Visit + ?Sized>(v: &mut V, item: &ContractItem) {
    match item {
        ContractItem::Assume(expr) | ContractItem::Guarantee(expr) => v.visit_expr(expr),
        ContractItem::Mode(mode) => {
            walk_exprs(v, &mode.require);
            walk_exprs(v, &mode.ensure);
        }
        ContractItem::Import(import) => {
            walk_exprs(v, &import.inputs);
            walk_exprs(v, &import.outputs);
        }
        ContractItem::Constant(constant) => v.visit_constant(constant),
        ContractItem::VarDef(var_def) => {
            v.visit_var_decl(&var_def.var);
            v.visit_expr(&var_def.expr);
        }
    }
}

pub fn walk_stateless_node<V: Visit + ?Sized>(v: &mut V, node: &StatelessNode) {
    walk_var_decls(v, &node.inputs);
    walk_var_decls(v, &node.outputs);
    walk_var_decls(v, &node.locals);
    for equation in &node.equations {
        v.visit_equation(equation);
    }
    walk_exprs(v, &node.assertions);
    if v.descend().contains(Descend::CONTRACTS) {
        if let Some(body) = &node.contract {
            v.visit_contract_body(body);
        }
    }
}

pub fn walk_node<V: Visit + ?Sized>(v: &mut V, node: &Node) {
    walk_var_decls(v, &node.inputs);
    walk_var_decls(v, &node.outputs);
    walk_var_decls(v, &node.locals);
    for equation in &node.equations {
        v.visit_equation(equation);
    }
    walk_exprs(v, &node.assertions);
    if v.descend().contains(Descend::CONTRACTS) {
        if let Some(body) = &node.contract {
            v.visit_contract_body(body);
        }
    }
}

/// Visit every sub-expression reachable from `expr`.
pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Real(_)
        | ExprKind::Id(_)
        | ExprKind::ModeRef(_) => {}
        ExprKind::Unary(_, inner) => v.visit_expr(inner),
        ExprKind::Binary(_, left, right) => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::IfThenElse { cond, then, els } => {
            v.visit_expr(cond);
            v.visit_expr(then);
            v.visit_expr(els);
        }
        ExprKind::Cast { expr: inner, .. } => v.visit_expr(inner),
        ExprKind::ArrayLit(elements) | ExprKind::Tuple(elements) => walk_exprs(v, elements),
        ExprKind::ArrayAccess { array, index } => {
            v.visit_expr(array);
            v.visit_expr(index);
        }
        ExprKind::ArrayUpdate {
            array,
            index,
            value,
        } => {
            v.visit_expr(array);
            v.visit_expr(index);
            v.visit_expr(value);
        }
        ExprKind::RecordLit { fields, .. } => {
            for (_, field_expr) in fields {
                v.visit_expr(field_expr);
            }
        }
        ExprKind::RecordAccess { record, .. } => v.visit_expr(record),
        ExprKind::RecordUpdate { record, value, .. } => {
            v.visit_expr(record);
            v.visit_expr(value);
        }
        ExprKind::FunctionCall { args, .. } | ExprKind::NodeCall { args, .. } => {
            walk_exprs(v, args)
        }
        ExprKind::Condact { clock, call, args } => {
            v.visit_expr(clock);
            v.visit_expr(call);
            walk_exprs(v, args);
        }
    }
}

/// Transform-and-rebuild traversal. The identity instance reconstructs a
/// structurally equal tree; declarations without sub-expressions pass
/// through as clones.
pub trait Rewrite {
    /// Which optional declaration groups this traversal rebuilds through.
    /// Groups outside the set are cloned unchanged.
    fn descend(&self) -> Descend {
        Descend::empty()
    }

    fn rewrite_program(&mut self, program: &Program) -> Program {
        map_program(self, program)
    }

    fn rewrite_type_def(&mut self, type_def: &TypeDef) -> TypeDef {
        type_def.clone()
    }

    fn rewrite_constant(&mut self, constant: &Constant) -> Constant {
        Constant {
            id: constant.id.clone(),
            ty: constant.ty.clone(),
            expr: self.rewrite_expr(&constant.expr),
        }
    }

    fn rewrite_function(&mut self, function: &Function) -> Function {
        Function {
            id: function.id.clone(),
            inputs: map_var_decls(self, &function.inputs),
            outputs: map_var_decls(self, &function.outputs),
        }
    }

    fn rewrite_imported_function(&mut self, imported: &ImportedFunction) -> ImportedFunction {
        map_imported_function(self, imported)
    }

    fn rewrite_imported_node(&mut self, imported: &ImportedNode) -> ImportedNode {
        map_imported_node(self, imported)
    }

    fn rewrite_contract(&mut self, contract: &Contract) -> Contract {
        Contract {
            id: contract.id.clone(),
            inputs: map_var_decls(self, &contract.inputs),
            outputs: map_var_decls(self, &contract.outputs),
            body: self.rewrite_contract_body(&contract.body),
        }
    }

    /// # Panics
    ///
    /// Panics if the body's item list is empty; a contract body must carry
    /// at least one item.
    fn rewrite_contract_body(&mut self, body: &ContractBody) -> ContractBody {
        map_contract_body(self, body)
    }

    fn rewrite_contract_item(&mut self, item: &ContractItem) -> ContractItem {
        map_contract_item(self, item)
    }

    fn rewrite_stateless_node(&mut self, node: &StatelessNode) -> StatelessNode {
        map_stateless_node(self, node)
    }

    fn rewrite_node(&mut self, node: &Node) -> Node {
        map_node(self, node)
    }

    fn rewrite_var_decl(&mut self, var_decl: &VarDecl) -> VarDecl {
        var_decl.clone()
    }

    /// Left-hand identifiers are binding occurrences and pass through
    /// untouched.
    fn rewrite_equation(&mut self, equation: &Equation) -> Equation {
        Equation {
            location: equation.location,
            lhs: equation.lhs.clone(),
            expr: self.rewrite_expr(&equation.expr),
        }
    }

    fn rewrite_expr(&mut self, expr: &Expr) -> Expr {
        map_expr(self, expr)
    }
}

pub fn map_var_decls<R: Rewrite + ?Sized>(r: &mut R, var_decls: &[VarDecl]) -> Vec<VarDecl> {
    var_decls.iter().map(|vd| r.rewrite_var_decl(vd)).collect()
}

pub fn map_exprs<R: Rewrite + ?Sized>(r: &mut R, exprs: &[Expr]) -> Vec<Expr> {
    exprs.iter().map(|e| r.rewrite_expr(e)).collect()
}

/// Rebuild a program. Groups outside the traversal's [`Descend`] set are
/// cloned unchanged rather than rebuilt.
pub fn map_program<R: Rewrite + ?Sized>(r: &mut R, program: &Program) -> Program {
    let descend = r.descend();
    Program {
        types: program.types.iter().map(|t| r.rewrite_type_def(t)).collect(),
        constants: program
            .constants
            .iter()
            .map(|c| r.rewrite_constant(c))
            .collect(),
        functions: program
            .functions
            .iter()
            .map(|f| r.rewrite_function(f))
            .collect(),
        imported_functions: if descend.contains(Descend::IMPORTED_FUNCTIONS) {
            program
                .imported_functions
                .iter()
                .map(|i| r.rewrite_imported_function(i))
                .collect()
        } else {
            program.imported_functions.clone()
        },
        imported_nodes: if descend.contains(Descend::IMPORTED_NODES) {
            program
                .imported_nodes
                .iter()
                .map(|i| r.rewrite_imported_node(i))
                .collect()
        } else {
            program.imported_nodes.clone()
        },
        contracts: if descend.contains(Descend::CONTRACTS) {
            program
                .contracts
                .iter()
                .map(|c| r.rewrite_contract(c))
                .collect()
        } else {
            program.contracts.clone()
        },
        stateless_nodes: if descend.contains(Descend::STATELESS_NODES) {
            program
                .stateless_nodes
                .iter()
                .map(|n| r.rewrite_stateless_node(n))
                .collect()
        } else {
            program.stateless_nodes.clone()
        },
        nodes: program.nodes.iter().map(|n| r.rewrite_node(n)).collect(),
        main: program.main.clone(),
    }
}

/// Rebuild an attached contract body when the traversal descends into
/// contracts; clone it unchanged otherwise.
fn map_attached_contract<R: Rewrite + ?Sized>(
    r: &mut R,
    contract: &Option<ContractBody>,
) -> Option<ContractBody> {
    if r.descend().contains(Descend::CONTRACTS) {
        contract.as_ref().map(|body| r.rewrite_contract_body(body))
    } else {
        contract.clone()
    }
}

pub fn map_imported_function<R: Rewrite + ?Sized>(
    r: &mut R,
    imported: &ImportedFunction,
) -> ImportedFunction {
    ImportedFunction {
        id: imported.id.clone(),
        inputs: map_var_decls(r, &imported.inputs),
        outputs: map_var_decls(r, &imported.outputs),
        contract: map_attached_contract(r, &imported.contract),
    }
}

pub fn map_imported_node<R: Rewrite + ?Sized>(r: &mut R, imported: &ImportedNode) -> ImportedNode {
    ImportedNode {
        id: imported.id.clone(),
        inputs: map_var_decls(r, &imported.inputs),
        outputs: map_var_decls(r, &imported.outputs),
        contract: map_attached_contract(r, &imported.contract),
    }
}

/// Rebuild a contract body.
///
/// # Panics
///
/// Panics if `body.items` is empty. An empty body is a structural
/// precondition violation on the caller's side, not a recoverable state.
pub fn map_contract_body<R: Rewrite + ?Sized>(r: &mut R, body: &ContractBody) -> ContractBody {
    assert!(
        !body.items.is_empty(),
        "a contract body must contain at least one item"
    );
    ContractBody {
        items: body
            .items
            .iter()
            .map(|item| r.rewrite_contract_item(item))
            .collect(),
    }
}

pub fn map_contract_item<R: Rewrite + ?Sized>(r: &mut R, item: &ContractItem) -> ContractItem {
    match item {
        ContractItem::Assume(expr) => ContractItem::Assume(r.rewrite_expr(expr)),
        ContractItem::Guarantee(expr) => ContractItem::Guarantee(r.rewrite_expr(expr)),
        ContractItem::Mode(mode) => ContractItem::Mode(Mode {
            id: mode.id.clone(),
            require: map_exprs(r, &mode.require),
            ensure: map_exprs(r, &mode.ensure),
        }),
        ContractItem::Import(import) => ContractItem::Import(ContractImport {
            id: import.id.clone(),
            inputs: map_exprs(r, &import.inputs),
            outputs: map_exprs(r, &import.outputs),
        }),
        ContractItem::Constant(constant) => ContractItem::Constant(r.rewrite_constant(constant)),
        ContractItem::VarDef(var_def) => ContractItem::VarDef(VarDef {
            var: r.rewrite_var_decl(&var_def.var),
            expr: r.rewrite_expr(&var_def.expr),
        }),
    }
}

pub fn map_stateless_node<R: Rewrite + ?Sized>(r: &mut R, node: &StatelessNode) -> StatelessNode {
    StatelessNode {
        id: node.id.clone(),
        inputs: map_var_decls(r, &node.inputs),
        outputs: map_var_decls(r, &node.outputs),
        contract: map_attached_contract(r, &node.contract),
        locals: map_var_decls(r, &node.locals),
        equations: node
            .equations
            .iter()
            .map(|eq| r.rewrite_equation(eq))
            .collect(),
        assertions: map_exprs(r, &node.assertions),
        properties: node.properties.clone(),
    }
}

pub fn map_node<R: Rewrite + ?Sized>(r: &mut R, node: &Node) -> Node {
    Node {
        id: node.id.clone(),
        inputs: map_var_decls(r, &node.inputs),
        outputs: map_var_decls(r, &node.outputs),
        locals: map_var_decls(r, &node.locals),
        equations: node
            .equations
            .iter()
            .map(|eq| r.rewrite_equation(eq))
            .collect(),
        assertions: map_exprs(r, &node.assertions),
        properties: node.properties.clone(),
        realizability_inputs: node.realizability_inputs.clone(),
        contract: map_attached_contract(r, &node.contract),
        ivc: node.ivc.clone(),
    }
}

/// Rebuild an expression, substituting each sub-expression with its
/// rewritten form. The source location is carried over.
pub fn map_expr<R: Rewrite + ?Sized>(r: &mut R, expr: &Expr) -> Expr {
    let kind = match &expr.kind {
        ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Real(_)
        | ExprKind::Id(_)
        | ExprKind::ModeRef(_) => expr.kind.clone(),
        ExprKind::Unary(op, inner) => ExprKind::Unary(*op, Box::new(r.rewrite_expr(inner))),
        ExprKind::Binary(op, left, right) => ExprKind::Binary(
            *op,
            Box::new(r.rewrite_expr(left)),
            Box::new(r.rewrite_expr(right)),
        ),
        ExprKind::IfThenElse { cond, then, els } => ExprKind::IfThenElse {
            cond: Box::new(r.rewrite_expr(cond)),
            then: Box::new(r.rewrite_expr(then)),
            els: Box::new(r.rewrite_expr(els)),
        },
        ExprKind::Cast {
            target,
            expr: inner,
        } => ExprKind::Cast {
            target: target.clone(),
            expr: Box::new(r.rewrite_expr(inner)),
        },
        ExprKind::ArrayLit(elements) => ExprKind::ArrayLit(map_exprs(r, elements)),
        ExprKind::Tuple(elements) => ExprKind::Tuple(map_exprs(r, elements)),
        ExprKind::ArrayAccess { array, index } => ExprKind::ArrayAccess {
            array: Box::new(r.rewrite_expr(array)),
            index: Box::new(r.rewrite_expr(index)),
        },
        ExprKind::ArrayUpdate {
            array,
            index,
            value,
        } => ExprKind::ArrayUpdate {
            array: Box::new(r.rewrite_expr(array)),
            index: Box::new(r.rewrite_expr(index)),
            value: Box::new(r.rewrite_expr(value)),
        },
        ExprKind::RecordLit { id, fields } => ExprKind::RecordLit {
            id: id.clone(),
            fields: fields
                .iter()
                .map(|(name, field_expr)| (name.clone(), r.rewrite_expr(field_expr)))
                .collect(),
        },
        ExprKind::RecordAccess { record, field } => ExprKind::RecordAccess {
            record: Box::new(r.rewrite_expr(record)),
            field: field.clone(),
        },
        ExprKind::RecordUpdate {
            record,
            field,
            value,
        } => ExprKind::RecordUpdate {
            record: Box::new(r.rewrite_expr(record)),
            field: field.clone(),
            value: Box::new(r.rewrite_expr(value)),
        },
        ExprKind::FunctionCall { function, args } => ExprKind::FunctionCall {
            function: function.clone(),
            args: map_exprs(r, args),
        },
        ExprKind::NodeCall { node, args } => ExprKind::NodeCall {
            node: node.clone(),
            args: map_exprs(r, args),
        },
        ExprKind::Condact { clock, call, args } => ExprKind::Condact {
            clock: Box::new(r.rewrite_expr(clock)),
            call: Box::new(r.rewrite_expr(call)),
            args: map_exprs(r, args),
        },
    };
    Expr::at(expr.location, kind)
}

/// The identity rewrite: reconstructs a structurally equal tree.
#[derive(Debug, Default)]
pub struct Identity;

impl Rewrite for Identity {}
