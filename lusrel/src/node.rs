//! Node-level relational compilation.
//!
//! [`RelationalNodeBuilder`] accumulates a flat relational specification
//! (named inputs, outputs, locals, assumption/constraint/property relations)
//! and compiles it into a concrete node under one of four verification
//! intents. The builder is the mutable half of a two-phase life cycle: the
//! `build_*` methods consume it, and the resulting node is an ordinary
//! immutable tree.
//!
//! In every strategy the declared inputs, outputs, *and* locals all become
//! inputs of the generated node: the relational abstraction constrains
//! externally supplied values, it does not compute them.
use std::collections::BTreeMap;

use log::debug;
use lustir::{
    ast::{Equation, Node, VarDecl},
    build::NodeBuilder,
    dsl, pltl,
    expr::Expr,
    types::Type,
};

use crate::{
    error::{DeclKind, RelationalError, RelationalResult},
    relation::Relation,
};

/// Accumulates a relational specification and compiles it into a [`Node`].
#[derive(Debug, Clone)]
pub struct RelationalNodeBuilder {
    id: String,
    namespace: BTreeMap<String, DeclKind>,
    inputs: Vec<VarDecl>,
    outputs: Vec<VarDecl>,
    locals: Vec<VarDecl>,
    assumptions: Vec<Relation>,
    constraints: Vec<Relation>,
    properties: Vec<Relation>,
}

impl RelationalNodeBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        RelationalNodeBuilder {
            id: id.into(),
            namespace: BTreeMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            locals: Vec::new(),
            assumptions: Vec::new(),
            constraints: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// The name of the node the builder compiles to.
    pub fn id(&self) -> &str {
        &self.id
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
        debug!("relational node `{}`: declared {} `{}`", self.id, kind, name);
        self.namespace.insert(name.to_string(), kind);
        Ok(())
    }

    /// Declare an input and return the identifier expression referring to it.
    pub fn create_input(&mut self, name: impl Into<String>, ty: Type) -> RelationalResult<Expr> {
        let name = name.into();
        self.add_input(VarDecl::new(name.clone(), ty))?;
        Ok(dsl::id(name))
    }

    pub fn add_input(&mut self, input: VarDecl) -> RelationalResult<&mut Self> {
        self.reserve(&input.id, DeclKind::Input)?;
        self.inputs.push(input);
        Ok(self)
    }

    /// Declare an output and return the identifier expression referring to it.
    pub fn create_output(&mut self, name: impl Into<String>, ty: Type) -> RelationalResult<Expr> {
        let name = name.into();
        self.add_output(VarDecl::new(name.clone(), ty))?;
        Ok(dsl::id(name))
    }

    pub fn add_output(&mut self, output: VarDecl) -> RelationalResult<&mut Self> {
        self.reserve(&output.id, DeclKind::Output)?;
        self.outputs.push(output);
        Ok(self)
    }

    /// Declare a local and return the identifier expression referring to it.
    pub fn create_local(&mut self, name: impl Into<String>, ty: Type) -> RelationalResult<Expr> {
        let name = name.into();
        self.add_local(VarDecl::new(name.clone(), ty))?;
        Ok(dsl::id(name))
    }

    pub fn add_local(&mut self, local: VarDecl) -> RelationalResult<&mut Self> {
        self.reserve(&local.id, DeclKind::Local)?;
        self.locals.push(local);
        Ok(self)
    }

    /// Declare an assumption relation `name = expr`.
    pub fn create_assumption(
        &mut self,
        name: impl Into<String>,
        expr: Expr,
    ) -> RelationalResult<Relation> {
        let relation = Relation::new(name, expr);
        self.add_assumption(relation.clone())?;
        Ok(relation)
    }

    pub fn add_assumption(&mut self, relation: Relation) -> RelationalResult<&mut Self> {
        self.reserve(&relation.id, DeclKind::Assumption)?;
        self.assumptions.push(relation);
        Ok(self)
    }

    /// Declare a constraint relation `name = expr`.
    pub fn create_constraint(
        &mut self,
        name: impl Into<String>,
        expr: Expr,
    ) -> RelationalResult<Relation> {
        let relation = Relation::new(name, expr);
        self.add_constraint(relation.clone())?;
        Ok(relation)
    }

    pub fn add_constraint(&mut self, relation: Relation) -> RelationalResult<&mut Self> {
        self.reserve(&relation.id, DeclKind::Constraint)?;
        self.constraints.push(relation);
        Ok(self)
    }

    /// Declare a property relation `name = expr`.
    pub fn create_property(
        &mut self,
        name: impl Into<String>,
        expr: Expr,
    ) -> RelationalResult<Relation> {
        let relation = Relation::new(name, expr);
        self.add_property(relation.clone())?;
        Ok(relation)
    }

    pub fn add_property(&mut self, relation: Relation) -> RelationalResult<&mut Self> {
        self.reserve(&relation.id, DeclKind::Property)?;
        self.properties.push(relation);
        Ok(self)
    }

    /// The assumption and constraint identifiers, in declaration order.
    /// These are the outputs a caller binds when embedding the plain build
    /// as a sub-node.
    pub fn return_variables(&self) -> Vec<Expr> {
        self.assumptions
            .iter()
            .chain(&self.constraints)
            .map(|r| dsl::id(r.id.as_str()))
            .collect()
    }

    /// A call expression to the compiled node. The argument count must
    /// equal the total number of declared inputs, outputs, and locals.
    pub fn call(&self, args: Vec<Expr>) -> RelationalResult<Expr> {
        let expected = self.inputs.len() + self.outputs.len() + self.locals.len();
        if args.len() != expected {
            return Err(RelationalError::ArityMismatch {
                node: self.id.clone(),
                expected,
                supplied: args.len(),
            });
        }
        Ok(dsl::node_call(self.id.clone(), args))
    }

    /// The equation binding a relation's name to its expression.
    fn crunch(relation: &Relation) -> Equation {
        Equation::single(relation.id.as_str(), relation.expr.clone())
    }

    /// `historically(a1 and ... and c1 and ...)` over every assumption and
    /// constraint name: the conjunction has held at the current step and at
    /// every step before it.
    fn conjunct_all_relations(&self) -> Expr {
        let relation_ids = self
            .assumptions
            .iter()
            .chain(&self.constraints)
            .map(|r| dsl::id(r.id.as_str()));
        pltl::historically(dsl::conjoin(relation_ids))
    }

    /// `name = (conjunct => expr)`: the property only needs to hold while
    /// the accumulated relations have historically held.
    fn crunch_property(conjunct: &Expr, relation: &Relation) -> Equation {
        Equation::single(
            relation.id.as_str(),
            dsl::implies(conjunct.clone(), relation.expr.clone()),
        )
    }

    /// The plain compilation shared by every strategy: declared inputs,
    /// outputs, and locals all become node inputs; assumptions and
    /// constraints become boolean outputs bound by their defining equations.
    fn base(&self) -> NodeBuilder {
        let mut node = NodeBuilder::new(self.id.as_str());
        for input in self.inputs.iter().chain(&self.outputs).chain(&self.locals) {
            node.add_input(input.clone());
        }

        for relation in self.assumptions.iter().chain(&self.constraints) {
            node.create_output(relation.id.as_str(), Type::Bool);
            node.add_equation(Self::crunch(relation));
        }

        node
    }

    /// Plain build: the relation set as a callable unit, for embedding
    /// inside a larger node. Property relations are not compiled.
    pub fn build(self) -> Node {
        debug!("relational node `{}`: plain build", self.id);
        self.base().build()
    }

    /// Entailment build: check that the declared assumptions and
    /// constraints entail the declared properties. Each crunched property
    /// becomes a verification target; every assumption and constraint name
    /// is registered as a minimal-core hint.
    pub fn build_entailment(self) -> Node {
        debug!("relational node `{}`: entailment build", self.id);
        let mut node = self.base();

        let conjunct = node.create_local("conjunct", Type::Bool);
        node.define("conjunct", self.conjunct_all_relations());

        for property in &self.properties {
            node.create_local(property.id.as_str(), Type::Bool);
            node.add_equation(Self::crunch_property(&conjunct, property));
            node.add_property(property.id.as_str());
        }

        for relation in self.assumptions.iter().chain(&self.constraints) {
            node.add_ivc(relation.id.as_str());
        }

        node.build()
    }

    /// Consistency build: check that the relation set is not vacuously
    /// satisfiable through step `bound`. The generated step counter is 0 on
    /// the first step and increments by 1 thereafter; the single
    /// `consistent` property is false exactly when the counter reaches
    /// `bound` while the conjunct still holds, so a "valid" verdict means
    /// the relations cannot be sustained that long.
    pub fn build_consistency(self, bound: i64) -> Node {
        debug!(
            "relational node `{}`: consistency build, bound {}",
            self.id, bound
        );
        let mut node = self.base();

        let conjunct = node.create_local("conjunct", Type::Bool);
        node.define("conjunct", self.conjunct_all_relations());

        let step = node.create_local("step", Type::Int);
        node.define(
            "step",
            dsl::arrow(
                dsl::integer(0),
                dsl::plus(dsl::pre(step.clone()), dsl::integer(1)),
            ),
        );

        node.create_local("consistent", Type::Bool);
        node.define(
            "consistent",
            dsl::not(dsl::and(dsl::equal(step, dsl::integer(bound)), conjunct)),
        );
        node.add_property("consistent");

        for relation in self.assumptions.iter().chain(&self.constraints) {
            node.add_ivc(relation.id.as_str());
        }

        node.build()
    }

    /// Realizability build: check that outputs can always be chosen, given
    /// only the declared inputs, to satisfy the properties under the
    /// assumptions. Assumptions become hard assertions (bound as locals and
    /// asserted by name) instead of outputs; the declared input names are
    /// recorded as the realizability-input set.
    pub fn build_realizability(self) -> Node {
        debug!("relational node `{}`: realizability build", self.id);
        let mut node = NodeBuilder::new(self.id.as_str());
        for input in self.inputs.iter().chain(&self.outputs).chain(&self.locals) {
            node.add_input(input.clone());
        }

        for relation in &self.constraints {
            node.create_output(relation.id.as_str(), Type::Bool);
            node.add_equation(Self::crunch(relation));
        }

        for relation in &self.assumptions {
            node.create_local(relation.id.as_str(), Type::Bool);
            node.add_equation(Self::crunch(relation));
            node.add_assertion(dsl::id(relation.id.as_str()));
        }

        let conjunct = node.create_local("conjunct", Type::Bool);
        node.define("conjunct", self.conjunct_all_relations());

        for property in &self.properties {
            node.create_local(property.id.as_str(), Type::Bool);
            node.add_equation(Self::crunch_property(&conjunct, property));
        }

        node.set_realizability_inputs(self.inputs.iter().map(|vd| vd.id.clone()).collect());

        node.build()
    }
}
