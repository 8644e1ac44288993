//! Canonical text serializer.
//!
//! Renders any tree back to the exact surface syntax of the language,
//! suitable for handing unmodified to an external verification engine. The
//! pragma comments (`--%MAIN;`, `--%PROPERTY`, `--%REALIZABLE`, `--%IVC`)
//! are machine-readable directives downstream, so the token forms here are
//! load-bearing.
//!
//! Context-free constructs implement [`std::fmt::Display`] directly. A node
//! needs to know the program's entry name to emit its `--%MAIN;` marker, so
//! [`Node::fmt`] and [`StatelessNode::fmt`] build a formatting helper
//! carrying that context (the same pattern the rest of the crate uses for
//! context-dependent rendering); [`Program`]'s `Display` threads its own
//! `main` through.
use std::fmt;

use crate::{
    ast::{
        Constant, Contract, ContractBody, ContractItem, Equation, Function, ImportedFunction,
        ImportedNode, Node, Program, StatelessNode, VarDecl,
    },
    expr::{Expr, ExprKind, UnaryOp},
    types::{Type, TypeDef},
};

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Real => write!(f, "real"),
            Type::Named(name) => write!(f, "{}", name),
            Type::Record(fields) => {
                write!(f, "struct {{")?;
                let mut first = true;
                for (name, ty) in fields {
                    if first {
                        first = false;
                    } else {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} : {}", name, ty)?;
                }
                write!(f, "}}")
            }
            Type::Enum(values) => {
                write!(f, "enum {{")?;
                let mut first = true;
                for value in values {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "}}")
            }
            Type::Array { base, size } => write!(f, "{}[{}]", base, size),
        }
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {} = {};", self.id, self.ty)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const {} = {};", self.id, self.expr)
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.id, self.ty)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lhs.is_empty() {
            write!(f, "()")?;
        } else {
            let mut first = true;
            for id in &self.lhs {
                if first {
                    first = false;
                } else {
                    write!(f, ", ")?;
                }
                write!(f, "{}", id)?;
            }
        }
        write!(f, " = {};", self.expr)
    }
}

/// The cast function for a cast target type.
///
/// # Panics
///
/// Panics for any target other than `int` or `real`; the language has no
/// cast function for other types, so reaching this is a configuration error
/// on the caller's side.
fn cast_function(target: &Type) -> &'static str {
    match target {
        Type::Real => "real",
        Type::Int => "floor",
        other => panic!("unable to cast to type: {}", other),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::Int(value) => write!(f, "{}", value),
            ExprKind::Real(value) => {
                let text = value.to_string();
                write!(f, "{}", text)?;
                if !text.contains('.') {
                    write!(f, ".0")?;
                }
                Ok(())
            }
            ExprKind::Id(id) => write!(f, "{}", id),
            ExprKind::Unary(op, inner) => {
                if *op == UnaryOp::Negative {
                    write!(f, "({}{})", op, inner)
                } else {
                    write!(f, "({} {})", op, inner)
                }
            }
            ExprKind::Binary(op, left, right) => write!(f, "({} {} {})", left, op, right),
            ExprKind::IfThenElse { cond, then, els } => {
                write!(f, "(if {} then {} else {})", cond, then, els)
            }
            ExprKind::Cast { target, expr } => write!(f, "{}({})", cast_function(target), expr),
            ExprKind::ArrayLit(elements) => {
                write!(f, "[")?;
                write_comma_separated(f, elements)?;
                write!(f, "]")
            }
            ExprKind::ArrayAccess { array, index } => write!(f, "{}[{}]", array, index),
            ExprKind::ArrayUpdate {
                array,
                index,
                value,
            } => write!(f, "{}[{} := {}]", array, index, value),
            ExprKind::RecordLit { id, fields } => {
                write!(f, "{} {{", id)?;
                let mut first = true;
                for (name, field_expr) in fields {
                    if first {
                        first = false;
                    } else {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} = {}", name, field_expr)?;
                }
                write!(f, "}}")
            }
            ExprKind::RecordAccess { record, field } => write!(f, "{}.{}", record, field),
            ExprKind::RecordUpdate {
                record,
                field,
                value,
            } => write!(f, "{}{{{} := {}}}", record, field, value),
            ExprKind::Tuple(elements) => {
                write!(f, "(")?;
                write_comma_separated(f, elements)?;
                write!(f, ")")
            }
            ExprKind::FunctionCall { function, args } => {
                write!(f, "{}(", function)?;
                write_comma_separated(f, args)?;
                write!(f, ")")
            }
            ExprKind::NodeCall { node, args } => {
                write!(f, "{}(", node)?;
                write_comma_separated(f, args)?;
                write!(f, ")")
            }
            ExprKind::Condact { clock, call, args } => {
                write!(f, "condact({}, {}", clock, call)?;
                for arg in args {
                    write!(f, ", {}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::ModeRef(path) => {
                for segment in path {
                    write!(f, "::{}", segment)?;
                }
                Ok(())
            }
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, exprs: &[Expr]) -> fmt::Result {
    let mut first = true;
    for expr in exprs {
        if first {
            first = false;
        } else {
            write!(f, ", ")?;
        }
        write!(f, "{}", expr)?;
    }
    Ok(())
}

/// The indented declaration list inside a signature or `var` block. No
/// semicolon after the last entry.
fn write_var_decls(f: &mut fmt::Formatter<'_>, var_decls: &[VarDecl]) -> fmt::Result {
    let mut iter = var_decls.iter().peekable();
    while let Some(var_decl) = iter.next() {
        write!(f, "  {}", var_decl)?;
        if iter.peek().is_some() {
            writeln!(f, ";")?;
        }
    }
    Ok(())
}

fn write_signature(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    id: &str,
    inputs: &[VarDecl],
    outputs: &[VarDecl],
) -> fmt::Result {
    writeln!(f, "{} {}(", keyword, id)?;
    write_var_decls(f, inputs)?;
    writeln!(f)?;
    writeln!(f, ") returns (")?;
    write_var_decls(f, outputs)?;
    writeln!(f)?;
    writeln!(f, ");")
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, "function", &self.id, &self.inputs, &self.outputs)
    }
}

impl fmt::Display for ImportedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, "function imported", &self.id, &self.inputs, &self.outputs)?;
        if let Some(body) = &self.contract {
            writeln!(f, "(*@contract")?;
            write!(f, "{}*)", body)?;
        }
        Ok(())
    }
}

impl fmt::Display for ImportedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, "node imported", &self.id, &self.inputs, &self.outputs)?;
        if let Some(body) = &self.contract {
            writeln!(f, "(*@contract")?;
            write!(f, "{}*)", body)?;
        }
        Ok(())
    }
}

impl fmt::Display for ContractBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "  {}", item)?;
        }
        Ok(())
    }
}

impl fmt::Display for ContractItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractItem::Assume(expr) => write!(f, "assume {};", expr),
            ContractItem::Guarantee(expr) => write!(f, "guarantee {};", expr),
            ContractItem::Mode(mode) => {
                writeln!(f, "mode {} (", mode.id)?;
                for expr in &mode.require {
                    writeln!(f, "    require {};", expr)?;
                }
                for expr in &mode.ensure {
                    writeln!(f, "    ensure  {};", expr)?;
                }
                write!(f, "  );")
            }
            ContractItem::Import(import) => {
                write!(f, "import {}(", import.id)?;
                write_comma_separated(f, &import.inputs)?;
                write!(f, ") returns (")?;
                write_comma_separated(f, &import.outputs)?;
                write!(f, ");")
            }
            ContractItem::Constant(constant) => write!(f, "{}", constant),
            ContractItem::VarDef(var_def) => {
                write!(f, "var {} = {};", var_def.var, var_def.expr)
            }
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, "contract", &self.id, &self.inputs, &self.outputs)?;
        writeln!(f, "let")?;
        write!(f, "{}", self.body)?;
        write!(f, "tel;")
    }
}

impl Node {
    /// Build a formatting helper that renders the node, emitting the
    /// `--%MAIN;` marker when `main` names this node.
    pub fn fmt<'a>(&'a self, main: Option<&'a str>) -> impl fmt::Display + 'a {
        struct Fmt<'a> {
            node: &'a Node,
            main: Option<&'a str>,
        }

        impl fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let node = self.node;
                write_signature(f, "node", &node.id, &node.inputs, &node.outputs)?;

                if let Some(body) = &node.contract {
                    writeln!(f, "(*@contract")?;
                    writeln!(f, "{}*)", body)?;
                }

                if !node.locals.is_empty() {
                    writeln!(f, "var")?;
                    write_var_decls(f, &node.locals)?;
                    writeln!(f, ";")?;
                }
                writeln!(f, "let")?;

                if self.main == Some(node.id.as_str()) {
                    writeln!(f, "  --%MAIN;")?;
                }

                for equation in &node.equations {
                    writeln!(f, "  {}", equation)?;
                    writeln!(f)?;
                }

                for assertion in &node.assertions {
                    writeln!(f, "  assert {};", assertion)?;
                    writeln!(f)?;
                }

                for property in &node.properties {
                    writeln!(f, "  --%PROPERTY {};", property)?;
                }

                if let Some(inputs) = &node.realizability_inputs {
                    writeln!(f, "  --%REALIZABLE {};", inputs.join(", "))?;
                    writeln!(f)?;
                }

                if !node.ivc.is_empty() {
                    writeln!(f, "  --%IVC {};", node.ivc.join(", "))?;
                    writeln!(f)?;
                }

                write!(f, "tel;")
            }
        }

        Fmt { node: self, main }
    }
}

impl StatelessNode {
    /// Build a formatting helper that renders the simplified node, emitting
    /// the `--%MAIN;` marker when `main` names it.
    pub fn fmt<'a>(&'a self, main: Option<&'a str>) -> impl fmt::Display + 'a {
        struct Fmt<'a> {
            node: &'a StatelessNode,
            main: Option<&'a str>,
        }

        impl fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let node = self.node;
                write_signature(f, "function", &node.id, &node.inputs, &node.outputs)?;

                if let Some(body) = &node.contract {
                    writeln!(f, "(*@contract")?;
                    writeln!(f, "{}*)", body)?;
                }

                if !node.locals.is_empty() {
                    writeln!(f, "var")?;
                    write_var_decls(f, &node.locals)?;
                    writeln!(f, ";")?;
                }
                writeln!(f, "let")?;

                if self.main == Some(node.id.as_str()) {
                    writeln!(f, "  --%MAIN;")?;
                }

                for equation in &node.equations {
                    writeln!(f, "  {}", equation)?;
                }

                if !node.assertions.is_empty() {
                    writeln!(f)?;
                    for assertion in &node.assertions {
                        writeln!(f, "  assert {};", assertion)?;
                        writeln!(f)?;
                    }
                }

                if !node.properties.is_empty() {
                    writeln!(f)?;
                    for property in &node.properties {
                        writeln!(f, "  --%PROPERTY {};", property)?;
                    }
                }

                write!(f, "tel;")
            }
        }

        Fmt { node: self, main }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = self.main.as_deref();

        if !self.types.is_empty() {
            for type_def in &self.types {
                writeln!(f, "{}", type_def)?;
            }
            writeln!(f)?;
        }

        if !self.constants.is_empty() {
            for constant in &self.constants {
                writeln!(f, "{}", constant)?;
            }
            writeln!(f)?;
        }

        if !self.functions.is_empty() {
            for function in &self.functions {
                writeln!(f, "{}", function)?;
            }
            writeln!(f)?;
        }

        if !self.imported_functions.is_empty() {
            for imported in &self.imported_functions {
                writeln!(f, "{}", imported)?;
            }
            writeln!(f)?;
        }

        if !self.imported_nodes.is_empty() {
            for imported in &self.imported_nodes {
                writeln!(f, "{}", imported)?;
            }
            writeln!(f)?;
        }

        for contract in &self.contracts {
            writeln!(f, "{}", contract)?;
            writeln!(f)?;
        }

        for node in &self.stateless_nodes {
            writeln!(f, "{}", node.fmt(main))?;
            writeln!(f)?;
        }

        let mut iter = self.nodes.iter().peekable();
        while let Some(node) = iter.next() {
            writeln!(f, "{}", node.fmt(main))?;
            if iter.peek().is_some() {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
