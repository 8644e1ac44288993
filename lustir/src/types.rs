//! Value types of the dataflow language.
//!
//! The type system is a closed sum: the three builtin scalar types, named
//! references to aliased types, ordered record and enumeration types, and
//! fixed-size arrays. Types are plain immutable values compared structurally.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIs};

/// A value type of the language.
///
/// Record fields and enumeration values are ordered; the order is preserved
/// verbatim by the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(TypeKind))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    Bool,
    Int,
    Real,

    /// A reference to a type alias declared at the program level.
    Named(String),

    /// An ordered field-to-type mapping, rendered as `struct {f : t; ...}`.
    Record(Vec<(String, Type)>),

    /// An ordered sequence of value names, rendered as `enum {a, b, ...}`.
    Enum(Vec<String>),

    /// A fixed-size array of a base type.
    Array { base: Box<Type>, size: usize },
}

impl Type {
    /// Build a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// Build an array type over `base` with `size` elements.
    pub fn array(base: Type, size: usize) -> Self {
        Type::Array {
            base: Box::new(base),
            size,
        }
    }
}

/// A type alias declaration, rendered as `type id = t;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDef {
    pub id: String,
    pub ty: Type,
}

impl TypeDef {
    pub fn new(id: impl Into<String>, ty: Type) -> Self {
        TypeDef { id: id.into(), ty }
    }
}
