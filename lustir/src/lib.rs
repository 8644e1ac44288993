//! Syntax tree, traversals, and canonical text rendering for a synchronous
//! dataflow language with contracts, modes, and verification pragmas.
//!
//! The crate represents, transforms, and renders syntax; it never evaluates
//! it. The usual flow is: build a tree ([`ast`], [`build`], [`dsl`]),
//! optionally analyze or transform it ([`visit`], [`analysis`]), then render
//! it to the exact surface syntax ([`printer`]) for an external
//! compiler/verification engine.

pub mod analysis;
pub mod ast;
pub mod build;
pub mod dsl;
pub mod expr;
pub mod pltl;
pub mod printer;
pub mod types;
pub mod visit;
