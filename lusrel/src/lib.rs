//! Relational compiler: turns flat sets of named assumption, constraint,
//! and property relations into concrete dataflow nodes under four
//! verification intents (plain embedding, entailment, bounded consistency,
//! realizability), on top of the [`lustir`] syntax tree.

pub mod error;
pub mod node;
pub mod program;
pub mod relation;

pub use error::{DeclKind, RelationalError, RelationalResult};
pub use node::RelationalNodeBuilder;
pub use program::RelationalProgramBuilder;
pub use relation::Relation;
