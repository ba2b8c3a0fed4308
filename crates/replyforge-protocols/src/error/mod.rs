//! Error taxonomy shared across the workspace.
//!
//! Resolver operations return tagged failure values - no panic crosses a
//! component boundary. Zero open conversations and zero visible messages are
//! explicitly NOT errors anywhere in this taxonomy.

mod extraction;
mod generation;
mod insertion;

pub use extraction::ExtractionError;
pub use generation::GenerationError;
pub use insertion::InsertionError;
