//! # quill-odm: Document relationship core
//!
//! In-memory document graph maintenance for array-referenced one-to-many
//! relationships: the parent stores an ordered array of target identifiers,
//! and every mutation keeps the stored array, the lazily loaded target
//! collection, and any declared inverse on the target type consistent in a
//! single pass, without mutual recursion between the two sides.

pub mod document;
pub mod error;
pub mod query;
pub mod relationships;
pub mod store;

// Re-export core traits and types
pub use document::*;
pub use error::*;
pub use query::*;
pub use relationships::*;
pub use store::*;
