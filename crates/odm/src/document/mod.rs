//! Document Model - identity, named fields, and shared handles
//!
//! - `core_trait`: core Document trait definition
//! - `id`: UUID-backed document identifiers
//! - `handle`: shared single-threaded document handles
//! - `fields`: one-sided linkage-field primitives

pub mod core_trait;
pub mod fields;
pub mod handle;
pub mod id;

pub use core_trait::Document;
pub use handle::DocumentHandle;
pub use id::DocumentId;
