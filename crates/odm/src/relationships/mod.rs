//! Relationships Module - array-referenced associations with inverse maintenance

pub mod inverse;
pub mod metadata;
pub mod references_many;
pub mod registry;


pub use inverse::*;
pub use metadata::*;
pub use references_many::*;
pub use registry::*;
