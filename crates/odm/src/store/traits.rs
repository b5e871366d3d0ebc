//! Store Traits - collaborator seam for the backing document store

use crate::document::{Document, DocumentHandle};
use crate::error::OdmResult;
use crate::query::Filter;

/// Synchronous query surface of the backing document store
///
/// Calls are opaque and synchronous; failures propagate to the caller
/// unchanged, with no retry inside the core. Implementations hand out shared
/// handles into the same in-memory graph the associations mutate.
pub trait DocumentStore<T: Document> {
    /// Fetch every document matching the filter
    fn find(&self, filter: &Filter) -> OdmResult<Vec<DocumentHandle<T>>>;

    /// Bulk-remove matching documents without running lifecycle hooks,
    /// returning how many were removed
    fn delete_all(&self, filter: &Filter) -> OdmResult<usize>;

    /// Bulk-remove matching documents, running each document's
    /// `before_destroy` hook first, returning how many were removed
    fn destroy_all(&self, filter: &Filter) -> OdmResult<usize>;
}
