//! Shared document handles for the single-threaded object graph

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::core_trait::Document;
use super::id::DocumentId;

/// Shared handle to a document in the in-memory graph
///
/// The association, the store, and application code observe the same
/// underlying document through cloned handles, so a linkage-field mutation
/// made by one side is visible to every other holder. Handles are not
/// thread-safe; a document graph is scoped to one thread and callers
/// serialize access per graph.
#[derive(Debug)]
pub struct DocumentHandle<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for DocumentHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Document> DocumentHandle<T> {
    /// Wrap a document in a shared handle
    pub fn new(document: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(document)),
        }
    }

    /// Borrow the underlying document immutably
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Borrow the underlying document mutably
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// The document's identifier, if assigned
    pub fn id(&self) -> Option<DocumentId> {
        self.inner.borrow().id()
    }

    /// The document's identifier, assigning one if absent
    pub fn ensure_id(&self) -> DocumentId {
        self.inner.borrow_mut().ensure_id()
    }

    /// Whether two handles point at the same underlying document
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
