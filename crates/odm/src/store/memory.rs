//! In-memory document store
//!
//! Insertion-ordered reference backend used by tests and embedded callers.

use std::cell::{Cell, RefCell};

use crate::document::{Document, DocumentHandle, DocumentId};
use crate::error::OdmResult;
use crate::query::Filter;

use super::traits::DocumentStore;

/// In-memory store holding shared handles in insertion order
#[derive(Debug)]
pub struct MemoryStore<T> {
    documents: RefCell<Vec<DocumentHandle<T>>>,
    fetches: Cell<usize>,
}

impl<T: Document> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
        }
    }

    /// Insert a document, handing back its shared handle
    pub fn insert(&self, document: T) -> DocumentHandle<T> {
        let handle = DocumentHandle::new(document);
        self.documents.borrow_mut().push(handle.clone());
        handle
    }

    /// Insert an existing handle; the graph keeps observing the same document
    pub fn insert_handle(&self, handle: DocumentHandle<T>) {
        self.documents.borrow_mut().push(handle);
    }

    /// Look up a document by identifier
    pub fn get(&self, id: DocumentId) -> Option<DocumentHandle<T>> {
        self.documents
            .borrow()
            .iter()
            .find(|handle| handle.id() == Some(id))
            .cloned()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.borrow().len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.borrow().is_empty()
    }

    /// Remove every document
    pub fn clear(&self) {
        self.documents.borrow_mut().clear();
    }

    /// How many `find` calls have hit this store
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl<T: Document> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> DocumentStore<T> for MemoryStore<T> {
    fn find(&self, filter: &Filter) -> OdmResult<Vec<DocumentHandle<T>>> {
        self.fetches.set(self.fetches.get() + 1);
        let matching = self
            .documents
            .borrow()
            .iter()
            .filter(|handle| filter.matches(&*handle.borrow()))
            .cloned()
            .collect();
        Ok(matching)
    }

    fn delete_all(&self, filter: &Filter) -> OdmResult<usize> {
        let mut documents = self.documents.borrow_mut();
        let before = documents.len();
        documents.retain(|handle| !filter.matches(&*handle.borrow()));
        let removed = before - documents.len();
        tracing::debug!("deleted {} documents from in-memory store", removed);
        Ok(removed)
    }

    fn destroy_all(&self, filter: &Filter) -> OdmResult<usize> {
        let matching: Vec<DocumentHandle<T>> = self
            .documents
            .borrow()
            .iter()
            .filter(|handle| filter.matches(&*handle.borrow()))
            .cloned()
            .collect();

        let mut destroyed = 0;
        for handle in &matching {
            handle.borrow_mut().before_destroy()?;
            self.documents
                .borrow_mut()
                .retain(|existing| !existing.ptr_eq(handle));
            destroyed += 1;
        }
        tracing::debug!("destroyed {} documents from in-memory store", destroyed);
        Ok(destroyed)
    }
}
