//! Array-Referenced Association - ordered id-array one-to-many
//!
//! The parent side stores an ordered array of target identifiers in one of
//! its fields. The association keeps three views of that relationship in
//! step: the stored id array, the lazily loaded target collection, and the
//! linkage field of any inverse declared on the target type. Every mutation
//! updates each applicable view exactly once.

use std::collections::HashMap;

use serde_json::Value;

use crate::document::{fields, Document, DocumentHandle, DocumentId};
use crate::error::{OdmError, OdmResult};
use crate::query::Filter;
use crate::store::DocumentStore;

use super::inverse::{InverseResolver, ResolvedInverse};
use super::metadata::{RelationshipKind, RelationshipMetadata};
use super::registry::RelationshipRegistry;

/// One relationship instance: one parent document, one array-referenced
/// declaration, and the lazily materialized target collection
///
/// Associations are created per graph traversal and never persisted; only
/// the parent's key field and the targets' linkage fields survive in the
/// documents themselves.
#[derive(Debug)]
pub struct ReferencesMany<P, T>
where
    P: Document,
    T: Document,
{
    parent: DocumentHandle<P>,
    metadata: RelationshipMetadata,
    inverse: Option<ResolvedInverse>,
    targets: Option<Vec<DocumentHandle<T>>>,
}

impl<P, T> ReferencesMany<P, T>
where
    P: Document,
    T: Document,
{
    /// Bind an association to a parent document and a relationship
    /// declaration
    ///
    /// The inverse, if declared, is resolved here once; propagation later
    /// switches on the resolved kind instead of consulting the registry
    /// again. Declarations that are not array-referenced, target a different
    /// type than `T`, or carry an unresolvable `inverse_of` are rejected.
    pub fn new(
        parent: DocumentHandle<P>,
        metadata: RelationshipMetadata,
        registry: &RelationshipRegistry,
    ) -> OdmResult<Self> {
        if !metadata.kind.is_collection() {
            return Err(OdmError::Configuration(format!(
                "relationship '{}' is not stored as an id array",
                metadata.name
            )));
        }

        if metadata.target_type != T::type_name() {
            return Err(OdmError::Configuration(format!(
                "relationship '{}' targets '{}', not '{}'",
                metadata.name,
                metadata.target_type,
                T::type_name()
            )));
        }

        let inverse = InverseResolver::new(registry).resolve(&metadata)?;
        Ok(Self {
            parent,
            metadata,
            inverse,
            targets: None,
        })
    }

    /// The parent document this association is bound to
    pub fn parent(&self) -> &DocumentHandle<P> {
        &self.parent
    }

    /// The declaration this association was built from
    pub fn metadata(&self) -> &RelationshipMetadata {
        &self.metadata
    }

    /// Whether the target collection has been materialized
    pub fn is_loaded(&self) -> bool {
        self.targets.is_some()
    }

    /// The cached target collection; empty until `load` has run
    pub fn get(&self) -> &[DocumentHandle<T>] {
        self.targets.as_deref().unwrap_or(&[])
    }

    /// Number of cached targets
    pub fn len(&self) -> usize {
        self.get().len()
    }

    /// Whether the cache holds no targets
    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }

    /// Iterate over the cached target handles
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentHandle<T>> {
        self.get().iter()
    }

    /// Identifiers currently stored in the parent's key field
    pub fn key_ids(&self) -> OdmResult<Vec<DocumentId>> {
        fields::id_array(&*self.parent.borrow(), &self.metadata.key_field)
    }

    /// Materialize the target collection, fetching from the store at most
    /// once per association lifetime
    ///
    /// Fetched documents are normalized to the id array's order, so the
    /// cache agrees with the stored array as soon as it exists. A store
    /// failure propagates and leaves the cache unset.
    pub fn load<S>(&mut self, store: &S) -> OdmResult<()>
    where
        S: DocumentStore<T>,
    {
        if self.targets.is_some() {
            return Ok(());
        }

        let ids = self.key_ids()?;
        let fetched = store.find(&Filter::IdIn(ids.clone()))?;
        tracing::debug!(
            "loaded {} of {} referenced '{}' documents",
            fetched.len(),
            ids.len(),
            self.metadata.target_type
        );
        self.targets = Some(order_by_ids(fetched, &ids));
        Ok(())
    }

    /// Invalidate the cache; the next `load` re-fetches
    pub fn reset(&mut self) {
        self.targets = None;
    }

    /// Append target documents to the relationship
    ///
    /// Local append runs first (stored id array plus cache, order preserved
    /// relative to existing entries), then a single propagation pass onto
    /// each target's inverse field when an inverse is declared. Propagation
    /// uses the one-sided field primitives, never `push` itself, so the two
    /// sides cannot re-trigger each other.
    pub fn push<S>(&mut self, store: &S, documents: Vec<DocumentHandle<T>>) -> OdmResult<()>
    where
        S: DocumentStore<T>,
    {
        self.append(store, &documents)?;
        self.propagate(&documents)
    }

    /// Alias for `push`
    pub fn concat<S>(&mut self, store: &S, documents: Vec<DocumentHandle<T>>) -> OdmResult<()>
    where
        S: DocumentStore<T>,
    {
        self.push(store, documents)
    }

    /// Instantiate a document from attributes and push it, returning its
    /// handle
    ///
    /// Instantiation failures propagate before any linkage occurs. The new
    /// document is linked but not persisted; writes happen through the
    /// surrounding persistence layer.
    pub fn build<S>(
        &mut self,
        store: &S,
        attributes: &HashMap<String, Value>,
    ) -> OdmResult<DocumentHandle<T>>
    where
        S: DocumentStore<T>,
    {
        self.load(store)?;
        let document = DocumentHandle::new(T::from_attributes(attributes)?);
        self.push(store, vec![document.clone()])?;
        Ok(document)
    }

    /// Unlink every referenced document without touching the store
    ///
    /// Clears the declared inverse field on each target (array inverses keep
    /// entries pointing at other parents), empties the parent's key field,
    /// and resets the cache. The next load fetches an empty collection.
    pub fn dereference_all<S>(&mut self, store: &S) -> OdmResult<()>
    where
        S: DocumentStore<T>,
    {
        self.load(store)?;

        if let Some(inverse) = &self.inverse {
            // An unidentified parent cannot appear on any inverse side
            if let Some(parent_id) = self.parent.id() {
                for document in self.get() {
                    match inverse.kind {
                        RelationshipKind::ManyAsArray => {
                            fields::remove_id(&mut *document.borrow_mut(), &inverse.field, parent_id)?;
                        }
                        RelationshipKind::One => {
                            fields::set_reference(&mut *document.borrow_mut(), &inverse.field, None);
                        }
                    }
                }
            }
        }

        fields::write_id_array(&mut *self.parent.borrow_mut(), &self.metadata.key_field, &[]);
        self.reset();
        Ok(())
    }

    /// Bulk-delete referenced documents through the store, without running
    /// lifecycle hooks
    ///
    /// The scope is the currently referenced ids, optionally narrowed by a
    /// condition. Resets the cache on success and returns the removed count;
    /// on store failure the cache is left as it was.
    pub fn delete_all<S>(&mut self, store: &S, condition: Option<Filter>) -> OdmResult<usize>
    where
        S: DocumentStore<T>,
    {
        let scope = self.removal_scope(condition)?;
        let removed = store.delete_all(&scope)?;
        tracing::debug!(
            "delete_all removed {} '{}' documents",
            removed,
            self.metadata.target_type
        );
        self.reset();
        Ok(removed)
    }

    /// Bulk-destroy referenced documents through the store, running each
    /// document's teardown hook
    ///
    /// Same scoping and cache behavior as `delete_all`.
    pub fn destroy_all<S>(&mut self, store: &S, condition: Option<Filter>) -> OdmResult<usize>
    where
        S: DocumentStore<T>,
    {
        let scope = self.removal_scope(condition)?;
        let removed = store.destroy_all(&scope)?;
        tracing::debug!(
            "destroy_all removed {} '{}' documents",
            removed,
            self.metadata.target_type
        );
        self.reset();
        Ok(removed)
    }

    /// Reassign the relationship wholesale
    ///
    /// Dereferences whatever the parent currently references, then pushes
    /// the new target set, returning the resulting association. The parent's
    /// key field ends up holding exactly the new targets' identifiers, in
    /// order, regardless of prior content.
    pub fn update<S>(
        store: &S,
        parent: DocumentHandle<P>,
        metadata: RelationshipMetadata,
        registry: &RelationshipRegistry,
        targets: Vec<DocumentHandle<T>>,
    ) -> OdmResult<Self>
    where
        S: DocumentStore<T>,
    {
        let mut association = Self::new(parent, metadata, registry)?;
        tracing::debug!(
            "replacing relationship '{}' with {} documents",
            association.metadata.name,
            targets.len()
        );
        association.dereference_all(store)?;
        association.push(store, targets)?;
        Ok(association)
    }

    /// One-sided local append: stored id array and cache only
    ///
    /// Never touches the targets' own fields; this is the primitive that
    /// inverse propagation relies on being side-effect-free for the other
    /// side.
    fn append<S>(&mut self, store: &S, documents: &[DocumentHandle<T>]) -> OdmResult<()>
    where
        S: DocumentStore<T>,
    {
        self.load(store)?;

        for document in documents {
            let id = document.ensure_id();
            fields::push_id(&mut *self.parent.borrow_mut(), &self.metadata.key_field, id)?;
        }

        if let Some(targets) = self.targets.as_mut() {
            targets.extend(documents.iter().cloned());
        }

        Ok(())
    }

    /// Single propagation pass onto the targets' inverse fields
    fn propagate(&self, documents: &[DocumentHandle<T>]) -> OdmResult<()> {
        let Some(inverse) = &self.inverse else {
            return Ok(());
        };

        // The inverse side links back by id, so the parent needs one now
        let parent_id = self.parent.ensure_id();
        for document in documents {
            match inverse.kind {
                RelationshipKind::ManyAsArray => {
                    fields::push_id(&mut *document.borrow_mut(), &inverse.field, parent_id)?;
                }
                RelationshipKind::One => {
                    fields::set_reference(&mut *document.borrow_mut(), &inverse.field, Some(parent_id));
                }
            }
            tracing::trace!(
                "linked '{}' back to parent {} via '{}'",
                self.metadata.target_type,
                parent_id,
                inverse.field
            );
        }

        Ok(())
    }

    /// Scope for bulk removal: the currently referenced ids, conjoined with
    /// the caller's condition when given
    fn removal_scope(&self, condition: Option<Filter>) -> OdmResult<Filter> {
        let scope = Filter::IdIn(self.key_ids()?);
        Ok(match condition {
            Some(condition) => scope.and(condition),
            None => scope,
        })
    }
}

impl<'a, P, T> IntoIterator for &'a ReferencesMany<P, T>
where
    P: Document,
    T: Document,
{
    type Item = &'a DocumentHandle<T>;
    type IntoIter = std::slice::Iter<'a, DocumentHandle<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.get().iter()
    }
}

/// Order fetched documents by the id array
///
/// Duplicate ids resolve to the same handle at each position; ids with no
/// fetched match are skipped.
fn order_by_ids<T: Document>(
    fetched: Vec<DocumentHandle<T>>,
    ids: &[DocumentId],
) -> Vec<DocumentHandle<T>> {
    let mut by_id = HashMap::new();
    for handle in fetched {
        if let Some(id) = handle.id() {
            by_id.entry(id).or_insert(handle);
        }
    }
    ids.iter().filter_map(|id| by_id.get(id).cloned()).collect()
}
