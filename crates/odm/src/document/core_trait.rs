//! Core Document Trait - Base definition for store-backed documents
//!
//! Defines the fundamental Document trait with type metadata, identifier
//! handling, the named-field contract, and the instantiation and teardown
//! seams consumed by associations and stores.

use std::collections::HashMap;
use std::fmt::Debug;

use serde_json::Value;

use crate::error::OdmResult;

use super::id::DocumentId;

/// Core trait for documents held in the in-memory graph
pub trait Document: Debug {
    /// Type-level name, used as the key into the relationship registry
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Get the identifier for this document, if one has been assigned
    fn id(&self) -> Option<DocumentId>;

    /// Set the identifier for this document
    fn set_id(&mut self, id: DocumentId);

    /// Return the identifier, assigning a fresh one if absent
    ///
    /// Associations call this before inverse propagation, since the inverse
    /// side needs the identifier to link back.
    fn ensure_id(&mut self) -> DocumentId {
        match self.id() {
            Some(id) => id,
            None => {
                let id = DocumentId::new();
                self.set_id(id);
                id
            }
        }
    }

    /// Read a named field as its stored value
    fn field(&self, name: &str) -> Option<Value>;

    /// Write a named field
    fn set_field(&mut self, name: &str, value: Value);

    /// Instantiate a new, not-yet-persisted document from an attribute
    /// mapping. The result carries no identifier until `ensure_id` runs.
    fn from_attributes(attributes: &HashMap<String, Value>) -> OdmResult<Self>
    where
        Self: Sized;

    /// Teardown hook run per document by `destroy_all` implementations
    fn before_destroy(&mut self) -> OdmResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Note {
        id: Option<DocumentId>,
        fields: HashMap<String, Value>,
    }

    impl Document for Note {
        fn type_name() -> &'static str {
            "Note"
        }

        fn id(&self) -> Option<DocumentId> {
            self.id
        }

        fn set_id(&mut self, id: DocumentId) {
            self.id = Some(id);
        }

        fn field(&self, name: &str) -> Option<Value> {
            self.fields.get(name).cloned()
        }

        fn set_field(&mut self, name: &str, value: Value) {
            self.fields.insert(name.to_string(), value);
        }

        fn from_attributes(attributes: &HashMap<String, Value>) -> OdmResult<Self> {
            Ok(Self {
                id: None,
                fields: attributes.clone(),
            })
        }
    }

    #[test]
    fn test_ensure_id_assigns_once() {
        let mut note = Note::default();
        assert!(note.id().is_none());

        let assigned = note.ensure_id();
        assert_eq!(note.id(), Some(assigned));

        // A second call returns the same identifier
        assert_eq!(note.ensure_id(), assigned);
    }

    #[test]
    fn test_from_attributes_has_no_id() {
        let mut attributes = HashMap::new();
        attributes.insert("body".to_string(), Value::String("hello".to_string()));

        let note = Note::from_attributes(&attributes).unwrap();
        assert!(note.id().is_none());
        assert_eq!(note.field("body"), Some(Value::String("hello".to_string())));
    }
}
