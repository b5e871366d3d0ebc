//! Relationship Metadata - per-type declarations for referenced relationships

use serde::{Deserialize, Serialize};

use crate::error::{OdmError, OdmResult};

/// Storage shape of a declared relationship field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// The field stores an ordered array of target identifiers
    ManyAsArray,
    /// The field stores a single target identifier
    One,
}

impl RelationshipKind {
    /// Returns true if this relationship resolves to a collection
    pub fn is_collection(self) -> bool {
        matches!(self, Self::ManyAsArray)
    }
}

/// Declaration of one relationship on a document type
///
/// Declarations are configuration: built explicitly at type-registration
/// time, validated, and looked up through the relationship registry. One
/// declaration describes one side; a bidirectional relationship is two
/// declarations naming each other via `inverse_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// Storage shape of the key field
    pub kind: RelationshipKind,

    /// Name of the relationship (the accessor name on the declaring type)
    pub name: String,

    /// Type name of the documents the relationship points at
    pub target_type: String,

    /// Field on the declaring side holding the target identifier(s)
    pub key_field: String,

    /// Name of the counterpart relationship on the target type, when the
    /// relationship is bidirectional
    pub inverse_of: Option<String>,
}

impl RelationshipMetadata {
    /// Create a new relationship declaration
    pub fn new(kind: RelationshipKind, name: String, target_type: String, key_field: String) -> Self {
        Self {
            kind,
            name,
            target_type,
            key_field,
            inverse_of: None,
        }
    }

    /// Name the counterpart relationship on the target type
    pub fn with_inverse_of(mut self, inverse_of: String) -> Self {
        self.inverse_of = Some(inverse_of);
        self
    }

    /// Validate the declaration for internal consistency
    pub fn validate(&self) -> OdmResult<()> {
        if self.name.is_empty() {
            return Err(OdmError::Configuration(
                "relationship name cannot be empty".to_string(),
            ));
        }

        if self.target_type.is_empty() {
            return Err(OdmError::Configuration(format!(
                "relationship '{}' must name a target type",
                self.name
            )));
        }

        if self.key_field.is_empty() {
            return Err(OdmError::Configuration(format!(
                "relationship '{}' must name a key field",
                self.name
            )));
        }

        Ok(())
    }
}
