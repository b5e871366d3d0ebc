//! Relationship Registry - per-type declaration storage and lookup

use std::collections::HashMap;

use crate::error::{OdmError, OdmResult};

use super::metadata::RelationshipMetadata;

/// Explicit registry of relationship declarations
///
/// Maps document type name to that type's declarations by relationship name.
/// Built once at type-registration time and passed by reference wherever
/// declarations need resolving; there is no ambient global instance.
#[derive(Debug, Clone, Default)]
pub struct RelationshipRegistry {
    relationships: HashMap<String, HashMap<String, RelationshipMetadata>>,
}

impl RelationshipRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            relationships: HashMap::new(),
        }
    }

    /// Register a relationship declared on a document type
    pub fn register(&mut self, type_name: &str, metadata: RelationshipMetadata) -> OdmResult<()> {
        metadata.validate()?;
        self.relationships
            .entry(type_name.to_string())
            .or_default()
            .insert(metadata.name.clone(), metadata);
        Ok(())
    }

    /// Get one declaration by type and relationship name
    pub fn get(&self, type_name: &str, relationship_name: &str) -> Option<&RelationshipMetadata> {
        self.relationships.get(type_name)?.get(relationship_name)
    }

    /// Get all declarations for a type
    pub fn all_for_type(&self, type_name: &str) -> Option<&HashMap<String, RelationshipMetadata>> {
        self.relationships.get(type_name)
    }

    /// Check if a relationship exists
    pub fn has_relationship(&self, type_name: &str, relationship_name: &str) -> bool {
        self.get(type_name, relationship_name).is_some()
    }

    /// Get all relationship names declared on a type
    pub fn relationship_names(&self, type_name: &str) -> Vec<String> {
        self.relationships
            .get(type_name)
            .map(|declarations| declarations.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Validate every declared `inverse_of` against its target type
    ///
    /// A declaration whose inverse is missing on the target type, or whose
    /// inverse does not point back at the declaring type, is a configuration
    /// error. Run once after all types are registered, so misdeclared
    /// inverses surface at startup instead of at mutation time.
    pub fn validate_inverses(&self) -> OdmResult<()> {
        for (type_name, declarations) in &self.relationships {
            for metadata in declarations.values() {
                let Some(inverse_name) = &metadata.inverse_of else {
                    continue;
                };
                let inverse = self.get(&metadata.target_type, inverse_name).ok_or_else(|| {
                    OdmError::Configuration(format!(
                        "relationship '{}' on '{}' declares inverse_of '{}', but '{}' has no such relationship",
                        metadata.name, type_name, inverse_name, metadata.target_type
                    ))
                })?;
                if inverse.target_type != *type_name {
                    return Err(OdmError::Configuration(format!(
                        "inverse '{}' of relationship '{}' on '{}' targets '{}', not '{}'",
                        inverse_name, metadata.name, type_name, inverse.target_type, type_name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::metadata::RelationshipKind;
    use super::*;

    fn many(name: &str, target: &str, field: &str) -> RelationshipMetadata {
        RelationshipMetadata::new(
            RelationshipKind::ManyAsArray,
            name.to_string(),
            target.to_string(),
            field.to_string(),
        )
    }

    fn one(name: &str, target: &str, field: &str) -> RelationshipMetadata {
        RelationshipMetadata::new(
            RelationshipKind::One,
            name.to_string(),
            target.to_string(),
            field.to_string(),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = RelationshipRegistry::new();
        let metadata = many("preferences", "Preference", "preference_ids");

        registry.register("Person", metadata.clone()).unwrap();
        assert!(registry.has_relationship("Person", "preferences"));
        assert_eq!(registry.get("Person", "preferences"), Some(&metadata));
    }

    #[test]
    fn test_missing_relationship() {
        let registry = RelationshipRegistry::new();
        assert!(!registry.has_relationship("Person", "preferences"));
        assert!(registry.get("Person", "preferences").is_none());
        assert!(registry.all_for_type("Person").is_none());
    }

    #[test]
    fn test_register_rejects_invalid_metadata() {
        let mut registry = RelationshipRegistry::new();
        let invalid = many("", "Preference", "preference_ids");
        assert!(registry.register("Person", invalid).is_err());
    }

    #[test]
    fn test_relationship_names() {
        let mut registry = RelationshipRegistry::new();
        registry
            .register("Person", many("preferences", "Preference", "preference_ids"))
            .unwrap();
        registry
            .register("Person", many("posts", "Post", "post_ids"))
            .unwrap();

        let mut names = registry.relationship_names("Person");
        names.sort();
        assert_eq!(names, vec!["posts", "preferences"]);
    }

    #[test]
    fn test_validate_inverses_accepts_reciprocal_pair() {
        let mut registry = RelationshipRegistry::new();
        registry
            .register(
                "Person",
                many("posts", "Post", "post_ids").with_inverse_of("person".to_string()),
            )
            .unwrap();
        registry
            .register(
                "Post",
                one("person", "Person", "person_id").with_inverse_of("posts".to_string()),
            )
            .unwrap();

        assert!(registry.validate_inverses().is_ok());
    }

    #[test]
    fn test_validate_inverses_rejects_dangling_inverse() {
        let mut registry = RelationshipRegistry::new();
        registry
            .register(
                "Person",
                many("posts", "Post", "post_ids").with_inverse_of("person".to_string()),
            )
            .unwrap();

        let err = registry.validate_inverses().unwrap_err();
        assert!(matches!(err, OdmError::Configuration(_)));
    }

    #[test]
    fn test_validate_inverses_rejects_non_reciprocal_inverse() {
        let mut registry = RelationshipRegistry::new();
        registry
            .register(
                "Person",
                many("posts", "Post", "post_ids").with_inverse_of("person".to_string()),
            )
            .unwrap();
        // Post.person points at Account, not back at Person
        registry
            .register(
                "Post",
                one("person", "Account", "person_id").with_inverse_of("posts".to_string()),
            )
            .unwrap();

        let err = registry.validate_inverses().unwrap_err();
        assert!(matches!(err, OdmError::Configuration(_)));
    }
}
