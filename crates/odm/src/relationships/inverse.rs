//! Inverse Resolution - counterpart declarations on the target type

use crate::error::{OdmError, OdmResult};

use super::metadata::{RelationshipKind, RelationshipMetadata};
use super::registry::RelationshipRegistry;

/// Counterpart relationship resolved on the target type
///
/// A closed variant of what propagation needs to know: which shape the
/// target's linkage field has and what it is called. Resolved once per
/// association; propagation switches on `kind` with no further lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInverse {
    /// Storage shape of the inverse field on the target
    pub kind: RelationshipKind,

    /// Field on the target holding the link back at the parent
    pub field: String,
}

/// Resolves `inverse_of` declarations against the relationship registry
#[derive(Debug, Clone, Copy)]
pub struct InverseResolver<'a> {
    registry: &'a RelationshipRegistry,
}

impl<'a> InverseResolver<'a> {
    /// Create a resolver over a registry
    pub fn new(registry: &'a RelationshipRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the counterpart declaration for a relationship
    ///
    /// Returns `Ok(None)` when the relationship declares no inverse, in
    /// which case propagation is skipped entirely. A declared `inverse_of`
    /// that the target type does not carry is a configuration error.
    pub fn resolve(&self, metadata: &RelationshipMetadata) -> OdmResult<Option<ResolvedInverse>> {
        let Some(inverse_name) = &metadata.inverse_of else {
            return Ok(None);
        };

        let inverse = self
            .registry
            .get(&metadata.target_type, inverse_name)
            .ok_or_else(|| {
                OdmError::Configuration(format!(
                    "inverse_of '{}' does not exist on '{}' (declared by relationship '{}')",
                    inverse_name, metadata.target_type, metadata.name
                ))
            })?;

        Ok(Some(ResolvedInverse {
            kind: inverse.kind,
            field: inverse.key_field.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(kind: RelationshipKind, name: &str, target: &str, field: &str) -> RelationshipMetadata {
        RelationshipMetadata::new(kind, name.to_string(), target.to_string(), field.to_string())
    }

    #[test]
    fn test_no_inverse_declared() {
        let registry = RelationshipRegistry::new();
        let metadata = declaration(
            RelationshipKind::ManyAsArray,
            "preferences",
            "Preference",
            "preference_ids",
        );

        let resolved = InverseResolver::new(&registry).resolve(&metadata).unwrap();
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_resolves_kind_and_field() {
        let mut registry = RelationshipRegistry::new();
        registry
            .register(
                "Post",
                declaration(RelationshipKind::One, "person", "Person", "person_id"),
            )
            .unwrap();

        let metadata = declaration(RelationshipKind::ManyAsArray, "posts", "Post", "post_ids")
            .with_inverse_of("person".to_string());

        let resolved = InverseResolver::new(&registry)
            .resolve(&metadata)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind, RelationshipKind::One);
        assert_eq!(resolved.field, "person_id");
    }

    #[test]
    fn test_dangling_inverse_is_a_configuration_error() {
        let registry = RelationshipRegistry::new();
        let metadata = declaration(RelationshipKind::ManyAsArray, "posts", "Post", "post_ids")
            .with_inverse_of("person".to_string());

        let err = InverseResolver::new(&registry).resolve(&metadata).unwrap_err();
        assert!(matches!(err, OdmError::Configuration(_)));
    }
}
