//! Document identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{OdmError, OdmResult};

/// Unique identifier for a document, backed by a v4 UUID
///
/// Identifiers live inside ordinary document fields (the parent's id array,
/// the target's inverse reference) in their canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Encode as a stored field value
    pub fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }

    /// Decode from a stored field value
    pub fn from_value(value: &Value) -> OdmResult<Self> {
        match value {
            Value::String(s) => s.parse(),
            other => Err(OdmError::Field(format!(
                "expected string identifier, found {}",
                other
            ))),
        }
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocumentId {
    type Err = OdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| OdmError::Field(format!("malformed document id '{}': {}", s, e)))
    }
}

impl From<Uuid> for DocumentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let id = DocumentId::new();
        let parsed: DocumentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_value_roundtrip() {
        let id = DocumentId::new();
        assert_eq!(DocumentId::from_value(&id.to_value()).unwrap(), id);
    }

    #[test]
    fn test_from_value_rejects_non_string() {
        let err = DocumentId::from_value(&Value::from(42)).unwrap_err();
        assert!(matches!(err, OdmError::Field(_)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = "not-a-uuid".parse::<DocumentId>().unwrap_err();
        assert!(matches!(err, OdmError::Field(_)));
    }
}
