//! Error types for the ODM core
//!
//! Provides error handling for relationship configuration, store access,
//! document instantiation, and stored field decoding.

use thiserror::Error;

/// Result type alias for ODM operations
pub type OdmResult<T> = Result<T, OdmError>;

/// Error types for ODM operations
#[derive(Debug, Error)]
pub enum OdmError {
    /// Invalid relationship declaration or association setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure from the backing document store
    #[error("Store error: {0}")]
    Store(String),

    /// Failure instantiating a document from attributes
    #[error("Instantiation error: {0}")]
    Instantiation(String),

    /// A stored field value does not decode to what the relationship expects
    #[error("Field error: {0}")]
    Field(String),
}

// Store implementations bubble their own error types through the trait
impl From<anyhow::Error> for OdmError {
    fn from(err: anyhow::Error) -> Self {
        OdmError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for OdmError {
    fn from(err: serde_json::Error) -> Self {
        OdmError::Field(err.to_string())
    }
}
