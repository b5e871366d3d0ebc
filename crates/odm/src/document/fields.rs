//! Field-level linkage primitives
//!
//! One-sided mutations of the stored linkage fields. Each function touches
//! exactly one document, so inverse propagation built on top of them cannot
//! re-enter the association that triggered it.

use serde_json::Value;

use crate::error::{OdmError, OdmResult};

use super::core_trait::Document;
use super::id::DocumentId;

/// Decode an id-array field. Missing and null fields decode as empty.
pub fn id_array<D: Document>(document: &D, field: &str) -> OdmResult<Vec<DocumentId>> {
    match document.field(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => values.iter().map(DocumentId::from_value).collect(),
        Some(other) => Err(OdmError::Field(format!(
            "field '{}' holds {} where an id array was expected",
            field, other
        ))),
    }
}

/// Append one identifier to an id-array field, preserving existing order.
/// Duplicates are kept; append mirrors a raw array push.
pub fn push_id<D: Document>(document: &mut D, field: &str, id: DocumentId) -> OdmResult<()> {
    let mut ids = id_array(document, field)?;
    ids.push(id);
    write_id_array(document, field, &ids);
    Ok(())
}

/// Remove every occurrence of one identifier from an id-array field,
/// preserving the order of the remaining entries.
pub fn remove_id<D: Document>(document: &mut D, field: &str, id: DocumentId) -> OdmResult<()> {
    let mut ids = id_array(document, field)?;
    ids.retain(|existing| *existing != id);
    write_id_array(document, field, &ids);
    Ok(())
}

/// Overwrite an id-array field wholesale
pub fn write_id_array<D: Document>(document: &mut D, field: &str, ids: &[DocumentId]) {
    let values: Vec<Value> = ids.iter().map(DocumentId::to_value).collect();
    document.set_field(field, Value::Array(values));
}

/// Decode a single-reference field. Missing and null decode as unset.
pub fn reference<D: Document>(document: &D, field: &str) -> OdmResult<Option<DocumentId>> {
    match document.field(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => DocumentId::from_value(&value).map(Some),
    }
}

/// Set or clear a single-reference field. `None` writes an explicit null.
pub fn set_reference<D: Document>(document: &mut D, field: &str, id: Option<DocumentId>) {
    let value = match id {
        Some(id) => id.to_value(),
        None => Value::Null,
    };
    document.set_field(field, value);
}
