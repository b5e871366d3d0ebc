//! Store filters
//!
//! Condition trees scoping store reads and bulk removals. Embedded stores
//! evaluate them in memory; external backends translate them into their own
//! query language instead.

use serde_json::Value;

use crate::document::{Document, DocumentId};

/// Condition tree for scoping store operations
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Matches documents whose identifier appears in the set
    IdIn(Vec<DocumentId>),
    /// Matches documents whose field equals the value
    Eq(String, Value),
    /// Matches documents satisfying every inner filter
    And(Vec<Filter>),
}

impl Filter {
    /// Equality condition on a named field
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Combine two filters conjunctively
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::All => other,
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Evaluate the filter against a document in memory
    pub fn matches<D: Document>(&self, document: &D) -> bool {
        match self {
            Filter::All => true,
            Filter::IdIn(ids) => document.id().map(|id| ids.contains(&id)).unwrap_or(false),
            Filter::Eq(field, value) => document.field(field).as_ref() == Some(value),
            Filter::And(filters) => filters.iter().all(|filter| filter.matches(document)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::error::OdmResult;

    use super::*;

    #[derive(Debug, Default)]
    struct Item {
        id: Option<DocumentId>,
        fields: HashMap<String, Value>,
    }

    impl Document for Item {
        fn type_name() -> &'static str {
            "Item"
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

    fn item(name: &str) -> Item {
        let mut item = Item::default();
        item.ensure_id();
        item.set_field("name", json!(name));
        item
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(Filter::All.matches(&item("anything")));
    }

    #[test]
    fn test_id_in_requires_an_assigned_id() {
        let listed = item("listed");
        let id = listed.id().unwrap();

        assert!(Filter::IdIn(vec![id]).matches(&listed));
        assert!(!Filter::IdIn(vec![DocumentId::new()]).matches(&listed));
        assert!(!Filter::IdIn(vec![id]).matches(&Item::default()));
    }

    #[test]
    fn test_eq_compares_field_values() {
        let vga = item("VGA");
        assert!(Filter::eq("name", json!("VGA")).matches(&vga));
        assert!(!Filter::eq("name", json!("HDMI")).matches(&vga));
        assert!(!Filter::eq("missing", json!("VGA")).matches(&vga));
    }

    #[test]
    fn test_and_requires_every_condition() {
        let vga = item("VGA");
        let id = vga.id().unwrap();

        let both = Filter::IdIn(vec![id]).and(Filter::eq("name", json!("VGA")));
        assert!(both.matches(&vga));

        let conflicting = Filter::IdIn(vec![id]).and(Filter::eq("name", json!("HDMI")));
        assert!(!conflicting.matches(&vga));
    }

    #[test]
    fn test_and_flattens_onto_existing_conjunction() {
        let filter = Filter::All
            .and(Filter::eq("a", json!(1)))
            .and(Filter::eq("b", json!(2)));

        assert_eq!(
            filter,
            Filter::And(vec![Filter::eq("a", json!(1)), Filter::eq("b", json!(2))])
        );
    }
}
