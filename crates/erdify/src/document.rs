//! The diagram document exchanged with storage.
//!
//! [`DiagramDocument`] is the flat JSON shape diagrams are saved in and loaded
//! from. It references entities by name; conversion to and from the id-keyed
//! [`Session`](crate::session::Session) happens in
//! [`Session::from_document`](crate::session::Session::from_document) and
//! [`Session::to_document`](crate::session::Session::to_document).
//!
//! # Example
//!
//! ```
//! use erdify::document::DiagramDocument;
//!
//! let json = r#"{
//!     "name": "school",
//!     "entities": [{ "name": "Student", "attributes": ["id"], "primary_key": "id" }],
//!     "relationships": []
//! }"#;
//!
//! let document = DiagramDocument::from_json(json).unwrap();
//! assert_eq!(document.entities[0].name, "Student");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use erdify_core::semantic::{Cardinality, LayoutHint};

/// Errors raised while reading or writing a diagram document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid diagram document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A complete diagram as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entities: Vec<EntityDocument>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDocument>,
}

/// One entity of a [`DiagramDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub primary_key: String,
}

/// One relationship of a [`DiagramDocument`].
///
/// `attributes` distinguishes a missing list (`None`) from an empty one, so a
/// load followed by a save writes back exactly what was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDocument {
    #[serde(default)]
    pub entity1: String,
    #[serde(default)]
    pub entity2: String,
    #[serde(default)]
    pub relation: String,
    #[serde(rename = "type", default)]
    pub cardinality: Cardinality,
    #[serde(default)]
    pub layout: LayoutHint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

impl DiagramDocument {
    /// Parses a document from JSON text.
    ///
    /// Missing `layout` fields default to `LR` and missing `type` fields to
    /// `one-to-many`. Layout codes are accepted in lower case as well.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{
            "name": "shop",
            "entities": [{ "name": "Order" }],
            "relationships": [{ "entity1": "Order", "entity2": "Item" }]
        }"#;

        let document = DiagramDocument::from_json(json).unwrap();
        let entity = &document.entities[0];
        assert!(entity.attributes.is_empty());
        assert_eq!(entity.primary_key, "");

        let rel = &document.relationships[0];
        assert_eq!(rel.cardinality, Cardinality::OneToMany);
        assert_eq!(rel.layout, LayoutHint::LeftToRight);
        assert_eq!(rel.attributes, None);
        assert_eq!(rel.relation, "");
    }

    #[test]
    fn test_lowercase_layout_is_accepted() {
        let json = r#"{ "relationships": [{ "entity1": "A", "entity2": "B", "layout": "tb" }] }"#;
        let document = DiagramDocument::from_json(json).unwrap();
        assert_eq!(document.relationships[0].layout, LayoutHint::TopToBottom);
    }

    #[test]
    fn test_absent_attributes_are_not_written() {
        let document = DiagramDocument {
            name: "d".to_string(),
            entities: Vec::new(),
            relationships: vec![RelationshipDocument::default()],
        };

        let json = document.to_json_pretty().unwrap();
        assert!(!json.contains("attributes"));
        assert!(json.contains("\"type\": \"one-to-many\""));
        assert!(json.contains("\"layout\": \"LR\""));
    }

    #[test]
    fn test_empty_attributes_are_written() {
        let rel = RelationshipDocument {
            attributes: Some(Vec::new()),
            ..RelationshipDocument::default()
        };
        let json = serde_json::to_string(&rel).unwrap();
        assert!(json.contains("\"attributes\":[]"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = DiagramDocument::from_json("{ \"name\": ").unwrap_err();
        assert!(err.to_string().starts_with("invalid diagram document"));
    }

    #[test]
    fn test_unknown_cardinality_is_an_error() {
        let json = r#"{ "relationships": [{ "type": "few-to-few" }] }"#;
        assert!(DiagramDocument::from_json(json).is_err());
    }
}
