//! JSON Schema document representation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Draft-07 marker seeded into new JSON Schema documents
const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Dialect conventions a schema document follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// Draft-07 JSON Schema (definitions under `definitions`)
    #[default]
    JsonSchema,
    /// OpenAPI 3 component schemas (definitions under `schemas`)
    OpenApi,
}

impl SchemaVersion {
    /// Get the top-level member holding named definitions for this dialect
    pub fn definitions_key(&self) -> &'static str {
        match self {
            SchemaVersion::JsonSchema => "definitions",
            SchemaVersion::OpenApi => "schemas",
        }
    }

    /// Get the `$ref` prefix pointing into the definitions member
    pub fn ref_prefix(&self) -> &'static str {
        match self {
            SchemaVersion::JsonSchema => "#/definitions/",
            SchemaVersion::OpenApi => "#/components/schemas/",
        }
    }
}

/// Whether a schema describes the input or the output representation of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaUsage {
    /// Schema of the payload a client sends
    Input,
    /// Schema of the payload the server returns
    #[default]
    Output,
}

/// A mutable JSON Schema document
///
/// Holds the top-level members of one document plus the dialect that decides
/// where named definitions live and how `$ref`s into them are spelled. A
/// document is either keyed by a root or items definition (`$ref` /
/// `items.$ref` into the definitions member) or it describes a collection
/// directly with `type: "array"` and inline `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    version: SchemaVersion,
    document: Map<String, Value>,
}

impl Schema {
    /// Create an empty document for the given dialect
    ///
    /// Draft-07 documents are seeded with their `$schema` marker.
    pub fn new(version: SchemaVersion) -> Self {
        let mut document = Map::new();
        if version == SchemaVersion::JsonSchema {
            document.insert("$schema".to_string(), Value::String(DRAFT_07.to_string()));
        }
        Self { version, document }
    }

    /// Wrap an existing JSON document
    ///
    /// The value must be a JSON object; anything else is not a schema
    /// document.
    pub fn from_value(version: SchemaVersion, value: Value) -> Result<Self> {
        match value {
            Value::Object(document) => Ok(Self { version, document }),
            _ => Err(SchemaError::InvalidDocument(
                "document root must be a JSON object".to_string(),
            )),
        }
    }

    /// Get the dialect of this document
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Get the definition name the top-level `$ref` points at
    ///
    /// Returns `None` when there is no `$ref` or it does not use this
    /// dialect's definitions prefix.
    pub fn root_definition_key(&self) -> Option<&str> {
        self.strip_ref_prefix(self.document.get("$ref")?)
    }

    /// Get the definition name `items.$ref` points at
    ///
    /// Used when the document itself is an array of referenced items.
    pub fn items_definition_key(&self) -> Option<&str> {
        self.strip_ref_prefix(self.document.get("items")?.get("$ref")?)
    }

    /// Get the named definitions of this document, if any exist yet
    pub fn definitions(&self) -> Option<&Map<String, Value>> {
        self.document.get(self.version.definitions_key())?.as_object()
    }

    /// Get the named definitions, creating the empty object on first access
    pub fn definitions_mut(&mut self) -> &mut Map<String, Value> {
        let slot = self
            .document
            .entry(self.version.definitions_key().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    /// Check whether the document already describes something
    ///
    /// True once a top-level `$ref` or `type` is present.
    pub fn is_defined(&self) -> bool {
        self.document.contains_key("$ref") || self.document.contains_key("type")
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Set a top-level field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.document.insert(key.into(), value)
    }

    /// Remove a top-level field, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.document.remove(key)
    }

    /// Check whether a top-level field is present
    pub fn contains(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    /// Get the document as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.document.clone())
    }

    /// Consume the schema, returning the document as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }

    fn strip_ref_prefix<'a>(&self, reference: &'a Value) -> Option<&'a str> {
        reference.as_str()?.strip_prefix(self.version.ref_prefix())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(SchemaVersion::JsonSchema)
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.document.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_json_schema_is_seeded_with_draft() {
        let schema = Schema::new(SchemaVersion::JsonSchema);
        assert_eq!(
            schema.get("$schema").and_then(Value::as_str),
            Some(DRAFT_07)
        );
    }

    #[test]
    fn test_new_openapi_schema_is_empty() {
        let schema = Schema::new(SchemaVersion::OpenApi);
        assert!(!schema.contains("$schema"));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let result = Schema::from_value(SchemaVersion::JsonSchema, json!(["not", "a", "schema"]));
        assert!(matches!(result, Err(SchemaError::InvalidDocument(_))));
    }

    #[test]
    fn test_root_definition_key() {
        let schema = Schema::from_value(
            SchemaVersion::JsonSchema,
            json!({ "$ref": "#/definitions/Book" }),
        )
        .unwrap();
        assert_eq!(schema.root_definition_key(), Some("Book"));
    }

    #[test]
    fn test_root_definition_key_prefix_mismatch() {
        let schema = Schema::from_value(
            SchemaVersion::OpenApi,
            json!({ "$ref": "#/definitions/Book" }),
        )
        .unwrap();
        assert_eq!(schema.root_definition_key(), None);
    }

    #[test]
    fn test_items_definition_key() {
        let schema = Schema::from_value(
            SchemaVersion::JsonSchema,
            json!({
                "type": "array",
                "items": { "$ref": "#/definitions/Book" }
            }),
        )
        .unwrap();
        assert_eq!(schema.items_definition_key(), Some("Book"));
        assert_eq!(schema.root_definition_key(), None);
    }

    #[test]
    fn test_openapi_ref_prefix() {
        let schema = Schema::from_value(
            SchemaVersion::OpenApi,
            json!({ "$ref": "#/components/schemas/Book" }),
        )
        .unwrap();
        assert_eq!(schema.root_definition_key(), Some("Book"));
    }

    #[test]
    fn test_definitions_mut_creates_empty_object() {
        let mut schema = Schema::new(SchemaVersion::JsonSchema);
        assert!(schema.definitions().is_none());

        schema
            .definitions_mut()
            .insert("Book".to_string(), json!({ "type": "object" }));
        assert!(schema.definitions().unwrap().contains_key("Book"));
        assert!(schema.contains("definitions"));
    }

    #[test]
    fn test_definitions_live_under_the_dialect_key() {
        let mut schema = Schema::new(SchemaVersion::OpenApi);
        schema
            .definitions_mut()
            .insert("Book".to_string(), json!({ "type": "object" }));
        assert!(schema.contains("schemas"));
        assert!(!schema.contains("definitions"));
    }

    #[test]
    fn test_is_defined() {
        let mut schema = Schema::new(SchemaVersion::JsonSchema);
        assert!(!schema.is_defined());

        schema.insert("type", json!("array"));
        assert!(schema.is_defined());
    }

    #[test]
    fn test_serialize_emits_document_only() {
        let mut schema = Schema::new(SchemaVersion::JsonSchema);
        schema.insert("$ref", json!("#/definitions/Book"));

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "$schema": DRAFT_07,
                "$ref": "#/definitions/Book"
            })
        );
    }
}
