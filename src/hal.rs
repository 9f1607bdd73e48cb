//! HAL decoration of built schemas
//!
//! [`HalSchemaFactory`] wraps any [`SchemaFactory`] and augments the
//! documents it builds for the `jsonhal` format: item definitions gain a
//! default `_links` property, and bare array schemas are rewritten into the
//! HAL collection envelope (`_embedded`, `totalItems`, `itemsPerPage`,
//! `_links`). Every other format passes through untouched.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::factory::{BuildParams, SchemaFactory};
use crate::schema::{Schema, SchemaUsage};

/// The wire format this decorator acts on
pub const HAL_FORMAT: &str = "jsonhal";

/// Decorator adding HAL properties to schemas built by the wrapped factory
pub struct HalSchemaFactory {
    inner: Box<dyn SchemaFactory>,
}

impl HalSchemaFactory {
    /// Wrap a factory
    ///
    /// When the factory keeps distinct per-format schema variants, `jsonhal`
    /// is claimed with it here, once. Factories without the capability are
    /// used as-is.
    pub fn new(mut inner: Box<dyn SchemaFactory>) -> Self {
        if let Some(formats) = inner.distinct_formats() {
            formats.add_distinct_format(HAL_FORMAT);
        }
        Self { inner }
    }
}

impl SchemaFactory for HalSchemaFactory {
    fn build_schema(
        &self,
        class_name: &str,
        format: &str,
        usage: SchemaUsage,
        params: BuildParams,
    ) -> Result<Schema> {
        let mut schema = self.inner.build_schema(class_name, format, usage, params)?;
        if format != HAL_FORMAT {
            return Ok(schema);
        }

        if let Some(key) = schema.root_definition_key().map(str::to_owned) {
            decorate_definition(&mut schema, &key);
            debug!(class = class_name, definition = %key, "added HAL link properties");
            return Ok(schema);
        }
        if let Some(key) = schema.items_definition_key().map(str::to_owned) {
            decorate_definition(&mut schema, &key);
        }

        if schema.get("type").and_then(Value::as_str) == Some("array") {
            wrap_collection(&mut schema);
            debug!(class = class_name, "wrapped array schema in HAL collection envelope");
        }

        Ok(schema)
    }
}

/// Merge the HAL base properties into the named definition, keeping any
/// property the definition already declares
fn decorate_definition(schema: &mut Schema, key: &str) {
    let Some(definition) = schema.definitions_mut().get_mut(key) else {
        return;
    };
    let Some(definition) = definition.as_object_mut() else {
        return;
    };

    let properties = definition
        .entry("properties".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(properties) = properties.as_object_mut() else {
        return;
    };
    for (name, descriptor) in base_properties() {
        properties.entry(name).or_insert(descriptor);
    }
}

/// Rewrite a bare `type: "array"` document into the HAL collection envelope
///
/// Single-application: the captured `items` become `_embedded.items`, and
/// the result is an object schema a second pass will leave alone.
fn wrap_collection(schema: &mut Schema) {
    let items = schema.remove("items").unwrap_or(Value::Bool(true));

    schema.insert("type", json!("object"));
    schema.insert(
        "properties",
        json!({
            "_embedded": {
                "type": "array",
                "items": items,
            },
            "totalItems": {
                "type": "integer",
                "minimum": 0,
            },
            "itemsPerPage": {
                "type": "integer",
                "minimum": 0,
            },
            "_links": {
                "type": "object",
                "properties": {
                    "self": link_descriptor(),
                    "first": link_descriptor(),
                    "last": link_descriptor(),
                    "next": link_descriptor(),
                    "previous": link_descriptor(),
                },
            },
        }),
    );
    schema.insert("required", json!(["_links", "_embedded"]));
}

/// Properties injected into item definitions: the `_links.self` default
fn base_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "_links".to_string(),
        json!({
            "type": "object",
            "properties": {
                "self": link_descriptor(),
            },
        }),
    );
    properties
}

/// Descriptor of one HAL link relation: an object holding an IRI `href`
fn link_descriptor() -> Value {
    json!({
        "type": "object",
        "properties": {
            "href": {
                "type": "string",
                "format": "iri-reference",
            },
        },
    })
}
