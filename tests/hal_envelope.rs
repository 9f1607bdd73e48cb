//! HAL Envelope Tests
//!
//! End-to-end coverage of the HAL decoration pipeline: pass-through for
//! non-HAL formats, `_links` injection on item definitions, the collection
//! envelope, and validation of sample HAL payloads against the produced
//! schemas.

use std::path::{Path, PathBuf};

use jsonschema::{Draft, JSONSchema};
use meridian_schemas::{
    BuildParams, DocumentSchemaFactory, HalSchemaFactory, OperationCategory, Result, Schema,
    SchemaFactory, SchemaUsage, SchemaVersion,
};
use serde_json::{json, Value};

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn hal_factory() -> HalSchemaFactory {
    let documents = DocumentSchemaFactory::from_directory(fixtures_path()).unwrap();
    HalSchemaFactory::new(Box::new(documents))
}

fn item_params() -> BuildParams {
    BuildParams {
        operation_category: Some(OperationCategory::Item),
        ..BuildParams::default()
    }
}

fn collection_params() -> BuildParams {
    BuildParams {
        operation_category: Some(OperationCategory::Collection),
        ..BuildParams::default()
    }
}

// =============================================================================
// Document Loading
// =============================================================================

#[test]
fn test_fixture_directory_loads() {
    let documents = DocumentSchemaFactory::from_directory(fixtures_path()).unwrap();
    assert_eq!(documents.document_names(), vec!["Book", "Catalog", "Review"]);
}

// =============================================================================
// Pass-Through
// =============================================================================

#[test]
fn test_non_hal_formats_pass_through() {
    let decorated = hal_factory()
        .build_schema("Book", "json", SchemaUsage::Output, item_params())
        .unwrap();

    let plain = DocumentSchemaFactory::from_directory(fixtures_path())
        .unwrap()
        .build_schema("Book", "json", SchemaUsage::Output, item_params())
        .unwrap();

    assert_eq!(decorated, plain);
}

#[test]
fn test_decorator_claims_a_distinct_hal_variant() {
    let factory = hal_factory();

    let hal = factory
        .build_schema("Book", "jsonhal", SchemaUsage::Output, item_params())
        .unwrap();
    let generic = factory
        .build_schema("Book", "json", SchemaUsage::Output, item_params())
        .unwrap();

    assert_eq!(hal.root_definition_key(), Some("Book.jsonhal"));
    assert_eq!(generic.root_definition_key(), Some("Book"));
}

// =============================================================================
// Item Decoration
// =============================================================================

#[test]
fn test_item_definition_gains_links() {
    let schema = hal_factory()
        .build_schema("Book", "jsonhal", SchemaUsage::Output, item_params())
        .unwrap();

    assert_eq!(schema.root_definition_key(), Some("Book.jsonhal"));
    let definition = &schema.definitions().unwrap()["Book.jsonhal"];
    assert_eq!(
        definition["properties"]["_links"]["properties"]["self"]["properties"]["href"],
        json!({ "type": "string", "format": "iri-reference" })
    );
    // Structural properties survive decoration.
    assert_eq!(definition["properties"]["title"], json!({ "type": "string" }));
    assert_eq!(definition["required"], json!(["title", "author"]));
}

#[test]
fn test_hand_authored_links_survive() {
    let schema = hal_factory()
        .build_schema("Catalog", "jsonhal", SchemaUsage::Output, item_params())
        .unwrap();

    let links = &schema.definitions().unwrap()["Catalog.jsonhal"]["properties"]["_links"];
    assert!(
        links["properties"]["sections"].is_object(),
        "hand-authored _links was replaced by the injected default"
    );
    assert_eq!(
        links["properties"]["self"]["properties"]["href"],
        json!({ "type": "string" })
    );
}

// =============================================================================
// Collection Envelope
// =============================================================================

#[test]
fn test_collection_envelope_shape() {
    let schema = hal_factory()
        .build_schema("Book", "jsonhal", SchemaUsage::Output, collection_params())
        .unwrap();

    let value = schema.to_value();
    assert_eq!(value["type"], json!("object"));
    assert!(value.get("items").is_none());
    assert_eq!(value["required"], json!(["_links", "_embedded"]));
    assert_eq!(
        value["properties"]["_embedded"],
        json!({ "type": "array", "items": { "$ref": "#/definitions/Book.jsonhal" } })
    );
    assert_eq!(
        value["properties"]["totalItems"],
        json!({ "type": "integer", "minimum": 0 })
    );
    assert_eq!(
        value["properties"]["itemsPerPage"],
        json!({ "type": "integer", "minimum": 0 })
    );

    let links = value["properties"]["_links"]["properties"].as_object().unwrap();
    assert_eq!(links.len(), 5);
    for relation in ["self", "first", "last", "next", "previous"] {
        assert_eq!(
            links[relation]["properties"]["href"],
            json!({ "type": "string", "format": "iri-reference" }),
            "missing or malformed relation {relation}"
        );
    }

    // The embedded item definition carries the _links default too.
    let definition = &schema.definitions().unwrap()["Book.jsonhal"];
    assert!(definition["properties"]["_links"].is_object());
}

/// The envelope transform is single-application: feeding an already wrapped
/// collection document through the decorator again leaves it alone (its type
/// is "object" by then) instead of wrapping twice.
#[test]
fn test_envelope_is_applied_once() {
    let wrapped = hal_factory()
        .build_schema("Book", "jsonhal", SchemaUsage::Output, collection_params())
        .unwrap();

    struct Replay {
        document: Value,
    }

    impl SchemaFactory for Replay {
        fn build_schema(
            &self,
            _class_name: &str,
            _format: &str,
            _usage: SchemaUsage,
            _params: BuildParams,
        ) -> Result<Schema> {
            Schema::from_value(SchemaVersion::JsonSchema, self.document.clone())
        }
    }

    let replayed = HalSchemaFactory::new(Box::new(Replay {
        document: wrapped.to_value(),
    }))
    .build_schema("Book", "jsonhal", SchemaUsage::Output, collection_params())
    .unwrap();

    assert_eq!(replayed, wrapped);
}

// =============================================================================
// Produced Schemas Validate Real HAL Payloads
// =============================================================================

#[test]
fn test_item_schema_accepts_a_hal_item() {
    let value = hal_factory()
        .build_schema("Book", "jsonhal", SchemaUsage::Output, item_params())
        .unwrap()
        .into_value();

    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&value)
        .expect("produced schema must compile");

    let payload = json!({
        "title": "A Wizard of Earthsea",
        "author": "Ursula K. Le Guin",
        "_links": { "self": { "href": "/books/1" } }
    });
    assert!(compiled.is_valid(&payload));

    let missing_author = json!({
        "title": "A Wizard of Earthsea",
        "_links": { "self": { "href": "/books/1" } }
    });
    assert!(!compiled.is_valid(&missing_author));
}

#[test]
fn test_collection_schema_accepts_a_hal_payload() {
    let value = hal_factory()
        .build_schema("Book", "jsonhal", SchemaUsage::Output, collection_params())
        .unwrap()
        .into_value();

    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&value)
        .expect("produced schema must compile");

    let payload = json!({
        "_links": {
            "self": { "href": "/books?page=1" },
            "next": { "href": "/books?page=2" }
        },
        "_embedded": [
            { "title": "The Left Hand of Darkness", "author": "Ursula K. Le Guin" }
        ],
        "totalItems": 42,
        "itemsPerPage": 30
    });
    assert!(compiled.is_valid(&payload));

    let negative_counter = json!({
        "_links": { "self": { "href": "/books" } },
        "_embedded": [],
        "totalItems": -1
    });
    assert!(!compiled.is_valid(&negative_counter));

    let missing_embedded = json!({
        "_links": { "self": { "href": "/books" } }
    });
    assert!(!compiled.is_valid(&missing_embedded));
}
