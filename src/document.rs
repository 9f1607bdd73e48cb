//! Document-backed schema factory
//!
//! [`DocumentSchemaFactory`] serves pre-built schema definition documents
//! (the structural schemas an upstream pipeline produced) and shapes them
//! into item or collection schemas. It looks definitions up and envelopes
//! them; it never generates them from class metadata.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};
use crate::factory::{BuildParams, DistinctFormats, OperationCategory, SchemaFactory};
use crate::schema::{Schema, SchemaUsage};

/// Schema factory backed by named definition documents
///
/// Documents are registered programmatically or loaded from a directory of
/// `*.schema.json` / `*.json` files. Formats registered through
/// [`DistinctFormats`] get their own definition entries (`Book.jsonhal`)
/// instead of reusing the generic ones.
pub struct DocumentSchemaFactory {
    documents: HashMap<String, Value>,
    distinct_formats: Vec<String>,
}

impl DocumentSchemaFactory {
    /// Create an empty factory with no documents registered
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            distinct_formats: Vec::new(),
        }
    }

    /// Load every definition document from a directory tree
    ///
    /// Files ending in `.json` become documents keyed by their stem, with a
    /// trailing `.schema` dropped (`Book.schema.json` registers `Book`).
    /// Manifest and README files are ignored; unreadable or non-JSON files
    /// are skipped with a warning.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut factory = Self::new();

        for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !filename.ends_with(".json") {
                continue;
            }
            if filename == "manifest.json" || filename.starts_with("README") {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable document");
                    continue;
                }
            };
            let definition: Value = match serde_json::from_str(&content) {
                Ok(definition) => definition,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping non-JSON document");
                    continue;
                }
            };

            let name = filename
                .trim_end_matches(".json")
                .trim_end_matches(".schema")
                .to_string();
            debug!(name = %name, path = %path.display(), "registered schema document");
            factory.documents.insert(name, definition);
        }

        Ok(factory)
    }

    /// Register one definition document under a name
    pub fn insert_document(&mut self, name: impl Into<String>, definition: Value) {
        self.documents.insert(name.into(), definition);
    }

    /// Get the number of registered documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Get the names of all registered documents, sorted
    pub fn document_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a registered document by name
    pub fn get_document(&self, name: &str) -> Option<&Value> {
        self.documents.get(name)
    }

    /// Resolve a class name to a document: exact name first, then the final
    /// `::` path segment
    fn resolve(&self, class_name: &str) -> Option<(&str, &Value)> {
        if let Some((name, definition)) = self.documents.get_key_value(class_name) {
            return Some((name.as_str(), definition));
        }
        let short = class_name.rsplit("::").next()?;
        self.documents
            .get_key_value(short)
            .map(|(name, definition)| (name.as_str(), definition))
    }

    /// Name the definition entry for this build
    ///
    /// The short name gets a `.{format}` suffix when the format is distinct
    /// (bare `json` never is), and a `-{groups joined by _}` suffix when the
    /// serializer context carries groups.
    fn definition_name(&self, name: &str, format: &str, params: &BuildParams) -> String {
        let mut definition_name = name.to_string();
        if format != "json" && self.distinct_formats.iter().any(|f| f == format) {
            definition_name.push('.');
            definition_name.push_str(format);
        }
        let groups = params
            .serializer_context
            .as_ref()
            .and_then(|context| context.get("groups"))
            .map(group_names)
            .unwrap_or_default();
        if !groups.is_empty() {
            definition_name.push('-');
            definition_name.push_str(&groups.join("_"));
        }
        definition_name
    }
}

impl Default for DocumentSchemaFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaFactory for DocumentSchemaFactory {
    fn build_schema(
        &self,
        class_name: &str,
        format: &str,
        _usage: SchemaUsage,
        params: BuildParams,
    ) -> Result<Schema> {
        let (name, definition) = self
            .resolve(class_name)
            .ok_or_else(|| SchemaError::UnknownResource(class_name.to_string()))?;
        let definition_name = self.definition_name(name, format, &params);

        let mut schema = params.schema.unwrap_or_default();
        let collection = params.force_collection
            || params.operation_category == Some(OperationCategory::Collection);

        // Shape the root only when the document does not describe anything
        // yet; accumulating a second class into an existing document keeps
        // the first root.
        if !schema.is_defined() {
            let reference = format!("{}{}", schema.version().ref_prefix(), definition_name);
            if collection {
                schema.insert("type", json!("array"));
                schema.insert("items", json!({ "$ref": reference }));
            } else {
                schema.insert("$ref", json!(reference));
            }
        }

        let already_defined = schema
            .definitions()
            .map_or(false, |definitions| definitions.contains_key(&definition_name));
        if !already_defined {
            schema
                .definitions_mut()
                .insert(definition_name.clone(), definition.clone());
        }

        debug!(
            class = class_name,
            definition = %definition_name,
            collection,
            "built schema from stored document"
        );
        Ok(schema)
    }

    fn distinct_formats(&mut self) -> Option<&mut dyn DistinctFormats> {
        Some(self)
    }
}

impl DistinctFormats for DocumentSchemaFactory {
    fn add_distinct_format(&mut self, format: &str) {
        if !self.distinct_formats.iter().any(|f| f == format) {
            self.distinct_formats.push(format.to_string());
        }
    }
}

/// Read group names out of a serializer context `groups` entry, accepting a
/// single string or an array of strings
fn group_names(groups: &Value) -> Vec<String> {
    match groups {
        Value::String(group) => vec![group.clone()],
        Value::Array(groups) => groups
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
