//! Schema factory seams
//!
//! [`SchemaFactory`] is the capability every schema builder exposes, and the
//! seam decorators wrap. [`DistinctFormats`] is an optional extra capability
//! of factories that keep one schema variant per wire format; decorators
//! probe for it once at construction instead of assuming it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::schema::{Schema, SchemaUsage};

/// Kind of operation a schema is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    /// Operation on a single resource
    Item,
    /// Operation on a resource collection
    Collection,
}

/// Optional parameters of a [`SchemaFactory::build_schema`] call
///
/// Decorators pass the whole struct through to the wrapped factory
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct BuildParams {
    /// Operation kind the schema is built for
    pub operation_category: Option<OperationCategory>,
    /// Operation name, when one applies
    pub operation_name: Option<String>,
    /// Existing document to accumulate the new definitions into
    pub schema: Option<Schema>,
    /// Serializer context forwarded to the factory (e.g. serialization groups)
    pub serializer_context: Option<Map<String, Value>>,
    /// Force the root to describe a collection of the resource
    pub force_collection: bool,
}

/// A factory able to build the JSON Schema document of a resource class
pub trait SchemaFactory {
    /// Build the schema of `class_name` for a wire format and usage side
    fn build_schema(
        &self,
        class_name: &str,
        format: &str,
        usage: SchemaUsage,
        params: BuildParams,
    ) -> Result<Schema>;

    /// Get the distinct-format capability of this factory, when it has one
    ///
    /// Factories that cache one schema variant per format expose it here so
    /// decorators can claim their format at construction time. The default
    /// is no capability; such factories are used as-is.
    fn distinct_formats(&mut self) -> Option<&mut dyn DistinctFormats> {
        None
    }
}

/// Capability of factories that keep separate schema variants per format
pub trait DistinctFormats {
    /// Treat `format` as requiring its own schema variant instead of reusing
    /// the generic one
    fn add_distinct_format(&mut self, format: &str);
}
