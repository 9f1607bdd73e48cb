//! Meridian Schema Factories
//!
//! JSON Schema factories for the Meridian platform. Builds JSON Schema
//! documents for REST resources out of pre-built definition documents and
//! decorates them for the HAL (`jsonhal`) wire format.
//!
//! ## Features
//!
//! - **Document Model**: mutable JSON Schema documents with dialect-aware
//!   definition lookup (draft-07 and OpenAPI)
//! - **Factory Seam**: a small [`SchemaFactory`] trait any builder can
//!   implement, with an optional distinct-format capability
//! - **HAL Decoration**: `_links` on item definitions, the `_embedded` /
//!   `totalItems` / `itemsPerPage` envelope on collections
//! - **Document Store**: a factory serving definition documents loaded from
//!   a directory
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   └── HalSchemaFactory          (jsonhal: inject _links / envelope)
//!         └── DocumentSchemaFactory   (definitions from stored documents)
//!               └── schemas/
//!                   ├── Book.schema.json
//!                   └── Review.schema.json
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod factory;
pub mod hal;
pub mod schema;

pub use config::SchemaConfig;
pub use document::DocumentSchemaFactory;
pub use error::{Result, SchemaError};
pub use factory::{BuildParams, DistinctFormats, OperationCategory, SchemaFactory};
pub use hal::{HalSchemaFactory, HAL_FORMAT};
pub use schema::{Schema, SchemaUsage, SchemaVersion};
