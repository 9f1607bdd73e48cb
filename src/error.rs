//! Error types for schema building

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema building errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
