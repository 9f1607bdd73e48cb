//! Configuration management for the schema tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schemas.toml)
//! - Environment variables (SCHEMAS_*)
//!
//! ## Example config file (schemas.toml):
//! ```toml
//! [documents]
//! path = "./schemas"
//!
//! [export]
//! output_format = "pretty"
//! check = false
//!
//! [build]
//! default_format = "jsonhal"
//! default_usage = "output"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::hal::HAL_FORMAT;
use crate::schema::SchemaUsage;

/// Main configuration for the schema tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Document store settings
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory holding schema definition documents
    #[serde(default = "default_documents_path")]
    pub path: PathBuf,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (pretty or compact)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Compile exported schemas as draft-07 after building
    #[serde(default)]
    pub check: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Wire format to build schemas for when none is given
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Usage side to build schemas for when none is given
    #[serde(default)]
    pub default_usage: SchemaUsage,
}

// Default value functions
fn default_documents_path() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

fn default_format() -> String {
    HAL_FORMAT.to_string()
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            path: default_documents_path(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pretty,
            check: false,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            default_usage: SchemaUsage::Output,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            documents: DocumentsConfig::default(),
            export: ExportConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "schemas.toml",
            ".schemas.toml",
            "config/schemas.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "meridian", "schemas") {
            let xdg_config = config_dir.config_dir().join("schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (SCHEMAS_*)
        builder = builder.add_source(
            Environment::with_prefix("SCHEMAS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the documents path (resolves relative paths)
    pub fn documents_path(&self) -> PathBuf {
        if self.documents.path.is_absolute() {
            self.documents.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.documents.path)
        }
    }
}
