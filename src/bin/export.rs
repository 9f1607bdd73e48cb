//! Schema Export CLI
//!
//! Builds the JSON Schema of one resource class from a directory of
//! definition documents and prints or writes it, decorated for HAL unless
//! --plain is given. The schema goes to stdout (or --output); status lines
//! go to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jsonschema::{Draft, JSONSchema};
use meridian_schemas::config::OutputFormat;
use meridian_schemas::{
    BuildParams, DocumentSchemaFactory, HalSchemaFactory, OperationCategory, SchemaConfig,
    SchemaFactory, SchemaUsage,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-export")]
#[command(about = "Build and export the JSON Schema of an API resource")]
struct Cli {
    /// Resource class to build the schema for (e.g. "Book")
    class: String,

    /// Directory of schema definition documents
    #[arg(short, long)]
    documents: Option<PathBuf>,

    /// Wire format to build for (HAL decoration applies to "jsonhal")
    #[arg(short, long)]
    format: Option<String>,

    /// Usage side of the schema ("input" or "output")
    #[arg(short, long)]
    usage: Option<String>,

    /// Build the collection schema instead of the item schema
    #[arg(long)]
    collection: bool,

    /// Operation name, when one applies
    #[arg(long)]
    operation: Option<String>,

    /// Skip the HAL decorator and export the plain schema
    #[arg(long)]
    plain: bool,

    /// Write the schema to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,

    /// Compile the produced schema as draft-07 after building
    #[arg(long)]
    check: bool,

    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SchemaConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let documents_dir = cli.documents.unwrap_or_else(|| config.documents_path());
    let format = cli.format.unwrap_or_else(|| config.build.default_format.clone());
    let usage = match cli.usage.as_deref() {
        Some("input") => SchemaUsage::Input,
        Some("output") => SchemaUsage::Output,
        Some(other) => anyhow::bail!("Unknown usage '{}' (expected input or output)", other),
        None => config.build.default_usage,
    };

    eprintln!("📦 Schema Export");
    eprintln!("  Class: {}", cli.class);
    eprintln!("  Format: {}", format);
    eprintln!();

    let documents = DocumentSchemaFactory::from_directory(&documents_dir)
        .with_context(|| format!("Failed to load documents from {:?}", documents_dir))?;
    if documents.document_count() == 0 {
        eprintln!("⚠️  No documents found in {:?}", documents_dir);
    } else {
        eprintln!(
            "📂 Loaded {} documents from {:?}",
            documents.document_count(),
            documents_dir
        );
    }

    let factory: Box<dyn SchemaFactory> = if cli.plain {
        Box::new(documents)
    } else {
        Box::new(HalSchemaFactory::new(Box::new(documents)))
    };

    let params = BuildParams {
        operation_category: Some(if cli.collection {
            OperationCategory::Collection
        } else {
            OperationCategory::Item
        }),
        operation_name: cli.operation,
        ..BuildParams::default()
    };

    let schema = factory
        .build_schema(&cli.class, &format, usage, params)
        .with_context(|| format!("Failed to build schema for '{}'", cli.class))?;
    let value = schema.into_value();

    if cli.check || config.export.check {
        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&value)
            .map_err(|e| anyhow::anyhow!("Produced schema does not compile: {}", e))?;
        eprintln!("✅ Schema compiles as draft-07");
    }

    let compact = cli.compact || config.export.output_format == OutputFormat::Compact;
    let json = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("✅ Schema written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
