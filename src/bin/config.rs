//! Schema Config CLI
//!
//! View and manage schema tooling configuration.

use clap::{Parser, Subcommand};
use meridian_schemas::SchemaConfig;

#[derive(Parser)]
#[command(name = "schema-config")]
#[command(about = "View and manage schema tooling configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path (default: schemas.toml)
        #[arg(short, long, default_value = "schemas.toml")]
        output: String,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = SchemaConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                // Pretty print
                println!("📋 Schema Tooling Configuration\n");
                println!("Documents:");
                println!("  Path: {:?}", cfg.documents.path);

                println!("\nExport:");
                println!("  Format: {:?}", cfg.export.output_format);
                println!("  Check: {}", cfg.export.check);

                println!("\nBuild:");
                println!("  Default format: {}", cfg.build.default_format);
                println!("  Default usage: {:?}", cfg.build.default_usage);
            }
        }

        Commands::Init { output } => {
            let cfg = SchemaConfig::default();
            cfg.save(&output)?;
            println!("✅ Created config file: {}", output);
        }

        Commands::Validate { config } => {
            match SchemaConfig::load_from(config.as_deref()) {
                Ok(cfg) => {
                    println!("✅ Configuration is valid");
                    println!("   Documents: {:?}", cfg.documents.path);
                    println!("   Default format: {}", cfg.build.default_format);
                }
                Err(e) => {
                    eprintln!("❌ Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
