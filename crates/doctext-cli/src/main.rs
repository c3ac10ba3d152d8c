//! doctext command-line interface

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use doctext::core::mime::filename_hint;
use doctext::{ClassificationHint, ExtractionConfig, classify_with_source, dispatch};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Extracted text only
    Text,
    /// JSON object with the detected format and the text
    Json,
}

#[derive(Parser)]
#[command(name = "doctext", version)]
#[command(about = "Identify uploaded documents and extract their plain text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of a document
    Extract {
        /// Document to read
        path: PathBuf,

        /// Declared media type, as a client would send it
        #[arg(short, long)]
        mime_type: Option<String>,

        /// Filename hint to use instead of the path's own file name
        #[arg(short, long)]
        filename: Option<String>,

        /// Configuration file (.toml, .yaml, .yml or .json); doctext.toml is discovered otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the format a document is classified as
    Detect {
        /// Document to read
        path: PathBuf,

        /// Declared media type, as a client would send it
        #[arg(short, long)]
        mime_type: Option<String>,

        /// Filename hint to use instead of the path's own file name
        #[arg(short, long)]
        filename: Option<String>,

        /// Classify from the media type and content only
        #[arg(long, conflicts_with = "filename")]
        no_filename: bool,
    },

    /// Start the API server
    Serve {
        /// Address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Configuration file; doctext.toml is discovered otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    match path {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ExtractionConfig::discover()
            .context("Failed to discover configuration")?
            .unwrap_or_default()),
    }
}

fn read_document(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            path,
            mime_type,
            filename,
            config,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let content = read_document(&path)?;
            let filename = filename.as_deref().or_else(|| filename_hint(&path));

            let hint = ClassificationHint::new(&content)
                .with_media_type(mime_type.as_deref())
                .with_filename(filename);
            let (detected, rule) = classify_with_source(&hint);
            tracing::debug!(format = %detected, rule = %rule, "Classified {}", path.display());

            let result = dispatch(detected, &content, &config)
                .await
                .with_context(|| format!("Failed to extract {}", path.display()))?;

            match format {
                OutputFormat::Text => print!("{}", result.content),
                OutputFormat::Json => {
                    let output = json!({
                        "format": detected,
                        "content": result.content,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(())
        }

        Commands::Detect {
            path,
            mime_type,
            filename,
            no_filename,
        } => {
            let content = read_document(&path)?;
            let filename = if no_filename {
                None
            } else {
                filename.as_deref().or_else(|| filename_hint(&path))
            };

            let hint = ClassificationHint::new(&content)
                .with_media_type(mime_type.as_deref())
                .with_filename(filename);
            let (detected, rule) = classify_with_source(&hint);
            tracing::debug!(rule = %rule, "Classified {}", path.display());

            println!("{}", detected);
            Ok(())
        }

        Commands::Serve { host, port, config } => {
            let config = load_config(config.as_deref())?;
            doctext::api::serve_with_config(&host, port, config)
                .await
                .context("API server failed")?;
            Ok(())
        }
    }
}
