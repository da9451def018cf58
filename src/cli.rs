use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::dispatch;
use crate::error::{Result, VitalisError};
use crate::registry::ModelRegistry;

#[derive(Parser)]
#[command(name = "vitalis")]
#[command(author = "Vitalis Team")]
#[command(version = "0.1.0")]
#[command(about = "Five-disease screening prediction service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory path
    #[arg(short, long, default_value = "config")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the screening web service
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load and validate all classifier artifacts, then exit
    Check {
        /// Models directory (overrides config)
        #[arg(short, long)]
        models: Option<PathBuf>,
    },
    /// Run a one-shot prediction without starting the server
    Predict {
        /// Disease key (diabetes, heart-disease, hypothyroid, lung-cancer, parkinsons)
        #[arg(short, long)]
        disease: String,
        /// Comma-separated values in field order
        #[arg(short, long)]
        values: String,
        /// Models directory (overrides config)
        #[arg(short, long)]
        models: Option<PathBuf>,
    },
}

/// `check`: eager-load every artifact and report per-disease status.
pub fn run_check(models_dir: &Path) -> Result<()> {
    println!("Checking classifier artifacts in {}", models_dir.display());
    let registry = ModelRegistry::load(models_dir)?;
    for entry in registry.entries() {
        println!(
            "  ✓ {:<14} {} fields, artifact input dim {}",
            entry.disease.key(),
            entry.fields.len(),
            entry.predictor.input_dim()
        );
    }
    println!("All {} classifiers loaded.", registry.len());
    Ok(())
}

/// `predict`: one-shot screening over positional values.
pub fn run_predict(models_dir: &Path, disease_key: &str, values_csv: &str) -> Result<()> {
    let registry = ModelRegistry::load(models_dir)?;
    let entry = registry.by_key(disease_key)?;

    let raw: Vec<String> = values_csv
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    let vector = dispatch::build_vector_ordered(entry.fields, &raw)?;
    let prediction = dispatch::classify(entry, &vector)?;

    println!("{} [{}]", prediction.message, prediction.verdict.as_str());
    Ok(())
}

/// Parse a host/port pair into a socket address.
pub fn parse_addr(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| VitalisError::Validation(format!("invalid bind address {host}:{port}: {e}")))
}
