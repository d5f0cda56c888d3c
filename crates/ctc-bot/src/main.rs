//! CTC dice derivatives market maker - Entry Point
//!
//! Quotes a single market snapshot and prints `{ product_id: [bid, ask] }`
//! as JSON on stdout.

use anyhow::Result;
use clap::Parser;
use ctc_bot::config::DEFAULT_CONFIG_PATH;
use ctc_bot::{AppConfig, Application, SnapshotFile};
use tracing::info;

/// CTC dice derivatives market maker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via CTC_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Market snapshot JSON file
    #[arg(short, long)]
    snapshot: String,

    /// Pretty-print the quote JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    ctc_telemetry::init_logging()?;

    info!("Starting CTC market maker v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > CTC_CONFIG env var > default path (missing default = built-in defaults)
    let config = match args.config.or_else(|| std::env::var("CTC_CONFIG").ok()) {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(&path)?
        }
        None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!(config_path = DEFAULT_CONFIG_PATH, "Loading configuration");
            AppConfig::from_file(DEFAULT_CONFIG_PATH)?
        }
        None => {
            info!("No configuration file, using defaults");
            AppConfig::default()
        }
    };

    let app = Application::new(config)?;

    let snapshot = SnapshotFile::from_file(&args.snapshot)?;
    let quotes = app.quote(&snapshot)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&quotes)?
    } else {
        serde_json::to_string(&quotes)?
    };
    println!("{output}");

    Ok(())
}
