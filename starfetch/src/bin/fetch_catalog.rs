//! Fetch the HYG star catalog, or fall back to a built-in list
//!
//! Tries each compiled-in mirror in order, keeps naked-eye stars (magnitude
//! <= 5.0) and anything with a proper name, and writes them to `stars.csv`
//! as `name,ra,dec` in degrees. If every mirror fails, a list of 45 bright
//! stars is written instead.
//!
//! Usage:
//!   cargo run --bin fetch_catalog -- [--output PATH] [--fallback-on-empty]

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use starfetch::{CatalogConfig, CatalogOrigin, Pipeline, ZeroRecordPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "fetch_catalog",
    about = "Downloads and normalizes the HYG star catalog",
    long_about = None
)]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "stars.csv")]
    output: PathBuf,

    /// Write the fallback list when the downloaded catalog has no qualifying stars
    #[arg(long)]
    fallback_on_empty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = CatalogConfig {
        output: args.output,
        zero_records: if args.fallback_on_empty {
            ZeroRecordPolicy::UseFallback
        } else {
            ZeroRecordPolicy::WriteEmpty
        },
        ..CatalogConfig::default()
    };

    let report = Pipeline::from_config(&config)
        .and_then(|pipeline| pipeline.run())
        .inspect_err(|e| error!("{e}"))?;

    match &report.origin {
        CatalogOrigin::Fetched { uri } => info!("Found {} stars from {}", report.written, uri),
        CatalogOrigin::Fallback => {
            info!("Wrote {} stars from fallback list", report.written)
        }
    }
    Ok(())
}
