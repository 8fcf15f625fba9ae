//! Fetch the JPL DE405 ephemeris file (`JPLEPH`)
//!
//! Skips the download when the file already exists. Payloads that look like
//! an HTML page or are too small to be the real binary are rejected.

use std::path::PathBuf;

use clap::Parser;
use log::{error, warn};
use starfetch::{
    fetch_ephemeris, ContentScreen, EphemerisConfig, EphemerisOutcome, Fetcher, HttpTransport,
};

#[derive(Parser, Debug)]
#[command(
    name = "fetch_ephemeris",
    about = "Downloads the binary JPL ephemeris",
    long_about = None
)]
struct Args {
    /// Destination of the ephemeris file
    #[arg(long, default_value = "JPLEPH")]
    output: PathBuf,

    /// Smallest payload accepted as the ephemeris, in bytes
    #[arg(long)]
    min_size: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let defaults = EphemerisConfig::default();
    let config = EphemerisConfig {
        output: args.output,
        screen: args
            .min_size
            .map(ContentScreen::with_min_size)
            .unwrap_or(defaults.screen),
        ..defaults
    };

    let transport = HttpTransport::new(&config.user_agent, config.timeout)
        .inspect_err(|e| error!("Failed to set up HTTP client: {e}"))?;
    let fetcher = Fetcher::new(transport, config.screen);

    let outcome = fetch_ephemeris(&fetcher, &config.sources, &config.output)
        .inspect_err(|e| error!("Failed to write {}: {e}", config.output.display()))?;

    if let EphemerisOutcome::Unavailable { failures } = outcome {
        warn!("Ephemeris not written; {} source(s) failed", failures.len());
    }
    Ok(())
}
