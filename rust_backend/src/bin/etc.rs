//! Exposure Time Calculator command line tool
//!
//! Prints the exposure needed in each filter to reach the configured SNR for a
//! star of the given magnitude.
//!
//! # Usage
//!
//! ```bash
//! # Reference instrument, all filters
//! cargo run --bin etc -- --magnitude 10
//!
//! # Custom instrument and filter selection, JSON output
//! cargo run --bin etc -- --magnitude 12.3 --filters B,V,R --config etc.toml --json
//! ```
//!
//! # Environment Variables
//!
//! - `ETC_CONFIG`: Configuration file used when `--config` is not given
//! - `RUST_LOG`: Log level (default: warn)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use etc_rust::config::EtcConfig;
use etc_rust::services::ExposureCalculator;

#[derive(Parser, Debug)]
#[command(
    name = "etc",
    about = "Estimates CCD exposure times that reach a target signal-to-noise ratio",
    long_about = None
)]
struct Args {
    /// Magnitude of the target star
    #[arg(short, long, allow_negative_numbers = true)]
    magnitude: f64,

    /// Comma-separated filter selection
    #[arg(short, long, default_value = "U,B,V,R,I,H")]
    filters: String,

    /// Instrument configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EtcConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => EtcConfig::load_default().context("Failed to load etc.toml")?,
    };
    let calculator = ExposureCalculator::new(config).context("Invalid configuration")?;

    let plan = calculator
        .plan_exposures(&args.filters, args.magnitude)
        .with_context(|| format!("Cannot plan exposures for magnitude {}", args.magnitude))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for estimate in &plan.estimates {
        println!(
            "{}: {:>10.2} s  (star {:.3e} e-/s, sky {:.3e} e-/s, aperture {:.4})",
            estimate.filter,
            estimate.exposure.value(),
            estimate.budget.star_rate,
            estimate.budget.sky_rate,
            estimate.aperture_fraction
        );
    }
    for token in &plan.rejected {
        eprintln!("Skipped invalid filter: {}", token);
    }
    println!();
    println!("FILTER   = '{}'", plan.filters);
    println!("DURATION = '{}'", plan.durations);

    Ok(())
}
