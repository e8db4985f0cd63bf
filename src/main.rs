//! EqCurve CLI
//!
//! Computes an aggregate EQ response curve from a JSON file of band
//! records and prints it as a table or as JSON.

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use eqcurve::{aggregate_response, Band, ResponseOptions, Result};

#[derive(Parser)]
#[command(
    name = "eqcurve-cli",
    version,
    about = "Compute the frequency response of a parametric EQ band set"
)]
struct Cli {
    /// Path to a JSON array of band records
    #[arg(long)]
    bands: PathBuf,

    /// Number of points on the curve
    #[arg(long, default_value_t = 512)]
    points: usize,

    /// Evaluation sample rate in Hz
    #[arg(long, default_value_t = 48_000.0)]
    sample_rate: f64,

    /// Lower edge of the frequency span in Hz
    #[arg(long, default_value_t = 20.0)]
    min_freq: f64,

    /// Upper edge of the frequency span in Hz
    #[arg(long, default_value_t = 20_000.0)]
    max_freq: f64,

    /// Emit the curve as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("EqCurve v{}", env!("CARGO_PKG_VERSION"));

    let text = std::fs::read_to_string(&cli.bands)?;
    let bands: Vec<Band> = serde_json::from_str(&text)?;
    info!("Loaded {} band(s) from {}", bands.len(), cli.bands.display());

    let options = ResponseOptions {
        num_points: cli.points,
        min_freq: cli.min_freq,
        max_freq: cli.max_freq,
        sample_rate: cli.sample_rate,
    };
    let curve = aggregate_response(&bands, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
    } else {
        for (frequency, magnitude) in curve.frequencies.iter().zip(&curve.magnitude_db) {
            println!("{:>10.2} Hz  {:>+8.3} dB", frequency, magnitude);
        }
    }

    Ok(())
}
