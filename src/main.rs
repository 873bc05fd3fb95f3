//! Command-line front end: read a GPS log, reduce it with SQUISH-E, write the report.
use std::time::Instant;

use camino::Utf8PathBuf;
use clap::Parser;
use log::{info, warn};

use trajsquish::{
    metrics::{meters_per_degree, sed_error_stats},
    report::SimplificationReport,
    squish_e::{reduce, SquishParams},
    trajectories::gps_reader::{read_gps_file, GpsReaderOptions},
    SquishError,
};

/// Simplify a GPS trajectory with SQUISH-E
#[derive(Parser, Debug)]
#[command(name = "trajsquish")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GPS log to simplify (plain, T-Drive or Geolife rows)
    input: Utf8PathBuf,

    /// Ingested points per unit of working-set capacity growth
    #[arg(short, long, default_value_t = 1.0)]
    ratio: f64,

    /// Post-pass SED error budget in meters
    #[arg(short = 'e', long, default_value_t = 1.0)]
    sed_meters: f64,

    /// Working-set capacity before any growth
    #[arg(short = 'c', long, default_value_t = 4)]
    initial_capacity: usize,

    /// Report file
    #[arg(short, long, default_value = "outputSQ.txt")]
    output: Utf8PathBuf,

    /// Leading rows to skip (6 for Geolife .plt files)
    #[arg(long, default_value_t = 0)]
    skip_rows: usize,

    /// Skip malformed rows instead of failing
    #[arg(long)]
    lenient: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), SquishError> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = GpsReaderOptions {
        skip_rows: cli.skip_rows,
        lenient: cli.lenient,
    };
    let trajectory = read_gps_file(&cli.input, &options)?;
    let Some(mean_lat) = trajectory.mean_latitude() else {
        warn!("No GPS points read from {}", cli.input);
        return Ok(());
    };
    info!("Read {} GPS points", trajectory.len());
    if !trajectory.is_time_ordered() {
        warn!("Timestamps in {} are not in non-decreasing order", cli.input);
    }

    let factor = meters_per_degree(mean_lat);
    let params = SquishParams::builder()
        .initial_capacity(cli.initial_capacity)
        .ratio(cli.ratio)
        .epsilon(cli.sed_meters / factor)
        .build()?;
    info!("{params}");

    let start = Instant::now();
    let retained = reduce(trajectory.points(), &params);
    let elapsed = start.elapsed();

    let errors = sed_error_stats(trajectory.points(), &retained, factor);
    let report = SimplificationReport {
        retained,
        original_count: trajectory.len(),
        elapsed,
        errors,
    };
    report.write_to(&cli.output)?;

    info!(
        "Original points: {}, simplified points: {}",
        report.original_count,
        report.retained.len()
    );
    for line in report.summary().lines() {
        info!("{line}");
    }
    info!("Report written to {}", cli.output);
    Ok(())
}
