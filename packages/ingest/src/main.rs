#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for validating a call records CSV.
//!
//! Runs the same load pipeline the server uses at startup and prints what
//! it found, so a dataset can be checked before serving it.

use std::path::PathBuf;
use std::time::Instant;

use calls_dashboard_calls_models::ReasonFilter;
use calls_dashboard_charts::aggregate::{count_by_reason, top_townships};
use calls_dashboard_ingest::load_calls;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "calls_dashboard_ingest",
    about = "Load and summarize an emergency call records CSV"
)]
struct Cli {
    /// Path to the CSV file
    #[arg(default_value = "911.csv")]
    path: PathBuf,
    /// Number of townships to list
    #[arg(long, default_value = "10")]
    top: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let loaded = load_calls(&cli.path)?;
    let elapsed = start.elapsed();

    let report = &loaded.report;
    println!("Loaded {} in {elapsed:.2?}", cli.path.display());
    println!("  rows read:          {}", report.total_rows);
    println!("  duplicates dropped: {}", report.duplicate_rows);
    println!("  records kept:       {}", loaded.dataset.len());
    println!(
        "  ZIP filled:         {} (default {})",
        report.filled_zip,
        report.zip_default.as_deref().unwrap_or("-")
    );
    println!("  township filled:    {}", report.filled_twp);

    let records = loaded.dataset.select(&ReasonFilter::All);

    println!();
    println!("Reasons:");
    for reason in count_by_reason(&records) {
        println!("  {:<20} {}", reason.label, reason.count);
    }

    println!();
    println!("Top townships:");
    for township in top_townships(&records, cli.top) {
        println!("  {:<20} {}", township.label, township.count);
    }

    Ok(())
}
