//! Command-line region lookup.
//!
//! Loads a borders file and resolves points against it, either one
//! coordinate pair from the arguments or a whole CSV of points in parallel.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashbrown::HashMap;
use rayon::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use larch::dataset::load_borders;
use larch::{Geopoint, RegionLocator};

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Resolve lat/long coordinates to region codes")]
struct Args {
    /// Borders file (JSON exchange format)
    #[arg(short, long)]
    borders: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single point
    Point {
        /// Latitude
        lat: f64,
        /// Longitude
        long: f64,
    },
    /// Resolve a CSV of lat,long rows and print per-region tallies
    Batch {
        /// CSV file with lat,long columns, no header
        #[arg(short, long)]
        points: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let dataset = load_borders(&args.borders)
        .with_context(|| format!("failed to load borders from {}", args.borders.display()))?;
    let locator = RegionLocator::new(dataset);

    match args.command {
        Command::Point { lat, long } => {
            let point = Geopoint::new(lat, long);
            let (code, stats) = locator.locate_with_stats(point);
            info!(
                "Checked {} winding numbers, {} regions rejected by bounding box",
                stats.winding_tests, stats.bbox_rejections
            );
            match code {
                Some(code) => println!("{code}"),
                None => println!("not found"),
            }
        }
        Command::Batch { points } => {
            let points = read_points(&points)
                .with_context(|| format!("failed to read points from {}", points.display()))?;
            info!("Resolving {} points", points.len());

            let start = Instant::now();
            let results: Vec<Option<&str>> =
                points.par_iter().map(|&p| locator.locate(p)).collect();
            let elapsed = start.elapsed();

            let mut tally: HashMap<&str, usize> = HashMap::new();
            for code in results.iter().flatten() {
                *tally.entry(code).or_default() += 1;
            }
            let unresolved = results.iter().filter(|r| r.is_none()).count();

            let mut counts: Vec<_> = tally.into_iter().collect();
            counts.sort_unstable();
            for (code, count) in counts {
                println!("{code}: {count}");
            }
            println!("not found: {unresolved}");

            info!(
                "Resolved {} points in {:.2?} ({:.0} points/s)",
                points.len(),
                elapsed,
                points.len() as f64 / elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}

/// Read `lat,long` rows from a headerless CSV file.
fn read_points(path: &PathBuf) -> Result<Vec<Geopoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();
    for record in reader.deserialize() {
        let (lat, long): (f64, f64) = record?;
        points.push(Geopoint::new(lat, long));
    }
    Ok(points)
}
