//! Parking finder CLI
//!
//! Fetches the Metz and TfL parking feeds and runs proximity queries on them.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use application::{ParkingRegistry, RefreshReport};
use clap::{Parser, Subcommand};
use domain::{GeoLocation, Parking};
use infrastructure::{AppConfig, build_registry, init_logging};
use serde::Serialize;
use tracing::warn;

/// Parking finder CLI
#[derive(Parser)]
#[command(name = "parking-cli")]
#[command(author, version, about = "Find parkings near a point (Metz open data + TfL)", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (TOML), read after ./config.toml
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both feeds and print what was loaded
    Refresh,

    /// List parkings within a radius of a point
    ///
    /// Example: parking-cli nearby --lat 49.1197 --lon 6.1757 --radius 1500
    Nearby {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Radius in meters (default from configuration, 3000 if unset)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Only parkings with live occupancy
        #[arg(long)]
        dsp_only: bool,
    },

    /// Show the parking closest to a point
    Nearest {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

/// A parking together with its distance to the query point
#[derive(Debug, Serialize)]
struct ParkingMatch<'a> {
    #[serde(flatten)]
    parking: &'a Parking,
    distance_meters: f64,
}

impl<'a> ParkingMatch<'a> {
    fn new(parking: &'a Parking, position: &GeoLocation) -> Self {
        Self {
            parking,
            distance_meters: parking.distance_meters(position).round(),
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Refresh the registry and surface per-source failures as warnings
async fn refresh(registry: &ParkingRegistry) -> RefreshReport {
    let report = registry.refresh().await;
    for failure in report.failures() {
        warn!(
            source = failure.source,
            error = failure.error.as_deref().unwrap_or_default(),
            "Source unavailable, results are incomplete"
        );
    }
    report
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&config.logging)?;

    let registry = build_registry(&config)?;

    match cli.command {
        Commands::Refresh => {
            let report = refresh(&registry).await;

            println!("📦 Refresh report:");
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!(
                "\n🅿️  {} with live occupancy, {} without",
                registry.dsp_parkings().len(),
                registry.other_parkings().len()
            );
        },

        Commands::Nearby {
            lat,
            lon,
            radius,
            dsp_only,
        } => {
            let position = GeoLocation::new(lat, lon)?;
            refresh(&registry).await;

            let parkings = registry.near_parkings(&position, dsp_only, radius);
            let matches: Vec<ParkingMatch<'_>> = parkings
                .iter()
                .map(|p| ParkingMatch::new(p, &position))
                .collect();

            println!("{}", serde_json::to_string_pretty(&matches)?);
        },

        Commands::Nearest { lat, lon } => {
            let position = GeoLocation::new(lat, lon)?;
            refresh(&registry).await;

            match registry.nearest_parking(&position) {
                Some(parking) => {
                    let found = ParkingMatch::new(&parking, &position);
                    println!("{}", serde_json::to_string_pretty(&found)?);
                },
                None => println!("❌ No parking known, both feeds returned nothing"),
            }
        },
    }

    Ok(())
}
