//! Parking feed integration
//!
//! Fetches parking lots from two public feeds and normalizes them into
//! [`domain::Parking`] records:
//!
//! - the Eurométropole de Metz open-data WFS service (GeoJSON, with live occupancy)
//! - the [Transport for London](https://api.tfl.gov.uk) `Place/Type/CarPark` endpoint
//!
//! # Architecture
//!
//! [`ParkingClient`] defines the interface shared by both feeds and is
//! implemented by [`MetzWfsClient`] and [`TflCarParkClient`]. Both are built
//! from a single [`ParkingConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_parking::{MetzWfsClient, ParkingClient, ParkingConfig};
//!
//! let config = ParkingConfig::default();
//! let client = MetzWfsClient::new(&config)?;
//! let parkings = client.fetch_parkings().await?;
//! ```

mod client;
mod config;
mod error;
mod metz;
mod models;
mod tfl;

pub use client::ParkingClient;
pub use config::ParkingConfig;
pub use error::ParkingError;
pub use metz::MetzWfsClient;
pub use models::ParkingSource;
pub use tfl::TflCarParkClient;
