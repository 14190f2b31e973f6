//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the parking feed clients,
//! loads layered configuration, and sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{AppConfig, SearchConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
pub use wiring::build_registry;
