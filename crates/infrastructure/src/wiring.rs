//! Registry construction from configuration

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ParkingSourcePort;
use application::services::ParkingRegistry;
use integration_parking::{MetzWfsClient, TflCarParkClient};
use tracing::debug;

use crate::adapters::ParkingSourceAdapter;
use crate::config::AppConfig;

/// Build a registry reading the Metz feed first, then TfL
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if the configuration is invalid
/// or an HTTP client cannot be built.
pub fn build_registry(config: &AppConfig) -> Result<ParkingRegistry, ApplicationError> {
    config.validate()?;

    let metz = MetzWfsClient::new(&config.sources)
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
    let tfl = TflCarParkClient::new(&config.sources)
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

    let sources: Vec<Arc<dyn ParkingSourcePort>> = vec![
        Arc::new(ParkingSourceAdapter::new(metz)),
        Arc::new(ParkingSourceAdapter::new(tfl)),
    ];

    debug!(
        sources = sources.len(),
        default_radius_meters = config.search.default_radius_meters,
        "Parking registry configured"
    );

    Ok(ParkingRegistry::new(sources).with_default_radius(config.search.default_radius_meters))
}
