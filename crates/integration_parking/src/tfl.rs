//! Transport for London CarPark client
//!
//! Reads `GET /Place/Type/CarPark` from the TfL unified API. The feed has no
//! usable occupancy data, so every record carries unknown space counts.

use async_trait::async_trait;
use domain::{GeoLocation, Parking, ParkingId};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::client::{self, ParkingClient};
use crate::config::ParkingConfig;
use crate::error::ParkingError;
use crate::models::ParkingSource;

/// Client for the TfL CarPark places endpoint
#[derive(Debug)]
pub struct TflCarParkClient {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    timeout_secs: u64,
}

impl TflCarParkClient {
    /// Create a new TfL client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ParkingConfig) -> Result<Self, ParkingError> {
        if config.tfl_api_key.is_none() {
            warn!("No TfL API key configured, requests will be anonymous and rate limited");
        }

        Ok(Self {
            client: client::build_http_client(config)?,
            endpoint: config.tfl_endpoint.clone(),
            api_key: config.tfl_api_key.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Parse the raw TfL place list into parking records
    ///
    /// Only the list itself must be well formed. Each place is decoded on
    /// its own; malformed places and places without an id are skipped with a
    /// warning, places without both `lat` and `lon` are dropped.
    fn parse_places(body: &str) -> Result<Vec<Parking>, ParkingError> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(body).map_err(|e| ParkingError::ParseError(e.to_string()))?;

        Ok(raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<RawPlace>(value) {
                Ok(place) => Self::convert_place(place),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed TfL place");
                    None
                },
            })
            .collect())
    }

    /// Convert a raw place to a parking record with unknown occupancy
    fn convert_place(raw: RawPlace) -> Option<Parking> {
        let Some(id) = raw.id else {
            warn!(name = raw.common_name.as_deref(), "Skipping TfL place without id");
            return None;
        };

        let (Some(lat), Some(lon)) = (raw.lat, raw.lon) else {
            debug!(%id, "Dropping TfL place without coordinates");
            return None;
        };

        let coordinates = match GeoLocation::new(lat, lon) {
            Ok(location) => location,
            Err(e) => {
                warn!(%id, error = %e, "Skipping TfL place with invalid coordinates");
                return None;
            },
        };

        Some(Parking {
            id,
            kind: raw.r#type.or(raw.place_type).unwrap_or_default(),
            label: raw.common_name.unwrap_or_default(),
            total_spaces: None,
            available_spaces: None,
            tariff: None,
            coordinates,
            city: ParkingSource::TflCarPark.city(),
        })
    }
}

#[async_trait]
impl ParkingClient for TflCarParkClient {
    fn source(&self) -> ParkingSource {
        ParkingSource::TflCarPark
    }

    #[instrument(skip(self), fields(source = %ParkingSource::TflCarPark))]
    async fn fetch_parkings(&self) -> Result<Vec<Parking>, ParkingError> {
        debug!(url = %self.endpoint, "Fetching TfL car parks");

        let mut request = self.client.get(&self.endpoint);
        if let Some(key) = &self.api_key {
            request = request.query(&[("app_key", key.expose_secret())]);
        }

        let body = client::fetch_body(request, self.timeout_secs).await?;
        let parkings = Self::parse_places(&body)?;

        debug!(count = parkings.len(), "TfL car parks parsed");
        Ok(parkings)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlace {
    id: Option<ParkingId>,
    r#type: Option<String>,
    place_type: Option<String>,
    common_name: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}
