//! Metz open-data WFS client
//!
//! Reads the `public:pub_tsp_sta` layer of the Eurométropole de Metz
//! geoserver as GeoJSON. Features carry live occupancy (`place_total`,
//! `place_libre`) for the lots that report it.

use async_trait::async_trait;
use domain::{GeoLocation, Parking, ParkingId};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::client::{self, ParkingClient};
use crate::config::ParkingConfig;
use crate::error::ParkingError;
use crate::models::ParkingSource;

/// Client for the Metz WFS parking layer
#[derive(Debug)]
pub struct MetzWfsClient {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl MetzWfsClient {
    /// Create a new Metz WFS client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ParkingConfig) -> Result<Self, ParkingError> {
        Ok(Self {
            client: client::build_http_client(config)?,
            endpoint: config.metz_endpoint.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Parse a GeoJSON feature collection into parking records
    ///
    /// Only the collection envelope must be well formed. Each feature is
    /// decoded on its own; malformed features, features without an id,
    /// without point geometry, or with out-of-range coordinates are skipped
    /// with a warning.
    fn parse_feature_collection(body: &str) -> Result<Vec<Parking>, ParkingError> {
        let raw: RawFeatureCollection =
            serde_json::from_str(body).map_err(|e| ParkingError::ParseError(e.to_string()))?;

        Ok(raw
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<RawFeature>(value) {
                Ok(feature) => Self::convert_feature(feature),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed Metz feature");
                    None
                },
            })
            .collect())
    }

    /// Convert a raw feature to a parking record
    fn convert_feature(raw: RawFeature) -> Option<Parking> {
        let Some(id) = raw.id else {
            warn!("Skipping Metz feature without id");
            return None;
        };

        let Some((lon, lat)) = raw.geometry.as_ref().and_then(RawGeometry::point) else {
            warn!(%id, "Skipping Metz feature without point geometry");
            return None;
        };

        let coordinates = match GeoLocation::from_lon_lat(lon, lat) {
            Ok(location) => location,
            Err(e) => {
                warn!(%id, error = %e, "Skipping Metz feature with invalid coordinates");
                return None;
            },
        };

        let props = raw.properties.unwrap_or_default();
        Some(Parking {
            id,
            kind: text_value(props.typ).unwrap_or_default(),
            label: text_value(props.lib).unwrap_or_default(),
            total_spaces: space_count(props.place_total.as_ref()),
            available_spaces: space_count(props.place_libre.as_ref()),
            tariff: text_value(props.cout),
            coordinates,
            city: ParkingSource::MetzWfs.city(),
        })
    }
}

#[async_trait]
impl ParkingClient for MetzWfsClient {
    fn source(&self) -> ParkingSource {
        ParkingSource::MetzWfs
    }

    #[instrument(skip(self), fields(source = %ParkingSource::MetzWfs))]
    async fn fetch_parkings(&self) -> Result<Vec<Parking>, ParkingError> {
        debug!(url = %self.endpoint, "Fetching Metz parkings");

        let body = client::fetch_body(self.client.get(&self.endpoint), self.timeout_secs).await?;
        let parkings = Self::parse_feature_collection(&body)?;

        debug!(count = parkings.len(), "Metz parkings parsed");
        Ok(parkings)
    }
}

/// Read a space count, treating null, negative and fractional values as unknown
fn space_count(value: Option<&serde_json::Value>) -> Option<u32> {
    value
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Render a property as text; the feed mixes strings and numbers
fn text_value(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    id: Option<ParkingId>,
    #[serde(default)]
    properties: Option<RawProperties>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    typ: Option<serde_json::Value>,
    lib: Option<serde_json::Value>,
    place_total: Option<serde_json::Value>,
    place_libre: Option<serde_json::Value>,
    cout: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl RawGeometry {
    /// `(longitude, latitude)` of a GeoJSON point position
    ///
    /// Nested positions (lines, polygons, multi-points) yield `None`.
    fn point(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_array()?.as_slice() {
            [lon, lat, ..] => Some((lon.as_f64()?, lat.as_f64()?)),
            _ => None,
        }
    }
}
