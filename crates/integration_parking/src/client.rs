//! Parking client trait and shared HTTP plumbing

use std::time::Duration;

use async_trait::async_trait;
use domain::Parking;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::debug;

use crate::config::ParkingConfig;
use crate::error::ParkingError;
use crate::models::ParkingSource;

/// Trait for parking feed clients
#[async_trait]
pub trait ParkingClient: Send + Sync {
    /// The feed this client reads
    fn source(&self) -> ParkingSource;

    /// Fetch and normalize every parking the feed currently publishes
    async fn fetch_parkings(&self) -> Result<Vec<Parking>, ParkingError>;
}

/// Build the HTTP client shared by both feeds
pub(crate) fn build_http_client(config: &ParkingConfig) -> Result<Client, ParkingError> {
    config.validate().map_err(ParkingError::ConfigurationError)?;

    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("parking-finder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ParkingError::ConnectionFailed(e.to_string()))
}

/// Send a prepared GET request and return the response body
///
/// Maps transport failures, rate limiting and non-success statuses to
/// [`ParkingError`] variants.
pub(crate) async fn fetch_body(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<String, ParkingError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ParkingError::Timeout { timeout_secs }
        } else {
            ParkingError::ConnectionFailed(e.to_string())
        }
    })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ParkingError::RateLimitExceeded {
            retry_after_secs: response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok()),
        });
    }

    if !status.is_success() {
        return Err(ParkingError::RequestFailed(format!("HTTP {status}")));
    }

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ParkingError::Timeout { timeout_secs }
        } else {
            ParkingError::ParseError(e.to_string())
        }
    })?;

    debug!(bytes = body.len(), "Received feed response");
    Ok(body)
}
