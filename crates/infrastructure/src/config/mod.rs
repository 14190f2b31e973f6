//! Application configuration
//!
//! Configuration is layered: serde defaults, then an optional `config.toml`
//! in the working directory, then an explicit file if one is given, then
//! environment variables prefixed with `PARKING` using `__` as the nesting
//! separator (e.g. `PARKING__SOURCES__TFL_API_KEY`,
//! `PARKING__SEARCH__DEFAULT_RADIUS_METERS`).

use std::path::Path;

use application::DEFAULT_RADIUS_METERS;
use application::error::ApplicationError;
use integration_parking::ParkingConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PARKING";

/// Proximity query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used by radius queries that do not specify one, in meters
    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: f64,
}

const fn default_radius_meters() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_meters: default_radius_meters(),
        }
    }
}

impl SearchConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the default radius is not a positive finite number.
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_radius_meters.is_finite() || self.default_radius_meters <= 0.0 {
            return Err("default_radius_meters must be a positive number".to_string());
        }
        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parking feed endpoints and credentials
    #[serde(default)]
    pub sources: ParkingConfig,

    /// Proximity query settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, additionally reading `path` when given
    ///
    /// An explicit file must exist; the implicit `config.toml` is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn build(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Override with environment variables
        let config = builder.add_source(environment).build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.sources
            .validate()
            .and_then(|()| self.search.validate())
            .map_err(ApplicationError::Configuration)
    }
}
