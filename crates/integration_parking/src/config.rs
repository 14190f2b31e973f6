//! Parking feed configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for both parking feeds
#[derive(Clone, Serialize, Deserialize)]
pub struct ParkingConfig {
    /// Metz WFS `GetFeature` URL, including its query string
    #[serde(default = "default_metz_endpoint")]
    pub metz_endpoint: String,

    /// TfL CarPark places URL (the `app_key` parameter is appended)
    #[serde(default = "default_tfl_endpoint")]
    pub tfl_endpoint: String,

    /// TfL application key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub tfl_api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ParkingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingConfig")
            .field("metz_endpoint", &self.metz_endpoint)
            .field("tfl_endpoint", &self.tfl_endpoint)
            .field(
                "tfl_api_key",
                &if self.tfl_api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_metz_endpoint() -> String {
    "https://maps.eurometropolemetz.eu/public/ows?service=WFS&version=1.0.0&request=GetFeature\
     &typeName=public:pub_tsp_sta&srsName=EPSG:4326&outputFormat=application%2Fjson\
     &cql_filter=id%20is%20not%20null"
        .to_string()
}

fn default_tfl_endpoint() -> String {
    "https://api.tfl.gov.uk/Place/Type/CarPark".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            metz_endpoint: default_metz_endpoint(),
            tfl_endpoint: default_tfl_endpoint(),
            tfl_api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ParkingConfig {
    /// Create a configuration pointing both feeds at a test server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            metz_endpoint: format!("{base_url}/public/ows"),
            tfl_endpoint: format!("{base_url}/Place/Type/CarPark"),
            tfl_api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
        }
    }

    /// Get the TfL key as a string reference (for API calls)
    #[must_use]
    pub fn tfl_api_key_str(&self) -> Option<&str> {
        self.tfl_api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.metz_endpoint.is_empty() {
            return Err("metz_endpoint must not be empty".to_string());
        }

        if self.tfl_endpoint.is_empty() {
            return Err("tfl_endpoint must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParkingConfig::default();
        assert!(config.metz_endpoint.starts_with("https://maps.eurometropolemetz.eu/"));
        assert!(config.metz_endpoint.contains("typeName=public:pub_tsp_sta"));
        assert!(config.metz_endpoint.contains("srsName=EPSG:4326"));
        assert_eq!(config.tfl_endpoint, "https://api.tfl.gov.uk/Place/Type/CarPark");
        assert!(config.tfl_api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_default_metz_endpoint_has_no_whitespace() {
        assert!(!default_metz_endpoint().contains(char::is_whitespace));
    }

    #[test]
    fn test_testing_config() {
        let config = ParkingConfig::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.metz_endpoint, "http://127.0.0.1:9999/public/ows");
        assert_eq!(config.tfl_endpoint, "http://127.0.0.1:9999/Place/Type/CarPark");
        assert_eq!(config.tfl_api_key_str(), Some("test-key"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validation_success() {
        assert!(ParkingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_endpoints() {
        let config = ParkingConfig {
            metz_endpoint: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ParkingConfig {
            tfl_endpoint: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ParkingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ParkingConfig {
            tfl_api_key: Some(SecretString::from("super-secret")),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = ParkingConfig {
            tfl_api_key: Some(SecretString::from("super-secret")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));

        let deserialized: ParkingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.metz_endpoint, config.metz_endpoint);
        assert!(deserialized.tfl_api_key.is_none());
    }

    #[test]
    fn test_api_key_deserializes() {
        let json = r#"{ "tfl_api_key": "from-env" }"#;
        let config: ParkingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tfl_api_key_str(), Some("from-env"));
        assert_eq!(config.timeout_secs, 30);
    }
}
