//! Parking entity
//!
//! A normalized parking lot record, independent of the feed it came from.
//! The serialized form keeps the field names of the public record shape
//! (`type`, `lib`, `place_tot`, `place_dispo`, `cout`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Source-provided parking identifier
///
/// Feeds use either text identifiers (`"pub_tsp_sta.12"`, `"CarParks_800491"`)
/// or plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParkingId {
    /// Numeric identifier
    Number(i64),
    /// Text identifier
    Text(String),
}

impl fmt::Display for ParkingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ParkingId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParkingId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for ParkingId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// City a parking record originates from (fixed per feed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    /// Metz, France (Eurométropole open data)
    Metz,
    /// London, UK (Transport for London)
    London,
}

impl City {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Metz => "Metz",
            Self::London => "London",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parking lot with optional live occupancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parking {
    /// Source-provided identifier
    pub id: ParkingId,
    /// Category, meaning varies by source
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable name
    #[serde(rename = "lib")]
    pub label: String,
    /// Total capacity (None = unknown)
    #[serde(rename = "place_tot")]
    pub total_spaces: Option<u32>,
    /// Currently available spaces (None = unknown)
    #[serde(rename = "place_dispo")]
    pub available_spaces: Option<u32>,
    /// Tariff information
    #[serde(rename = "cout")]
    pub tariff: Option<String>,
    /// Location of the parking entrance
    pub coordinates: GeoLocation,
    /// Originating city
    pub city: City,
}

impl Parking {
    /// Whether both total and available space counts are known
    #[must_use]
    pub const fn has_known_occupancy(&self) -> bool {
        self.total_spaces.is_some() && self.available_spaces.is_some()
    }

    /// Distance from `position` to this parking in meters
    #[must_use]
    pub fn distance_meters(&self, position: &GeoLocation) -> f64 {
        position.distance_meters(&self.coordinates)
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let occupancy = match (self.available_spaces, self.total_spaces) {
            (Some(free), Some(total)) => format!("{free}/{total} free"),
            _ => "occupancy unknown".to_string(),
        };
        format!("{} ({}, {occupancy})", self.label, self.city)
    }
}

impl fmt::Display for Parking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
