//! Parking feed identifiers

use std::fmt;

use domain::City;
use serde::{Deserialize, Serialize};

/// The parking feeds this crate can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingSource {
    /// Eurométropole de Metz open-data WFS layer `public:pub_tsp_sta`
    MetzWfs,
    /// Transport for London `Place/Type/CarPark`
    TflCarPark,
}

impl ParkingSource {
    /// Short machine name, used in logs and reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MetzWfs => "metz_wfs",
            Self::TflCarPark => "tfl_car_park",
        }
    }

    /// City label stamped on every record from this feed
    #[must_use]
    pub const fn city(self) -> City {
        match self {
            Self::MetzWfs => City::Metz,
            Self::TflCarPark => City::London,
        }
    }
}

impl fmt::Display for ParkingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_city() {
        assert_eq!(ParkingSource::MetzWfs.city(), City::Metz);
        assert_eq!(ParkingSource::TflCarPark.city(), City::London);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(ParkingSource::MetzWfs.to_string(), "metz_wfs");
        assert_eq!(ParkingSource::TflCarPark.to_string(), "tfl_car_park");
        assert_eq!(
            serde_json::to_string(&ParkingSource::TflCarPark).unwrap(),
            "\"tfl_car_park\""
        );
    }
}
