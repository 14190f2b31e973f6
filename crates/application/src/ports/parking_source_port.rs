//! Parking source port
//!
//! Defines the interface through which the registry pulls parking records
//! from an external feed.

use async_trait::async_trait;
use domain::Parking;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Where the records of a source are filed in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Occupancy-known collection iff both space counts are present
    ByOccupancy,
    /// Always the occupancy-known collection, whatever the counts say
    AlwaysOccupancyKnown,
}

/// Port for a feed of parking records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ParkingSourcePort: Send + Sync {
    /// Short name of the source, used in logs and refresh reports
    fn source_name(&self) -> &'static str;

    /// How records from this source are classified
    fn placement(&self) -> Placement;

    /// Fetch every record the source currently publishes
    async fn fetch_parkings(&self) -> Result<Vec<Parking>, ApplicationError>;
}
