//! Parking source adapter - Implements ParkingSourcePort using integration_parking

use application::error::ApplicationError;
use application::ports::{ParkingSourcePort, Placement};
use async_trait::async_trait;
use domain::Parking;
use integration_parking::{ParkingClient, ParkingSource};
use tracing::instrument;

/// Adapter exposing a parking feed client as a [`ParkingSourcePort`]
#[derive(Debug)]
pub struct ParkingSourceAdapter<C> {
    client: C,
}

impl<C: ParkingClient> ParkingSourceAdapter<C> {
    /// Wrap a parking feed client
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Placement policy for a feed
    ///
    /// TfL records carry no occupancy (its occupancy API is unavailable) but
    /// are still listed with the occupancy-known parkings so they show up in
    /// DSP-only queries.
    const fn placement_for(source: ParkingSource) -> Placement {
        match source {
            ParkingSource::MetzWfs => Placement::ByOccupancy,
            ParkingSource::TflCarPark => Placement::AlwaysOccupancyKnown,
        }
    }
}

#[async_trait]
impl<C: ParkingClient> ParkingSourcePort for ParkingSourceAdapter<C> {
    fn source_name(&self) -> &'static str {
        self.client.source().name()
    }

    fn placement(&self) -> Placement {
        Self::placement_for(self.client.source())
    }

    #[instrument(skip(self), fields(source = self.source_name()))]
    async fn fetch_parkings(&self) -> Result<Vec<Parking>, ApplicationError> {
        self.client.fetch_parkings().await.map_err(|e| {
            ApplicationError::ExternalService(format!("{} fetch failed: {e}", self.source_name()))
        })
    }
}
