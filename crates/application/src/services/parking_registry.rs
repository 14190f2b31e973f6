//! Parking registry service
//!
//! Holds the last fetched parking records in two collections, the
//! occupancy-known ("DSP") parkings and the rest, and answers radius and
//! nearest-parking queries over them with a linear scan.
//!
//! A refresh rebuilds both collections from scratch and swaps them in under a
//! single write lock, so readers see either the previous snapshot or the new
//! one. Sources are fetched concurrently; a failing source is logged and
//! contributes nothing, the others are unaffected.

use std::fmt;
use std::sync::Arc;

use domain::{GeoLocation, Parking};
use futures::future::join_all;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::ports::{ParkingSourcePort, Placement};

/// Radius used by [`ParkingRegistry::near_parkings`] when none is given
pub const DEFAULT_RADIUS_METERS: f64 = 3000.0;

/// The two parking collections
#[derive(Debug, Clone, Default)]
struct ParkingCollections {
    /// Parkings with known total and available space counts
    dsp: Vec<Parking>,
    /// Parkings with unknown occupancy
    other: Vec<Parking>,
}

impl ParkingCollections {
    /// File records according to the source's placement policy
    ///
    /// Returns how many went to the DSP collection.
    fn file_all(&mut self, parkings: Vec<Parking>, placement: Placement) -> usize {
        let mut to_dsp = 0;
        for parking in parkings {
            let dsp = match placement {
                Placement::AlwaysOccupancyKnown => true,
                Placement::ByOccupancy => parking.has_known_occupancy(),
            };
            if dsp {
                to_dsp += 1;
                self.dsp.push(parking);
            } else {
                self.other.push(parking);
            }
        }
        to_dsp
    }
}

/// Result of fetching one source during a refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    /// Source name
    pub source: &'static str,
    /// Records filed into the DSP collection
    pub dsp: usize,
    /// Records filed into the other collection
    pub other: usize,
    /// Error message when the source failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceOutcome {
    /// Whether the source was fetched successfully
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a refresh, one entry per source in configuration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Per-source outcomes
    pub sources: Vec<SourceOutcome>,
}

impl RefreshReport {
    /// Whether every source was fetched successfully
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sources.iter().all(SourceOutcome::is_success)
    }

    /// Outcomes of the sources that failed
    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|s| !s.is_success())
    }
}

/// In-memory parking registry fed by one or more parking sources
pub struct ParkingRegistry {
    sources: Vec<Arc<dyn ParkingSourcePort>>,
    state: RwLock<ParkingCollections>,
    default_radius_meters: f64,
}

impl fmt::Debug for ParkingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("ParkingRegistry")
            .field(
                "sources",
                &self
                    .sources
                    .iter()
                    .map(|s| s.source_name())
                    .collect::<Vec<_>>(),
            )
            .field("dsp", &state.dsp.len())
            .field("other", &state.other.len())
            .field("default_radius_meters", &self.default_radius_meters)
            .finish()
    }
}

impl ParkingRegistry {
    /// Create an empty registry reading the given sources
    ///
    /// Source order is preserved in the collections and in refresh reports.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn ParkingSourcePort>>) -> Self {
        Self {
            sources,
            state: RwLock::new(ParkingCollections::default()),
            default_radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    /// Override the radius used when a query does not give one
    #[must_use]
    pub fn with_default_radius(mut self, radius_meters: f64) -> Self {
        self.default_radius_meters = radius_meters;
        self
    }

    /// Radius used when a query does not give one
    #[must_use]
    pub const fn default_radius_meters(&self) -> f64 {
        self.default_radius_meters
    }

    /// Refetch every source and replace both collections
    ///
    /// Never fails: source errors are logged and reported in the returned
    /// [`RefreshReport`].
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub async fn refresh(&self) -> RefreshReport {
        let results = join_all(self.sources.iter().map(|source| async move {
            let result = source.fetch_parkings().await;
            (source, result)
        }))
        .await;

        let mut collections = ParkingCollections::default();
        let mut outcomes = Vec::with_capacity(results.len());

        for (source, result) in results {
            let name = source.source_name();
            match result {
                Ok(parkings) => {
                    let total = parkings.len();
                    let dsp = collections.file_all(parkings, source.placement());
                    debug!(source = name, dsp, other = total - dsp, "Source fetched");
                    outcomes.push(SourceOutcome {
                        source: name,
                        dsp,
                        other: total - dsp,
                        error: None,
                    });
                },
                Err(e) => {
                    error!(source = name, error = %e, "Failed to fetch parkings");
                    outcomes.push(SourceOutcome {
                        source: name,
                        dsp: 0,
                        other: 0,
                        error: Some(e.to_string()),
                    });
                },
            }
        }

        info!(
            dsp = collections.dsp.len(),
            other = collections.other.len(),
            "Parking registry refreshed"
        );
        *self.state.write() = collections;

        RefreshReport { sources: outcomes }
    }

    /// Parkings within `radius_meters` of `position`
    ///
    /// Occupancy-known parkings come first, followed by the others unless
    /// `dsp_only` is set. Order within each collection is fetch order, not
    /// distance. `None` uses the default radius.
    #[must_use]
    pub fn near_parkings(
        &self,
        position: &GeoLocation,
        dsp_only: bool,
        radius_meters: Option<f64>,
    ) -> Vec<Parking> {
        let radius = radius_meters.unwrap_or(self.default_radius_meters);
        let within = |parking: &Parking| parking.distance_meters(position) <= radius;

        let state = self.state.read();
        let mut nearby: Vec<Parking> = state
            .dsp
            .iter()
            .filter(|p| within(*p))
            .cloned()
            .collect();

        if !dsp_only {
            nearby.extend(state.other.iter().filter(|p| within(*p)).cloned());
        }

        nearby
    }

    /// The parking closest to `position`, across both collections
    ///
    /// Ties go to the first parking in scan order (DSP, then others).
    #[must_use]
    pub fn nearest_parking(&self, position: &GeoLocation) -> Option<Parking> {
        let state = self.state.read();
        state
            .dsp
            .iter()
            .chain(state.other.iter())
            .map(|parking| (parking, parking.distance_meters(position)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(parking, _)| parking.clone())
    }

    /// Snapshot of the occupancy-known parkings
    #[must_use]
    pub fn dsp_parkings(&self) -> Vec<Parking> {
        self.state.read().dsp.clone()
    }

    /// Snapshot of the parkings with unknown occupancy
    #[must_use]
    pub fn other_parkings(&self) -> Vec<Parking> {
        self.state.read().other.clone()
    }

    /// Number of parkings in both collections
    #[must_use]
    pub fn len(&self) -> usize {
        let state = self.state.read();
        state.dsp.len() + state.other.len()
    }

    /// Whether both collections are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn seeded(dsp: Vec<Parking>, other: Vec<Parking>) -> Self {
        let registry = Self::new(Vec::new());
        *registry.state.write() = ParkingCollections { dsp, other };
        registry
    }
}
