//! Application services

mod parking_registry;

pub use parking_registry::{
    DEFAULT_RADIUS_METERS, ParkingRegistry, RefreshReport, SourceOutcome,
};
