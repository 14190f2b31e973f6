//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod parking_source_adapter;

pub use parking_source_adapter::ParkingSourceAdapter;
