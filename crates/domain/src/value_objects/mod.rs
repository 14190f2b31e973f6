//! Value Objects - Immutable, identity-less domain primitives

pub mod geo_location;

pub use geo_location::GeoLocation;
