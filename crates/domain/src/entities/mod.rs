//! Domain entities - Objects with identity

mod parking;

pub use parking::{City, Parking, ParkingId};
