//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod parking_source_port;

#[cfg(test)]
pub use parking_source_port::MockParkingSourcePort;
pub use parking_source_port::{ParkingSourcePort, Placement};
