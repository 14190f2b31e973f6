//! Application layer - Use cases and orchestration
//!
//! Contains the parking registry service and the port through which it
//! reaches parking feeds. Adapters in the infrastructure layer implement
//! the port.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
