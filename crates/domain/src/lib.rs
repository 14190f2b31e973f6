//! Domain layer for the parking finder
//!
//! Contains the parking entity, geographic value objects, and domain errors.
//! This layer performs no I/O and defines the shared vocabulary of the workspace.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
