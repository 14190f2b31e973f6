//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`, plain or JSON.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
