//! Observability subsystem.
//!
//! The startup binary installs the subscriber before the configuration is
//! loaded, so loader and validator events are captured, then narrows it to
//! the configured `Log-Level`.

pub mod logging;

pub use logging::{init_logging, LogHandle, LogLevel};
