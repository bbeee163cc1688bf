//! # Observability
//!
//! Structured logging through `tracing`.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig, LOG_ENV};
