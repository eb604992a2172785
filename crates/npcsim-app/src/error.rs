//! Errors crossing the command-surface boundary.
//!
//! The core crates never return `Result`: bad input there degrades
//! gracefully (lookup-miss returns empty, invalid enums clamp) and logs
//! a diagnostic through `tracing`. The one place an explicit error type
//! is warranted is validating a payload from a host *before* it reaches
//! the deterministic core — today, that's `submit_sensor_readings`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("sensor reading has an empty metric name")]
    EmptyMetric,

    #[error("sensor reading for metric '{0}' has a non-finite value or threshold")]
    NonFiniteReading(String),
}
