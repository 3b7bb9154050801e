//! Core error types for fedicheck.

use thiserror::Error;

/// Core error type for entity fields.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not match the closed set of values accepted for a field.
    #[error("Invalid {kind}: {value}")]
    InvalidEnumValue {
        /// Name of the closed set (e.g. "visibility").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
