//! Shared error types used across submodules.
//!
//! Field, sampling and enclosure functions are total and never fail; these
//! errors are raised only by the optional validation helpers that a scene
//! editor can run before handing snapshots to the engine.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmFieldError {
    /// Raised when a shell system has no layers.
    #[error("shell system has no layers")]
    EmptySystem,
    /// Raised when the per-layer arrays of a shell system differ in length.
    #[error("shell system array `{field}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        field: &'static str,
        /// Number of radii.
        expected: usize,
        /// Length of the offending array.
        actual: usize,
    },
    /// Raised when shell radii are not strictly increasing and positive.
    #[error("shell radius {index} ({radius}) must be positive and exceed the previous radius")]
    NonIncreasingRadii {
        /// Layer index of the offending radius.
        index: usize,
        /// Offending radius.
        radius: f64,
    },
    /// Raised when a dielectric constant is not strictly positive.
    #[error("dielectric constant of layer {index} must be positive, got {value}")]
    NonPositiveDielectric {
        /// Layer index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// Raised when a configuration value is out of range.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}
