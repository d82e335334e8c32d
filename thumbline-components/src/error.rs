//! Configuration errors reported by thumbline components.

use thiserror::Error;

/// Rejected slider configuration.
///
/// Runtime input (touches, controlled values) is clamped instead; only
/// configuration that makes the value domain meaningless is an error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SliderError {
    /// A bound, step or minimum range is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `min` is not strictly below `max`.
    #[error("`min` ({min}) must be less than `max` ({max})")]
    EmptyDomain {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// `step` is zero or negative.
    #[error("`step` must be positive, got {0}")]
    InvalidStep(f64),
    /// `min_range` is negative.
    #[error("`min_range` must not be negative, got {0}")]
    NegativeMinRange(f64),
    /// `min_range` does not fit into the domain.
    #[error("`min_range` ({min_range}) exceeds the domain width ({span})")]
    MinRangeTooLarge {
        /// Configured minimum separation.
        min_range: f64,
        /// `max - min`.
        span: f64,
    },
}
