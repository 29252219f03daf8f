//! Error types.
//!
//! Everything that can go wrong in this crate goes wrong at configuration
//! load time. Once a [`LocomotionController`](crate::controller::LocomotionController)
//! exists, ticking it cannot fail.

use std::path::PathBuf;

use thiserror::Error;

/// A response curve whose keyframes cannot be evaluated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// The curve has no keyframes.
    #[error("response curve has no keyframes")]
    Empty,

    /// A keyframe contains a NaN or infinite number.
    #[error("keyframe {index} contains a non-finite value")]
    NonFinite { index: usize },

    /// Keyframe times are not strictly increasing.
    #[error("keyframe {index} at t={time} does not come after the previous keyframe")]
    Unordered { index: usize, time: f32 },
}

/// A [`MotionConfig`](crate::config::MotionConfig) that must not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Durations divide elapsed time, so zero or negative values are fatal.
    #[error("`{field}` must be a positive duration, got {value}")]
    NonPositiveDuration { field: &'static str, value: f32 },

    /// A factor outside its documented range.
    #[error("`{field}` must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Speeds and multipliers are magnitudes.
    #[error("`{field}` must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Heights must be real numbers.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// The arc projection divides by the radius.
    #[error("arc projection needs a positive base height (radius), got {0}")]
    NonPositiveRadius(f32),

    /// One of the authored response curves is malformed.
    #[error("curve `{field}` is invalid: {source}")]
    InvalidCurve {
        field: &'static str,
        #[source]
        source: CurveError,
    },

    /// The TOML document could not be parsed.
    #[error("failed to parse motion config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("failed to read motion config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
