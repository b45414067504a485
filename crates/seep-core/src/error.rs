//! Error types shared across the Seep workspace.

use thiserror::Error;

/// Errors arising from grid construction or grid-shaped storage.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// Attempted to construct a grid with zero tiles.
    #[error("grid must have at least one tile")]
    EmptyGrid,
    /// A grid dimension exceeds what tile coordinates can address.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The configured value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
    /// Tile size in world units is zero, negative, or not finite.
    #[error("tile size must be finite and positive, got {width} x {height}")]
    InvalidTileSize {
        /// Configured tile width.
        width: f32,
        /// Configured tile height.
        height: f32,
    },
    /// A backing buffer does not match the grid's tile count.
    #[error("field holds {actual} tiles, grid expects {expected}")]
    FieldSizeMismatch {
        /// `width * height` of the grid.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

/// A tuning parameter failed validation.
///
/// Shared by every config struct in the workspace so the engine can
/// surface one error type for all of them.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamError {
    /// A rate is NaN, infinite, or negative.
    #[error("rate {name} must be finite and non-negative, got {value}")]
    InvalidRate {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The flow step would run zero sub-iterations.
    #[error("flow_iterations must be at least 1")]
    ZeroFlowIterations,
    /// A threshold is NaN, infinite, or outside its accepted range.
    #[error("threshold {name} out of range, got {value}")]
    InvalidThreshold {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
}

impl ParamError {
    /// Check that `value` is finite and `>= 0`.
    pub fn check_rate(name: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::InvalidRate { name, value })
        }
    }

    /// Check that `value` is finite and inside `[lo, hi]`.
    pub fn check_threshold(name: &'static str, value: f32, lo: f32, hi: f32) -> Result<(), Self> {
        if value.is_finite() && (lo..=hi).contains(&value) {
            Ok(())
        } else {
            Err(Self::InvalidThreshold { name, value })
        }
    }
}
