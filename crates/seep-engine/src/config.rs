//! Simulator configuration, validation, and error types.

use seep_core::{GridError, ParamError, TileCoord};
use seep_flow::FlowConfig;
use seep_surface::SurfaceConfig;
use std::fmt;
use thiserror::Error;

// ── StreamConfig ────────────────────────────────────────────────

/// Falling-stream pre-fill model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Downward acceleration of the stream head, world units/s² (negative).
    pub gravity: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { gravity: -2600.0 }
    }
}

impl StreamConfig {
    /// `gravity` must be finite and strictly negative.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_threshold("gravity", self.gravity, f32::MIN, -f32::MIN_POSITIVE)
    }
}

// ── WaterConfig ─────────────────────────────────────────────────

/// Which anchor an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Where water enters.
    Inlet,
    /// The level's outlet marker.
    Outlet,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inlet => f.write_str("inlet"),
            Self::Outlet => f.write_str("outlet"),
        }
    }
}

/// Complete configuration for constructing a
/// [`WaterSystem`](crate::WaterSystem).
///
/// ```
/// use seep_engine::WaterConfig;
///
/// let cfg = WaterConfig::new(40, 22, 16.0, 16.0).with_inlet(20, 20).with_outlet(3, 1);
/// assert!(cfg.validate().is_ok());
/// assert!(WaterConfig::new(40, 22, 16.0, 16.0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterConfig {
    /// Grid width in tiles.
    pub width: usize,
    /// Grid height in tiles.
    pub height: usize,
    /// Tile width in world units.
    pub tile_width: f32,
    /// Tile height in world units.
    pub tile_height: f32,
    /// Nominal inlet tile. Required.
    pub inlet: Option<TileCoord>,
    /// Outlet tile. Required; stored and reported, not simulated.
    pub outlet: Option<TileCoord>,
    /// Flow rates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flow: FlowConfig,
    /// Surface thresholds and palette.
    #[cfg_attr(feature = "serde", serde(default))]
    pub surface: SurfaceConfig,
    /// Pre-fill stream.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stream: StreamConfig,
}

impl WaterConfig {
    /// A config with default tuning and no anchors set.
    pub fn new(width: usize, height: usize, tile_width: f32, tile_height: f32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            inlet: None,
            outlet: None,
            flow: FlowConfig::default(),
            surface: SurfaceConfig::default(),
            stream: StreamConfig::default(),
        }
    }

    /// Set the nominal inlet.
    pub fn with_inlet(mut self, x: usize, y: usize) -> Self {
        self.inlet = Some(TileCoord::new(x, y));
        self
    }

    /// Set the outlet.
    pub fn with_outlet(mut self, x: usize, y: usize) -> Self {
        self.outlet = Some(TileCoord::new(x, y));
        self
    }

    /// Replace the flow tuning.
    pub fn with_flow(mut self, flow: FlowConfig) -> Self {
        self.flow = flow;
        self
    }

    /// Replace the surface tuning.
    pub fn with_surface(mut self, surface: SurfaceConfig) -> Self {
        self.surface = surface;
        self
    }

    /// Replace the stream tuning.
    pub fn with_stream(mut self, stream: StreamConfig) -> Self {
        self.stream = stream;
        self
    }

    /// Check every structural invariant before the simulator is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid shape and tile size.
        seep_space::TileGrid::new(self.width, self.height, self.tile_width, self.tile_height)?;
        // 2. Both anchors present and inside the grid.
        self.anchor(Anchor::Inlet, self.inlet)?;
        self.anchor(Anchor::Outlet, self.outlet)?;
        // 3. Tuning.
        self.flow.validate()?;
        self.surface.validate()?;
        self.stream.validate()?;
        Ok(())
    }

    /// Resolve an anchor or report why it is unusable.
    pub(crate) fn anchor(
        &self,
        anchor: Anchor,
        coord: Option<TileCoord>,
    ) -> Result<TileCoord, ConfigError> {
        let coord = coord.ok_or(ConfigError::MissingAnchor { anchor })?;
        if coord.x >= self.width || coord.y >= self.height {
            return Err(ConfigError::AnchorOutOfBounds {
                anchor,
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord)
    }
}

// ── ConfigError ─────────────────────────────────────────────────

/// Errors detected while validating a [`WaterConfig`].
///
/// Construction is the only fallible entry point of the simulator.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid shape or tile size is unusable.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    /// A tuning parameter is out of range.
    #[error("invalid tuning: {0}")]
    Param(#[from] ParamError),
    /// A required anchor tile was not configured.
    #[error("{anchor} anchor is not set")]
    MissingAnchor {
        /// Which anchor.
        anchor: Anchor,
    },
    /// An anchor lies outside the grid.
    #[error("{anchor} anchor {coord} is outside the {width}x{height} grid")]
    AnchorOutOfBounds {
        /// Which anchor.
        anchor: Anchor,
        /// The configured tile.
        coord: TileCoord,
        /// Grid width in tiles.
        width: usize,
        /// Grid height in tiles.
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> WaterConfig {
        WaterConfig::new(8, 6, 16.0, 16.0)
            .with_inlet(3, 4)
            .with_outlet(1, 1)
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_inlet() {
        let mut cfg = valid();
        cfg.inlet = None;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MissingAnchor {
                anchor: Anchor::Inlet
            })
        );
    }

    #[test]
    fn outlet_out_of_bounds() {
        let cfg = valid().with_outlet(8, 0);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AnchorOutOfBounds {
                anchor: Anchor::Outlet,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "outlet anchor (8, 0) is outside the 8x6 grid"
        );
    }

    #[test]
    fn empty_grid_is_a_grid_error() {
        let cfg = WaterConfig::new(0, 6, 16.0, 16.0).with_inlet(0, 0).with_outlet(0, 0);
        assert_eq!(cfg.validate(), Err(ConfigError::Grid(GridError::EmptyGrid)));
    }

    #[test]
    fn bad_tuning_is_a_param_error() {
        let flow = FlowConfig {
            flow_iterations: 0,
            ..FlowConfig::default()
        };
        assert_eq!(
            valid().with_flow(flow).validate(),
            Err(ConfigError::Param(ParamError::ZeroFlowIterations))
        );
        let stream = StreamConfig { gravity: 10.0 };
        assert!(matches!(
            valid().with_stream(stream).validate(),
            Err(ConfigError::Param(ParamError::InvalidThreshold {
                name: "gravity",
                ..
            }))
        ));
    }
}
