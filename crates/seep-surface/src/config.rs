//! Surface extraction thresholds and vertex shading palette.

use seep_core::ParamError;

/// Height gradient plus animated shimmer applied to mesh vertices.
///
/// Colour is interpolated from `deep` at world `y = 0` to `shallow` at the
/// top of the grid; the RGB channels then receive a shimmer offset
/// `sin(x·kx + t·wx)·ax + sin(y·ky + t·wy)·ay`. Alpha is not shimmered.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaterPalette {
    /// RGBA at the bottom of the grid.
    pub deep: [f32; 4],
    /// RGBA at the top of the grid.
    pub shallow: [f32; 4],
    /// Horizontal shimmer term: `[spatial frequency, temporal frequency, amplitude]`.
    pub shimmer_x: [f32; 3],
    /// Vertical shimmer term: `[spatial frequency, temporal frequency, amplitude]`.
    pub shimmer_y: [f32; 3],
}

impl Default for WaterPalette {
    fn default() -> Self {
        Self {
            deep: [0.04, 0.28, 0.78, 0.70],
            shallow: [0.20, 0.70, 1.00, 0.88],
            shimmer_x: [0.012, 1.4, 0.04],
            shimmer_y: [0.010, 1.1, 0.03],
        }
    }
}

impl WaterPalette {
    /// Colour for a vertex at world `(x, y)` at water time `time`.
    ///
    /// `world_height` is the total grid height used to normalise `y`.
    pub fn shade(&self, x: f32, y: f32, world_height: f32, time: f32) -> [f32; 4] {
        let t = if world_height > 0.0 {
            (y / world_height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let [kx, wx, ax] = self.shimmer_x;
        let [ky, wy, ay] = self.shimmer_y;
        let shimmer = (x * kx + time * wx).sin() * ax + (y * ky + time * wy).sin() * ay;
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        [
            lerp(self.deep[0], self.shallow[0]) + shimmer,
            lerp(self.deep[1], self.shallow[1]) + shimmer,
            lerp(self.deep[2], self.shallow[2]) + shimmer,
            lerp(self.deep[3], self.shallow[3]),
        ]
    }
}

/// Thresholds for the mesh and for waterfall / still-surface styling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Corner value at which water is considered present.
    pub iso_level: f32,
    /// Flux above which a tile is drawn as falling water.
    pub waterfall_flux_threshold: f32,
    /// Flux above which a tile is too turbulent for a surface highlight.
    pub surface_skip_flux: f32,
    /// Fill below which a tile is treated as dry for surface detection.
    pub surface_min_fill: f32,
    /// Vertex colouring.
    pub palette: WaterPalette,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            iso_level: 0.06,
            waterfall_flux_threshold: 0.02,
            surface_skip_flux: 0.015,
            surface_min_fill: 0.01,
            palette: WaterPalette::default(),
        }
    }
}

impl SurfaceConfig {
    /// All thresholds must be finite; `iso_level` must lie in `(0, 1]`.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_threshold("iso_level", self.iso_level, f32::MIN_POSITIVE, 1.0)?;
        ParamError::check_threshold(
            "waterfall_flux_threshold",
            self.waterfall_flux_threshold,
            0.0,
            f32::MAX,
        )?;
        ParamError::check_threshold("surface_skip_flux", self.surface_skip_flux, 0.0, f32::MAX)?;
        ParamError::check_threshold("surface_min_fill", self.surface_min_fill, 0.0, 1.0)?;
        Ok(())
    }
}
