//! Buoyancy for a floating body, read from simulator output.
//!
//! The physics engine stays outside this crate. A probe reads the local
//! surface height under the body and returns the force to apply.

use crate::system::WaterSystem;
use seep_core::ObstacleQuery;

/// Lift and drag tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuoyancyProbe {
    /// Upward acceleration at full submersion, per unit mass.
    pub strength: f32,
    /// Linear drag coefficient while submerged, per unit mass.
    pub drag: f32,
}

impl Default for BuoyancyProbe {
    fn default() -> Self {
        Self {
            strength: 25.0,
            drag: 4.0,
        }
    }
}

/// A body to probe, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySample {
    /// Centre of the body.
    pub center: [f32; 2],
    /// Half of the body's height.
    pub half_height: f32,
    /// Linear velocity.
    pub velocity: [f32; 2],
    /// Body mass.
    pub mass: f32,
}

/// Result of a probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuoyancyForce {
    /// Fraction of the body's height under the local surface, `[0, 1]`.
    pub submerged: f32,
    /// Force to apply at the body centre. Zero when not submerged.
    pub force: [f32; 2],
}

impl BuoyancyProbe {
    /// Sample `water` under `body`.
    ///
    /// Returns `None` while the system is in Pre-fill, when the tile under
    /// the body centre is not part of the water region, or when the body
    /// has no height.
    pub fn sample<O: ObstacleQuery>(
        &self,
        water: &WaterSystem<O>,
        body: &BodySample,
    ) -> Option<BuoyancyForce> {
        if !water.is_active() || !body.half_height.is_finite() || body.half_height <= 0.0 {
            return None;
        }
        let tile = water.grid().world_to_tile(body.center[0], body.center[1]);
        let (tx, ty) = (tile.x as i32, tile.y as i32);
        if !water.is_in_water_region(tx, ty) {
            return None;
        }

        let height = body.half_height * 2.0;
        let bottom = body.center[1] - body.half_height;
        let depth = (water.local_surface_height(tx, ty) - bottom).clamp(0.0, height);
        let submerged = depth / height;

        let force = if submerged > 0.0 {
            let m = body.mass;
            [
                -body.velocity[0] * self.drag * m,
                self.strength * submerged * m - body.velocity[1] * self.drag * m,
            ]
        } else {
            [0.0, 0.0]
        };
        Some(BuoyancyForce { submerged, force })
    }
}
