//! Pre-fill falling stream.
//!
//! Before the grid simulation starts, water is a column falling from the
//! inlet. The head accelerates under gravity until it reaches the impact
//! height, at which point the system latches into the Active state.

use seep_core::{ObstacleQuery, TileCoord};
use seep_space::TileGrid;

/// Kinematic state of the falling stream head, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallingStream {
    top: f32,
    y: f32,
    vy: f32,
    impact: f32,
    landed: bool,
}

impl FallingStream {
    /// A stream at rest at `top`, falling toward `impact`.
    pub fn new(top: f32, impact: f32) -> Self {
        Self {
            top,
            y: top,
            vy: 0.0,
            impact,
            landed: false,
        }
    }

    /// Integrate one step. Returns `true` on the step the head lands.
    ///
    /// Once landed the stream is frozen and later calls return `false`.
    pub fn advance(&mut self, dt: f32, gravity: f32) -> bool {
        if self.landed {
            return false;
        }
        self.vy += gravity * dt;
        self.y += self.vy * dt;
        if self.y <= self.impact {
            self.y = self.impact;
            self.vy = 0.0;
            self.landed = true;
            return true;
        }
        false
    }

    /// Move the impact point. Ignored once the stream has landed.
    pub fn set_impact(&mut self, impact: f32) {
        if !self.landed {
            self.impact = impact;
        }
    }

    /// Move the stream origin, e.g. after the inlet was relocated.
    ///
    /// A head that has not started falling follows the origin.
    pub fn set_top(&mut self, top: f32) {
        if !self.landed && self.y == self.top && self.vy == 0.0 {
            self.y = top;
        }
        self.top = top;
    }

    /// World `y` the stream falls from.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Current head position.
    pub fn head(&self) -> f32 {
        self.y
    }

    /// Current vertical velocity.
    pub fn velocity(&self) -> f32 {
        self.vy
    }

    /// World `y` where the stream lands.
    pub fn impact(&self) -> f32 {
        self.impact
    }

    /// `true` once the head reached the impact point.
    pub fn has_landed(&self) -> bool {
        self.landed
    }
}

/// Vertical extent of the inlet ribbon, for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InletStream {
    /// World `x` of the inlet column centre.
    pub x: f32,
    /// World `y` the ribbon starts at.
    pub top: f32,
    /// World `y` the ribbon currently reaches.
    pub bottom: f32,
}

/// Height at which water falling from `inlet` first meets a solid tile.
///
/// Scans the inlet column downward from the row below the inlet; the
/// result is the top edge of the first obstacle found, capped one unit
/// below the inlet centre. `0.0` when the column is open to the bottom.
pub fn impact_height<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    obstacles: &O,
    inlet: TileCoord,
) -> f32 {
    let th = grid.tile_height();
    let center_y = grid.tile_center(inlet)[1];
    (0..inlet.y)
        .rev()
        .find(|&y| obstacles.is_obstacle(inlet.x, y))
        .map_or(0.0, |y| ((y + 1) as f32 * th).min(center_y - 1.0))
}
