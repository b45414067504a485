//! Per-frame execution context handed to each [`FlowStage`](crate::FlowStage).

use seep_core::{ObstacleQuery, TileField};
use seep_space::{ConnectivityMasks, TileGrid};

/// The mutable simulation state: fill and downward flux per tile.
///
/// Allocated once for the grid lifetime and mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterFields {
    /// Fill fraction in `[0, 1]`.
    pub fill: TileField<f32>,
    /// Fill moved down out of each tile this frame.
    pub flux: TileField<f32>,
}

impl WaterFields {
    /// Dry fields shaped like `grid`.
    pub fn new(grid: &TileGrid) -> Self {
        Self {
            fill: grid.field(0.0),
            flux: grid.field(0.0),
        }
    }

    /// Zero both fields at `(x, y)`.
    #[inline]
    pub fn clear_tile(&mut self, x: usize, y: usize) {
        self.fill[(x, y)] = 0.0;
        self.flux[(x, y)] = 0.0;
    }
}

/// Fill accounting gathered while stages run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowTally {
    /// Fill added at the inlet.
    pub injected: f32,
    /// Fill removed by the outside drain and crumb cleanup.
    pub drained: f32,
    /// Fill discarded from tiles that can no longer hold water.
    pub purged: f32,
}

/// Everything a stage may touch during one frame.
///
/// Read-only inputs are handed out with the context lifetime so a stage
/// can hold them while mutating [`fields`](Self::fields).
pub struct FlowContext<'a> {
    grid: &'a TileGrid,
    obstacles: &'a dyn ObstacleQuery,
    masks: &'a ConnectivityMasks,
    dt: f32,
    /// The state being advanced.
    pub fields: &'a mut WaterFields,
    /// Running totals for this frame.
    pub tally: FlowTally,
}

impl<'a> FlowContext<'a> {
    /// Bundle a frame's inputs. `dt` is the full frame step in seconds.
    pub fn new(
        grid: &'a TileGrid,
        obstacles: &'a dyn ObstacleQuery,
        masks: &'a ConnectivityMasks,
        fields: &'a mut WaterFields,
        dt: f32,
    ) -> Self {
        Self {
            grid,
            obstacles,
            masks,
            dt,
            fields,
            tally: FlowTally::default(),
        }
    }

    /// Grid geometry.
    pub fn grid(&self) -> &'a TileGrid {
        self.grid
    }

    /// Obstacle backend.
    pub fn obstacles(&self) -> &'a dyn ObstacleQuery {
        self.obstacles
    }

    /// Connectivity masks, consistent with [`obstacles`](Self::obstacles).
    pub fn masks(&self) -> &'a ConnectivityMasks {
        self.masks
    }

    /// Frame step in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Open, reachable, and not outside. `false` off-grid.
    #[inline]
    pub fn can_hold_water(&self, x: usize, y: usize) -> bool {
        self.grid.contains(x, y) && self.masks.can_hold_water(self.obstacles, x, y)
    }
}
