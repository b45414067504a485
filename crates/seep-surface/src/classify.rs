//! Waterfall and still-surface classification for rendering.
//!
//! Both passes are stateless: they read this frame's fill and flux and
//! return fresh run lists.

use crate::config::SurfaceConfig;
use seep_core::{ObstacleQuery, TileField};
use seep_space::TileGrid;

/// A vertical run of falling-water tiles in one column.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterfallRun {
    /// Column index.
    pub column: usize,
    /// Lowest tile row in the run.
    pub row_start: usize,
    /// One past the highest tile row in the run.
    pub row_end: usize,
    /// Largest flux in the run.
    pub peak_flux: f32,
    /// World `x` of the column centre.
    pub center_x: f32,
    /// World `y` of the run's bottom edge.
    pub bottom: f32,
    /// World `y` of the run's top edge.
    pub top: f32,
    /// Ribbon width, `clamp(7 + 18·peak, 7, 16)`.
    pub width: f32,
    /// Ribbon opacity, `clamp(0.18 + 1.2·peak, 0.18, 0.85)`.
    pub alpha: f32,
}

/// A horizontal run of still-surface tiles in one row.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceRun {
    /// Tile row.
    pub row: usize,
    /// First column in the run.
    pub x0: usize,
    /// Last column in the run (inclusive).
    pub x1: usize,
    /// World surface height per column, `x0..=x1`.
    pub heights: Vec<f32>,
}

impl SurfaceRun {
    /// Number of tiles in the run.
    pub fn len(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    /// Always `false`; runs hold at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Contiguous per-column runs whose flux exceeds the waterfall threshold.
///
/// Runs no taller than one world unit are dropped.
pub fn waterfall_runs(
    grid: &TileGrid,
    flux: &TileField<f32>,
    config: &SurfaceConfig,
) -> Vec<WaterfallRun> {
    let threshold = config.waterfall_flux_threshold;
    let th = grid.tile_height();
    let mut runs = Vec::new();

    for x in 0..grid.width() {
        let mut y = 0;
        while y < grid.height() {
            if flux[(x, y)] <= threshold {
                y += 1;
                continue;
            }
            let start = y;
            let mut peak = flux[(x, y)];
            while y < grid.height() && flux[(x, y)] > threshold {
                peak = peak.max(flux[(x, y)]);
                y += 1;
            }
            let bottom = start as f32 * th;
            let top = y as f32 * th;
            if top - bottom <= 1.0 {
                continue;
            }
            runs.push(WaterfallRun {
                column: x,
                row_start: start,
                row_end: y,
                peak_flux: peak,
                center_x: (x as f32 + 0.5) * grid.tile_width(),
                bottom,
                top,
                width: (7.0 + peak * 18.0).clamp(7.0, 16.0),
                alpha: (0.18 + peak * 1.2).clamp(0.18, 0.85),
            });
        }
    }
    runs
}

/// `true` if tile `(x, y)` shows a still water surface.
///
/// The tile must hold more than `surface_min_fill`, be calm (flux at most
/// `surface_skip_flux`), and have nothing wet directly above: the top
/// edge, a wall, or a tile at or below `surface_min_fill`.
pub fn is_surface_tile<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    fill: &TileField<f32>,
    flux: &TileField<f32>,
    obstacles: &O,
    config: &SurfaceConfig,
    x: usize,
    y: usize,
) -> bool {
    let w = fill[(x, y)];
    if w <= config.surface_min_fill || flux[(x, y)] > config.surface_skip_flux {
        return false;
    }
    y + 1 == grid.height()
        || obstacles.is_obstacle(x, y + 1)
        || fill[(x, y + 1)] <= config.surface_min_fill
}

/// Contiguous per-row runs of still-surface tiles.
pub fn surface_runs<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    fill: &TileField<f32>,
    flux: &TileField<f32>,
    obstacles: &O,
    config: &SurfaceConfig,
) -> Vec<SurfaceRun> {
    let th = grid.tile_height();
    let mut runs = Vec::new();
    for y in 0..grid.height() {
        let mut current: Option<SurfaceRun> = None;
        for x in 0..grid.width() {
            if is_surface_tile(grid, fill, flux, obstacles, config, x, y) {
                let height = grid.tile_bottom(y) + fill[(x, y)] * th;
                match current.as_mut() {
                    Some(run) => {
                        run.x1 = x;
                        run.heights.push(height);
                    }
                    None => {
                        current = Some(SurfaceRun {
                            row: y,
                            x0: x,
                            x1: x,
                            heights: vec![height],
                        });
                    }
                }
            } else if let Some(run) = current.take() {
                runs.push(run);
            }
        }
        if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs
}
