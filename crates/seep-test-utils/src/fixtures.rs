//! Reusable level fixtures.
//!
//! Levels are written top row first, the way they read on screen:
//!
//! - `#` wall
//! - `I` inlet (open)
//! - `O` outlet (open)
//! - anything else is open

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seep_core::{TileCoord, TileMask};
use seep_space::{ObstacleMap, TileGrid};

/// Default tile size used by fixtures, in world units.
pub const TILE: f32 = 16.0;

/// A parsed ASCII level.
#[derive(Clone, Debug)]
pub struct AsciiLevel {
    pub obstacles: ObstacleMap,
    pub inlet: Option<TileCoord>,
    pub outlet: Option<TileCoord>,
}

impl AsciiLevel {
    /// Parse rows (top first). Panics on ragged rows; fixtures are
    /// hand-written and a ragged row is always a typo.
    pub fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = TileMask::new(width, height, false);
        let mut inlet = None;
        let mut outlet = None;
        for (row_from_top, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "ragged fixture row {row_from_top}");
            let y = height - 1 - row_from_top;
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => cells[(x, y)] = true,
                    'I' => inlet = Some(TileCoord::new(x, y)),
                    'O' => outlet = Some(TileCoord::new(x, y)),
                    _ => {}
                }
            }
        }
        Self {
            obstacles: ObstacleMap::from_mask(cells),
            inlet,
            outlet,
        }
    }

    /// Grid matching this level with [`TILE`]-sized tiles.
    pub fn grid(&self) -> TileGrid {
        TileGrid::new(self.obstacles.width(), self.obstacles.height(), TILE, TILE)
            .expect("fixture levels are non-empty")
    }

    /// The inlet, panicking if the level has none.
    pub fn inlet(&self) -> TileCoord {
        self.inlet.expect("fixture has no 'I' tile")
    }
}

/// A closed box: a one-tile wall ring around a `(width-2) × (height-2)`
/// open interior.
pub fn walled_basin(width: usize, height: usize) -> ObstacleMap {
    let mut map = ObstacleMap::open(width, height);
    for x in 0..width {
        map.set(x, 0);
        map.set(x, height - 1);
    }
    for y in 0..height {
        map.set(0, y);
        map.set(width - 1, y);
    }
    map
}

/// Random walls at roughly `density`, deterministic for a given `seed`.
pub fn random_cavern(width: usize, height: usize, density: f64, seed: u64) -> ObstacleMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = ObstacleMap::open(width, height);
    for y in 0..height {
        for x in 0..width {
            if rng.gen_bool(density.clamp(0.0, 1.0)) {
                map.set(x, y);
            }
        }
    }
    map
}
