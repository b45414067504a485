//! Outside / reachable flood fills and inlet snapping.
//!
//! Both masks are plain breadth-first flood fills over the tile arena with
//! the visited state folded into the mask itself. They are O(W·H) and are
//! only rebuilt when the obstacle layout changes, never per frame.

use crate::grid::TileGrid;
use seep_core::{GridError, ObstacleQuery, TileCoord, TileMask};
use std::collections::VecDeque;

/// The two connectivity masks plus the inlet they were computed from.
///
/// - `outside`: open tiles connected to the grid border through open tiles.
///   Water reaching these is considered drained.
/// - `reachable`: open tiles connected to the effective inlet through open
///   tiles, regardless of `outside`.
///
/// A tile can hold water iff it is open, reachable, and not outside.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectivityMasks {
    outside: TileMask,
    reachable: TileMask,
    nominal_inlet: TileCoord,
    inlet: TileCoord,
}

impl ConnectivityMasks {
    /// Run both flood fills for `grid` against the current obstacles.
    ///
    /// `nominal_inlet` is clamped into the grid. If it is blocked or
    /// outside, the effective inlet is snapped with
    /// [`find_nearest_interior`].
    ///
    /// ```
    /// use seep_space::{ConnectivityMasks, ObstacleMap, TileGrid};
    /// use seep_core::TileCoord;
    ///
    /// // A closed 4x3 box with a two-tile interior.
    /// let walls = ObstacleMap::from_rows(&["####", "#..#", "####"]);
    /// let grid = TileGrid::new(4, 3, 1.0, 1.0).unwrap();
    /// let masks = ConnectivityMasks::compute(&grid, &walls, TileCoord::new(1, 1));
    /// assert!(masks.is_reachable(2, 1));
    /// assert_eq!(masks.outside().count(), 0);
    /// ```
    pub fn compute<O: ObstacleQuery + ?Sized>(
        grid: &TileGrid,
        obstacles: &O,
        nominal_inlet: TileCoord,
    ) -> Self {
        let nominal_inlet = TileCoord::new(
            nominal_inlet.x.min(grid.width() - 1),
            nominal_inlet.y.min(grid.height() - 1),
        );
        let mut masks = Self {
            outside: grid.field(false),
            reachable: grid.field(false),
            nominal_inlet,
            inlet: nominal_inlet,
        };
        masks.recompute(grid, obstacles);
        masks
    }

    /// Rebuild both masks in place after the obstacle layout changed.
    ///
    /// Snapping always starts again from the nominal inlet, so an inlet
    /// that was relocated returns home once its tile is valid again.
    pub fn recompute<O: ObstacleQuery + ?Sized>(&mut self, grid: &TileGrid, obstacles: &O) {
        flood_outside(grid, obstacles, &mut self.outside);
        self.inlet = find_nearest_interior(grid, obstacles, &self.outside, self.nominal_inlet);
        if self.inlet != self.nominal_inlet {
            tracing::debug!(
                nominal = %self.nominal_inlet,
                effective = %self.inlet,
                "inlet relocated"
            );
        }
        flood_reachable(grid, obstacles, self.inlet, &mut self.reachable);
    }

    /// Assemble masks directly, bypassing the flood fills.
    ///
    /// Used to drive flow stages against hand-built topologies.
    ///
    /// # Errors
    ///
    /// [`GridError::FieldSizeMismatch`] if the two masks differ in shape.
    pub fn from_parts(
        outside: TileMask,
        reachable: TileMask,
        inlet: TileCoord,
    ) -> Result<Self, GridError> {
        if outside.width() != reachable.width() || outside.height() != reachable.height() {
            return Err(GridError::FieldSizeMismatch {
                expected: outside.len(),
                actual: reachable.len(),
            });
        }
        Ok(Self {
            outside,
            reachable,
            nominal_inlet: inlet,
            inlet,
        })
    }

    /// The `outside` mask.
    pub fn outside(&self) -> &TileMask {
        &self.outside
    }

    /// The `reachable` mask.
    pub fn reachable(&self) -> &TileMask {
        &self.reachable
    }

    /// Effective inlet after snapping.
    pub fn inlet(&self) -> TileCoord {
        self.inlet
    }

    /// Inlet as configured.
    pub fn nominal_inlet(&self) -> TileCoord {
        self.nominal_inlet
    }

    /// `true` if snapping moved the inlet away from its nominal tile.
    pub fn is_relocated(&self) -> bool {
        self.inlet != self.nominal_inlet
    }

    /// Outside flag; `false` out of bounds.
    #[inline]
    pub fn is_outside(&self, x: usize, y: usize) -> bool {
        self.outside.get(x, y).copied().unwrap_or(false)
    }

    /// Reachable flag; `false` out of bounds.
    #[inline]
    pub fn is_reachable(&self, x: usize, y: usize) -> bool {
        self.reachable.get(x, y).copied().unwrap_or(false)
    }

    /// Open, reachable, and not outside.
    #[inline]
    pub fn can_hold_water<O: ObstacleQuery + ?Sized>(
        &self,
        obstacles: &O,
        x: usize,
        y: usize,
    ) -> bool {
        self.is_reachable(x, y) && !self.is_outside(x, y) && !obstacles.is_obstacle(x, y)
    }

    /// `true` if any 4-neighbour of `(x, y)` is an outside tile.
    ///
    /// Outside tiles are open by construction, so no obstacle lookup is
    /// needed.
    pub fn touches_outside(&self, x: usize, y: usize) -> bool {
        let w = self.outside.width();
        let h = self.outside.height();
        (x + 1 < w && self.outside[(x + 1, y)])
            || (x > 0 && self.outside[(x - 1, y)])
            || (y + 1 < h && self.outside[(x, y + 1)])
            || (y > 0 && self.outside[(x, y - 1)])
    }
}

/// Nearest tile to `start` that is open and not outside.
///
/// Returns `start` itself when it already qualifies. Otherwise searches
/// square (Chebyshev) rings of radius `1 .. max(W, H)`, scanning each
/// ring bottom row first and left to right within a row. Falls back to
/// `start` when no tile in the grid qualifies.
pub fn find_nearest_interior<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    obstacles: &O,
    outside: &TileMask,
    start: TileCoord,
) -> TileCoord {
    let valid = |x: usize, y: usize| !obstacles.is_obstacle(x, y) && !outside[(x, y)];
    if valid(start.x, start.y) {
        return start;
    }
    let (sx, sy) = (start.x as i64, start.y as i64);
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    for r in 1..w.max(h) {
        for y in (sy - r)..=(sy + r) {
            if y < 0 || y >= h {
                continue;
            }
            let on_edge_row = (y - sy).abs() == r;
            let mut x = sx - r;
            while x <= sx + r {
                if x >= 0 && x < w && valid(x as usize, y as usize) {
                    return TileCoord::new(x as usize, y as usize);
                }
                // Interior rows only touch the ring at their two ends.
                x += if on_edge_row || x == sx + r { 1 } else { 2 * r };
            }
        }
    }
    start
}

/// Flood `outside` from every open border tile.
fn flood_outside<O: ObstacleQuery + ?Sized>(grid: &TileGrid, obstacles: &O, outside: &mut TileMask) {
    outside.fill(false);
    let mut queue = VecDeque::new();
    let (w, h) = (grid.width(), grid.height());

    let mut seed = |x: usize, y: usize, outside: &mut TileMask| {
        if !outside[(x, y)] && !obstacles.is_obstacle(x, y) {
            outside[(x, y)] = true;
            queue.push_back(TileCoord::new(x, y));
        }
    };
    for x in 0..w {
        seed(x, 0, outside);
        seed(x, h - 1, outside);
    }
    for y in 0..h {
        seed(0, y, outside);
        seed(w - 1, y, outside);
    }

    spread(grid, obstacles, outside, queue);
}

/// Flood `reachable` from the effective inlet.
fn flood_reachable<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    obstacles: &O,
    inlet: TileCoord,
    reachable: &mut TileMask,
) {
    reachable.fill(false);
    if obstacles.is_obstacle(inlet.x, inlet.y) {
        return;
    }
    reachable[inlet] = true;
    spread(grid, obstacles, reachable, VecDeque::from([inlet]));
}

/// Breadth-first spread through open tiles; `mask` doubles as the visited set.
fn spread<O: ObstacleQuery + ?Sized>(
    grid: &TileGrid,
    obstacles: &O,
    mask: &mut TileMask,
    mut queue: VecDeque<TileCoord>,
) {
    while let Some(c) = queue.pop_front() {
        for n in grid.neighbours(c) {
            if !mask[n] && !obstacles.is_obstacle(n.x, n.y) {
                mask[n] = true;
                queue.push_back(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleMap;

    fn setup(rows: &[&str]) -> (TileGrid, ObstacleMap) {
        let map = ObstacleMap::from_rows(rows);
        let grid = TileGrid::new(map.width(), map.height(), 16.0, 16.0).unwrap();
        (grid, map)
    }

    #[test]
    fn all_open_grid_is_entirely_outside() {
        let (grid, map) = setup(&["...", "...", "..."]);
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(1, 1));
        assert_eq!(masks.outside().count(), 9);
        // Nothing qualifies, so the inlet falls back to its nominal tile.
        assert_eq!(masks.inlet(), TileCoord::new(1, 1));
        assert_eq!(masks.reachable().count(), 9);
    }

    #[test]
    fn walls_block_the_outside_flood() {
        let (grid, map) = setup(&[
            ".....", //
            ".###.", //
            ".#.#.", //
            ".###.", //
            ".....",
        ]);
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(2, 2));
        assert!(!masks.is_outside(2, 2));
        assert!(masks.is_outside(0, 0));
        assert!(!masks.is_outside(1, 1), "obstacles are never outside");
        assert_eq!(masks.reachable().count(), 1);
        assert!(masks.can_hold_water(&map, 2, 2));
        assert!(!masks.can_hold_water(&map, 0, 0));
    }

    #[test]
    fn reachable_ignores_outside() {
        // Open gap in the top wall: the basin is outside, but still reachable.
        let (grid, map) = setup(&["#.##", "#..#", "####"]);
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(1, 1));
        assert!(masks.is_outside(2, 1));
        assert!(masks.is_reachable(2, 1));
        assert!(masks.is_reachable(1, 2));
    }

    #[test]
    fn blocked_inlet_snaps_to_nearest_interior() {
        let (grid, map) = setup(&[
            "#####", //
            "##..#", //
            "##..#", //
            "#####",
        ]);
        // Nominal inlet (1, 2) is a wall; ring 1 first hits (2, 1) scanning
        // bottom row first, left to right.
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(1, 2));
        assert!(masks.is_relocated());
        assert_eq!(masks.inlet(), TileCoord::new(2, 1));
        assert_eq!(masks.nominal_inlet(), TileCoord::new(1, 2));
        assert_eq!(masks.reachable().count(), 4);
    }

    #[test]
    fn ring_search_skips_ring_interior() {
        let (grid, map) = setup(&[
            "#######", //
            "#.#####", //
            "#######", //
            "#######", //
            "#######",
        ]);
        let outside = grid.field(false);
        // Start at (3, 2); the only open tile (1, 3) is at radius 2.
        let found = find_nearest_interior(&grid, &map, &outside, TileCoord::new(3, 2));
        assert_eq!(found, TileCoord::new(1, 3));
    }

    #[test]
    fn recompute_returns_inlet_home() {
        let (grid, mut map) = setup(&["#####", "#...#", "#...#", "#####"]);
        map.set(2, 2);
        let mut masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(2, 2));
        assert!(masks.is_relocated());
        map.clear(2, 2);
        masks.recompute(&grid, &map);
        assert_eq!(masks.inlet(), TileCoord::new(2, 2));
    }

    #[test]
    fn touches_outside_checks_four_neighbours() {
        let mut outside = TileMask::new(3, 3, false);
        outside[(0, 1)] = true;
        let masks =
            ConnectivityMasks::from_parts(outside, TileMask::new(3, 3, true), TileCoord::new(1, 1))
                .unwrap();
        assert!(masks.touches_outside(1, 1));
        assert!(!masks.touches_outside(2, 1));
        assert!(!masks.touches_outside(1, 0), "diagonal does not count");
    }

    #[test]
    fn from_parts_rejects_mismatched_shapes() {
        let r = ConnectivityMasks::from_parts(
            TileMask::new(2, 2, false),
            TileMask::new(3, 2, false),
            TileCoord::new(0, 0),
        );
        assert!(r.is_err());
    }
}
