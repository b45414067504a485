//! Corner scalar field sampled at grid vertices.

use seep_core::{GridError, ObstacleQuery, TileField};
use seep_space::{ConnectivityMasks, TileGrid};

/// A `(W+1) × (H+1)` field, one value per tile-grid vertex.
///
/// Vertex `(cx, cy)` touches tiles `(cx-1, cy-1)`, `(cx, cy-1)`,
/// `(cx-1, cy)` and `(cx, cy)`. Its value is the mean fill of the touching
/// tiles that can hold water; tiles that cannot are excluded from both
/// sum and count, so fill never smears through walls. A vertex with no
/// contributing tile is 0.
#[derive(Clone, Debug, PartialEq)]
pub struct CornerField {
    values: TileField<f32>,
}

impl CornerField {
    /// A zeroed field for a `cells_w × cells_h` tile grid.
    pub fn new(cells_w: usize, cells_h: usize) -> Self {
        Self {
            values: TileField::new(cells_w + 1, cells_h + 1, 0.0),
        }
    }

    /// Wrap raw vertex values for a `cells_w × cells_h` tile grid.
    ///
    /// # Errors
    ///
    /// [`GridError::FieldSizeMismatch`] unless
    /// `values.len() == (cells_w + 1) * (cells_h + 1)`.
    pub fn from_values(cells_w: usize, cells_h: usize, values: Vec<f32>) -> Result<Self, GridError> {
        Ok(Self {
            values: TileField::from_vec(cells_w + 1, cells_h + 1, values)?,
        })
    }

    /// Build from the current fill field.
    pub fn build<O: ObstacleQuery + ?Sized>(
        grid: &TileGrid,
        fill: &TileField<f32>,
        masks: &ConnectivityMasks,
        obstacles: &O,
    ) -> Self {
        let mut field = Self::new(grid.width(), grid.height());
        field.rebuild(grid, fill, masks, obstacles);
        field
    }

    /// Recompute in place. The field must have been sized for `grid`.
    pub fn rebuild<O: ObstacleQuery + ?Sized>(
        &mut self,
        grid: &TileGrid,
        fill: &TileField<f32>,
        masks: &ConnectivityMasks,
        obstacles: &O,
    ) {
        let (w, h) = (grid.width(), grid.height());
        if self.values.width() != w + 1 || self.values.height() != h + 1 {
            self.values = TileField::new(w + 1, h + 1, 0.0);
        }

        // Per-tile contribution, `None` for tiles that hold no water.
        let sample = |tx: Option<usize>, ty: Option<usize>| -> Option<f32> {
            let (tx, ty) = (tx?, ty?);
            if tx >= w || ty >= h || !masks.can_hold_water(obstacles, tx, ty) {
                return None;
            }
            Some(fill[(tx, ty)])
        };

        for cy in 0..=h {
            for cx in 0..=w {
                let (left, right) = (cx.checked_sub(1), Some(cx));
                let (below, above) = (cy.checked_sub(1), Some(cy));
                let mut sum = 0.0;
                let mut weight = 0u32;
                for v in [
                    sample(left, below),
                    sample(right, below),
                    sample(left, above),
                    sample(right, above),
                ]
                .into_iter()
                .flatten()
                {
                    sum += v;
                    weight += 1;
                }
                self.values[(cx, cy)] = if weight == 0 { 0.0 } else { sum / weight as f32 };
            }
        }
    }

    /// Cells across (`W`).
    pub fn cells_w(&self) -> usize {
        self.values.width() - 1
    }

    /// Cells up (`H`).
    pub fn cells_h(&self) -> usize {
        self.values.height() - 1
    }

    /// Value at vertex `(cx, cy)`.
    #[inline]
    pub fn get(&self, cx: usize, cy: usize) -> f32 {
        self.values[(cx, cy)]
    }

    /// Corner values of cell `(x, y)` in order bottom-left, bottom-right,
    /// top-right, top-left.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> [f32; 4] {
        [
            self.values[(x, y)],
            self.values[(x + 1, y)],
            self.values[(x + 1, y + 1)],
            self.values[(x, y + 1)],
        ]
    }

    /// Flat vertex values, row-major from the bottom.
    pub fn as_slice(&self) -> &[f32] {
        self.values.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seep_core::TileCoord;
    use seep_space::ObstacleMap;

    #[test]
    fn walls_do_not_dilute_corners() {
        let map = ObstacleMap::from_rows(&["####", "#..#", "####"]);
        let grid = TileGrid::new(4, 3, 1.0, 1.0).unwrap();
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(1, 1));
        let mut fill = grid.field(0.0);
        fill[(1, 1)] = 0.8;
        fill[(2, 1)] = 0.4;
        // Stale fill in a wall must be ignored.
        fill[(0, 1)] = 1.0;

        let corners = CornerField::build(&grid, &fill, &masks, &map);
        // Vertex (1, 1) touches only (1, 1) among valid tiles.
        assert!((corners.get(1, 1) - 0.8).abs() < 1e-6);
        // Vertex (2, 1) averages the two basin tiles.
        assert!((corners.get(2, 1) - 0.6).abs() < 1e-6);
        // Vertex (0, 0) touches only walls.
        assert_eq!(corners.get(0, 0), 0.0);
    }

    #[test]
    fn cell_corner_order() {
        let c = CornerField::from_values(1, 1, vec![0.1, 0.2, 0.4, 0.3]).unwrap();
        assert_eq!(c.cell(0, 0), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!((c.cells_w(), c.cells_h()), (1, 1));
    }

    #[test]
    fn from_values_checks_length() {
        assert!(CornerField::from_values(2, 2, vec![0.0; 8]).is_err());
    }
}
