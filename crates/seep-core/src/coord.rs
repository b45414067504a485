//! Tile addressing.

use std::fmt;

/// Integer address of a tile: `x` is the column, `y` the row.
///
/// Row 0 is the bottom row; `y` increases upward. A `TileCoord` carries
/// no grid bounds of its own; use [`TileCoord::offset`] to step to a
/// neighbour while staying inside a `width × height` grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    /// Column index.
    pub x: usize,
    /// Row index (0 = bottom).
    pub y: usize,
}

impl TileCoord {
    /// Create a coordinate from column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step by `(dx, dy)`, returning `None` if the result leaves a
    /// `width × height` grid.
    ///
    /// ```
    /// use seep_core::TileCoord;
    ///
    /// let c = TileCoord::new(0, 2);
    /// assert_eq!(c.offset(1, -1, 4, 4), Some(TileCoord::new(1, 1)));
    /// assert_eq!(c.offset(-1, 0, 4, 4), None);
    /// ```
    pub fn offset(self, dx: i64, dy: i64, width: usize, height: usize) -> Option<Self> {
        let nx = self.x as i64 + dx;
        let ny = self.y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            return None;
        }
        Some(Self::new(nx as usize, ny as usize))
    }

    /// Chebyshev (L∞) distance: the ring radius at which `other` appears
    /// when expanding square rings around `self`.
    pub fn chebyshev(self, other: Self) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Signed-coordinate constructor used by query APIs that accept
    /// probes beyond the grid edge.
    ///
    /// Returns `None` for negative components or components at or past
    /// `width`/`height`.
    pub fn checked(tx: i32, ty: i32, width: usize, height: usize) -> Option<Self> {
        if tx < 0 || ty < 0 {
            return None;
        }
        let (x, y) = (tx as usize, ty as usize);
        (x < width && y < height).then_some(Self::new(x, y))
    }
}

impl From<(usize, usize)> for TileCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_in_bounds() {
        let c = TileCoord::new(2, 2);
        assert_eq!(c.offset(1, 0, 3, 3), None);
        assert_eq!(c.offset(0, 1, 3, 3), None);
        assert_eq!(c.offset(-2, -2, 3, 3), Some(TileCoord::new(0, 0)));
    }

    #[test]
    fn chebyshev_is_max_axis_delta() {
        let a = TileCoord::new(1, 5);
        assert_eq!(a.chebyshev(TileCoord::new(4, 4)), 3);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn checked_rejects_negative_and_overflowing() {
        assert_eq!(TileCoord::checked(-1, 0, 4, 4), None);
        assert_eq!(TileCoord::checked(0, 4, 4, 4), None);
        assert_eq!(TileCoord::checked(3, 3, 4, 4), Some(TileCoord::new(3, 3)));
    }

    #[test]
    fn display_is_tuple_like() {
        assert_eq!(TileCoord::new(3, 7).to_string(), "(3, 7)");
    }
}
