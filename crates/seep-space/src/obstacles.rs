//! Concrete [`ObstacleQuery`] backends.

use seep_core::{ObstacleQuery, TileMask};

/// Dense, owned obstacle map: one `bool` per tile.
///
/// Reads outside the map answer `false` (open).
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleMap {
    cells: TileMask,
}

impl ObstacleMap {
    /// An all-open map of `width × height` tiles.
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            cells: TileMask::new(width, height, false),
        }
    }

    /// Wrap an existing mask (`true` = obstacle).
    pub fn from_mask(cells: TileMask) -> Self {
        Self { cells }
    }

    /// Build a map from text rows, top row first, `#` marking an obstacle.
    ///
    /// Rows shorter than the widest row are padded with open tiles.
    ///
    /// ```
    /// use seep_core::ObstacleQuery;
    /// use seep_space::ObstacleMap;
    ///
    /// let map = ObstacleMap::from_rows(&["#..", "###"]);
    /// assert!(map.is_obstacle(0, 1));
    /// assert!(map.is_open(1, 1));
    /// assert!(map.is_obstacle(2, 0));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut cells = TileMask::new(width, height, false);
        for (row_from_top, row) in rows.iter().enumerate() {
            let y = height - 1 - row_from_top;
            for (x, ch) in row.as_ref().chars().enumerate() {
                cells[(x, y)] = ch == '#';
            }
        }
        Self { cells }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Mark `(x, y)` as an obstacle. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize) {
        if let Some(c) = self.cells.get_mut(x, y) {
            *c = true;
        }
    }

    /// Open `(x, y)`. Out-of-bounds writes are ignored.
    pub fn clear(&mut self, x: usize, y: usize) {
        if let Some(c) = self.cells.get_mut(x, y) {
            *c = false;
        }
    }

    /// Flip `(x, y)`; returns the new state, or `None` out of bounds.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        let c = self.cells.get_mut(x, y)?;
        *c = !*c;
        Some(*c)
    }

    /// Number of obstacle tiles.
    pub fn obstacle_count(&self) -> usize {
        self.cells.count()
    }

    /// The underlying mask.
    pub fn as_mask(&self) -> &TileMask {
        &self.cells
    }
}

impl ObstacleQuery for ObstacleMap {
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        self.cells.get(x, y).copied().unwrap_or(false)
    }
}

/// Union of two backends: a tile is blocked if either layer blocks it.
///
/// The usual pairing is a static wall layer plus a layer of breakable
/// puzzle blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayeredObstacles<A, B> {
    /// Primary layer (typically level walls).
    pub base: A,
    /// Secondary layer (typically destructible blocks).
    pub overlay: B,
}

impl<A, B> LayeredObstacles<A, B> {
    /// Combine two layers.
    pub fn new(base: A, overlay: B) -> Self {
        Self { base, overlay }
    }
}

impl<A: ObstacleQuery, B: ObstacleQuery> ObstacleQuery for LayeredObstacles<A, B> {
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        self.base.is_obstacle(x, y) || self.overlay.is_obstacle(x, y)
    }
}
