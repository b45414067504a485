//! Fixed-size tile grid with world-space geometry.

use seep_core::{GridError, TileCoord, TileField};
use smallvec::SmallVec;

/// 4-connected neighbour offsets in visiting order: east, west, north, south.
pub(crate) const OFFSETS_4: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A `width × height` grid of square-ish tiles.
///
/// Tile `(x, y)` spans world `[x·tw, (x+1)·tw) × [y·th, (y+1)·th)`; row 0
/// sits at world `y = 0` and rows grow upward. Neighbours are the four
/// cardinal directions; the grid edge absorbs (edge tiles simply have
/// fewer neighbours).
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_width: f32,
    tile_height: f32,
}

impl TileGrid {
    /// Maximum dimension: signed query APIs take `i32` tile indices.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a grid of `width × height` tiles, each `tile_width × tile_height`
    /// world units.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyGrid`] if either dimension is 0
    /// - [`GridError::DimensionTooLarge`] if either exceeds [`Self::MAX_DIM`]
    /// - [`GridError::InvalidTileSize`] if a tile size is not finite and positive
    ///
    /// # Examples
    ///
    /// ```
    /// use seep_space::TileGrid;
    ///
    /// let grid = TileGrid::new(40, 22, 16.0, 16.0).unwrap();
    /// assert_eq!(grid.tile_count(), 880);
    /// assert_eq!(grid.world_height(), 352.0);
    /// ```
    pub fn new(
        width: usize,
        height: usize,
        tile_width: f32,
        tile_height: f32,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(tile_width) || !valid(tile_height) {
            return Err(GridError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile width in world units.
    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Tile height in world units.
    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    /// `width * height`.
    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }

    /// Total world width.
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.tile_width
    }

    /// Total world height.
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.tile_height
    }

    /// `true` if `(x, y)` is a tile of this grid.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Convert a signed probe coordinate into a tile, or `None` off-grid.
    #[inline]
    pub fn checked(&self, tx: i32, ty: i32) -> Option<TileCoord> {
        TileCoord::checked(tx, ty, self.width, self.height)
    }

    /// `true` for tiles on the outermost ring.
    pub fn is_border(&self, c: TileCoord) -> bool {
        c.x == 0 || c.y == 0 || c.x + 1 == self.width || c.y + 1 == self.height
    }

    /// In-bounds 4-connected neighbours of `c` (east, west, north, south).
    pub fn neighbours(&self, c: TileCoord) -> SmallVec<[TileCoord; 4]> {
        OFFSETS_4
            .iter()
            .filter_map(|&(dx, dy)| c.offset(dx, dy, self.width, self.height))
            .collect()
    }

    /// Allocate a [`TileField`] shaped like this grid.
    pub fn field<T: Clone>(&self, value: T) -> TileField<T> {
        TileField::new(self.width, self.height, value)
    }

    /// World-space centre of a tile.
    pub fn tile_center(&self, c: TileCoord) -> [f32; 2] {
        [
            (c.x as f32 + 0.5) * self.tile_width,
            (c.y as f32 + 0.5) * self.tile_height,
        ]
    }

    /// World-space `y` of the bottom edge of row `y`.
    pub fn tile_bottom(&self, y: usize) -> f32 {
        y as f32 * self.tile_height
    }

    /// World-space position of grid vertex `(cx, cy)`, `0 ≤ cx ≤ width`.
    pub fn corner_position(&self, cx: usize, cy: usize) -> [f32; 2] {
        [cx as f32 * self.tile_width, cy as f32 * self.tile_height]
    }

    /// Map a world position to the tile containing it, clamped into the grid.
    ///
    /// Physics probes routinely sample just past the edge; clamping keeps
    /// them on the nearest edge tile instead of failing.
    pub fn world_to_tile(&self, wx: f32, wy: f32) -> TileCoord {
        let clamp_axis = |v: f32, size: f32, n: usize| -> usize {
            if !v.is_finite() || v <= 0.0 {
                return 0;
            }
            ((v / size) as usize).min(n - 1)
        };
        TileCoord::new(
            clamp_axis(wx, self.tile_width, self.width),
            clamp_axis(wy, self.tile_height, self.height),
        )
    }
}
