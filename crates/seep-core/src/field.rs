//! Arena-indexed per-tile storage.
//!
//! Every per-tile quantity in the simulator (fill, flux, connectivity
//! masks) lives in a [`TileField`]: one flat row-major `Vec<T>` addressed
//! by `y * width + x`. Row 0 is the bottom row. Fields are allocated once
//! for the lifetime of a grid and mutated in place; they never resize.

use crate::coord::TileCoord;
use crate::error::GridError;
use std::ops::{Index, IndexMut};

/// A dense `width × height` grid of values in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct TileField<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Boolean per-tile mask (outside, reachable, obstacle snapshots).
pub type TileMask = TileField<bool>;

impl<T: Clone> TileField<T> {
    /// Allocate a field with every tile set to `value`.
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Reset every tile to `value` without reallocating.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> TileField<T> {
    /// Wrap an existing row-major buffer.
    ///
    /// Returns [`GridError::FieldSizeMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, GridError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(GridError::FieldSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
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

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for a zero-area field.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(x, y)`. Callers must pass in-bounds coordinates.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y * self.width + x
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(&self, index: usize) -> TileCoord {
        TileCoord::new(index % self.width, index / self.width)
    }

    /// `true` if `(x, y)` addresses a tile of this field.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Bounds-checked read.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Bounds-checked mutable access.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.contains(x, y) {
            Some(&mut self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// The backing buffer, row-major from the bottom row.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the backing buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate `(coord, value)` pairs in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = (TileCoord, &T)> + '_ {
        let w = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (TileCoord::new(i % w, i / w), v))
    }
}

impl TileField<bool> {
    /// Number of tiles set to `true`.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}

impl TileField<f32> {
    /// Sum of all tile values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

impl<T> Index<TileCoord> for TileField<T> {
    type Output = T;

    #[inline]
    fn index(&self, c: TileCoord) -> &T {
        &self.data[self.index_of(c.x, c.y)]
    }
}

impl<T> IndexMut<TileCoord> for TileField<T> {
    #[inline]
    fn index_mut(&mut self, c: TileCoord) -> &mut T {
        let i = self.index_of(c.x, c.y);
        &mut self.data[i]
    }
}

impl<T> Index<(usize, usize)> for TileField<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[self.index_of(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for TileField<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let i = self.index_of(x, y);
        &mut self.data[i]
    }
}
