//! Test utilities and mock obstacle backends for Seep development.
//!
//! - [`fixtures`]: ASCII level parsing, walled basins, seeded caverns.
//! - [`CountingObstacles`]: wraps a backend and counts queries, for
//!   checking that masks are not rebuilt behind the caller's back.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{random_cavern, walled_basin, AsciiLevel, TILE};

use seep_core::ObstacleQuery;
use std::cell::Cell;

/// Forwards to an inner backend and counts every `is_obstacle` call.
pub struct CountingObstacles<O> {
    pub inner: O,
    calls: Cell<usize>,
}

impl<O> CountingObstacles<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Queries answered since construction or the last [`reset`](Self::reset).
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl<O: ObstacleQuery> ObstacleQuery for CountingObstacles<O> {
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.inner.is_obstacle(x, y)
    }
}
