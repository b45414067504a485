//! Core types and traits for the Seep tile-water simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Seep workspace:
//! tile coordinates, the arena-indexed [`TileField`] grid store, the
//! [`ObstacleQuery`] capability, and shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod field;
pub mod obstacle;

pub use coord::TileCoord;
pub use error::{GridError, ParamError};
pub use field::{TileField, TileMask};
pub use obstacle::{FnObstacles, ObstacleQuery};
