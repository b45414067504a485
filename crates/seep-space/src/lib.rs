//! Tile-grid geometry, obstacle backends, and connectivity masks.
//!
//! # Geometry
//!
//! [`TileGrid`] fixes the grid dimensions and tile size, converts between
//! tile and world coordinates, and enumerates 4-connected neighbours.
//!
//! # Backends
//!
//! - [`ObstacleMap`]: dense owned boolean map, mutable at runtime
//! - [`LayeredObstacles`]: union of two backends (walls OR breakable blocks)
//!
//! # Connectivity
//!
//! [`ConnectivityMasks`] holds the `outside` and `reachable` flood fills
//! and the effective inlet after snapping. Masks are recomputed only on
//! construction and on explicit level-change notification.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod grid;
pub mod obstacles;

pub use connectivity::{find_nearest_interior, ConnectivityMasks};
pub use grid::TileGrid;
pub use obstacles::{LayeredObstacles, ObstacleMap};
