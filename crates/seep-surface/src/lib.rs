//! Marching-squares water surface extraction and render classification.
//!
//! The per-tile fill field is blocky; renderers want a smooth body of
//! water. Each frame:
//!
//! 1. [`CornerField::rebuild`] averages valid-tile fill onto grid vertices
//! 2. [`SurfaceMesh::rebuild`] runs marching squares over every cell
//!    ([`marching::cell_polygons`]) and fan-triangulates the result into
//!    shaded vertices
//!
//! [`waterfall_runs`] and [`surface_runs`] classify tiles for ribbon and
//! highlight styling.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod corner;
pub mod marching;
pub mod mesh;

pub use classify::{is_surface_tile, surface_runs, waterfall_runs, SurfaceRun, WaterfallRun};
pub use config::{SurfaceConfig, WaterPalette};
pub use corner::CornerField;
pub use mesh::{MeshParams, SurfaceMesh, SurfaceVertex, MAX_TRIANGLES_PER_CELL};
