//! Seep: tile-based water simulation for 2D games.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Seep sub-crates. For most users, adding `seep` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use seep::prelude::*;
//!
//! // A sealed 5x3 chamber under open sky, inlet in its top row.
//! let level = ObstacleMap::from_rows(&[
//!     ".......",
//!     "#######",
//!     "#.....#",
//!     "#.....#",
//!     "#.....#",
//!     "#######",
//! ]);
//! let config = WaterConfig::new(7, 6, 16.0, 16.0)
//!     .with_inlet(3, 3)
//!     .with_outlet(1, 1);
//! let mut water = WaterSystem::new(config, level).unwrap();
//!
//! for _ in 0..240 {
//!     water.update(1.0 / 60.0);
//! }
//! assert!(water.is_active());
//!
//! // The sky row is outside; the chamber holds water.
//! assert!(water.masks().is_outside(3, 5));
//! assert!(water.get_fill(3, 1) > 0.0);
//! let mesh = water.build_mesh();
//! assert!(mesh.triangle_count() > 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `seep-core` | Tile coordinates, tile fields, the obstacle trait, errors |
//! | [`space`] | `seep-space` | Grid geometry, obstacle maps, connectivity masks |
//! | [`flow`] | `seep-flow` | Flow stages and the per-frame pipeline |
//! | [`surface`] | `seep-surface` | Marching squares, surface mesh, waterfall classification |
//! | [`engine`] | `seep-engine` | The water system, configuration, buoyancy |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`seep-core`).
///
/// [`types::TileCoord`], [`types::TileField`], and the
/// [`types::ObstacleQuery`] capability.
pub use seep_core as types;

/// Grid geometry and connectivity (`seep-space`).
pub use seep_space as space;

/// Flow stages (`seep-flow`).
///
/// Implement [`flow::FlowStage`] to extend or replace the standard
/// [`flow::FlowPipeline`].
pub use seep_flow as flow;

/// Surface extraction and render classification (`seep-surface`).
pub use seep_surface as surface;

/// The simulator (`seep-engine`).
pub use seep_engine as engine;

/// Common imports for typical Seep usage.
///
/// ```rust
/// use seep::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use seep_core::{FnObstacles, GridError, ObstacleQuery, ParamError, TileCoord, TileField};

    // Space
    pub use seep_space::{ConnectivityMasks, LayeredObstacles, ObstacleMap, TileGrid};

    // Flow
    pub use seep_flow::FlowConfig;

    // Surface
    pub use seep_surface::{SurfaceConfig, SurfaceMesh, SurfaceRun, SurfaceVertex, WaterfallRun};

    // Engine
    pub use seep_engine::{
        BodySample, BuoyancyProbe, ConfigError, StepMetrics, StreamConfig, WaterConfig,
        WaterSystem,
    };
}
