//! Tile water simulator for Seep.
//!
//! [`WaterSystem`] ties the workspace together: it owns the obstacle
//! backend, connectivity masks, fill and flux fields, and the flow
//! pipeline, and exposes the per-frame [`update`](WaterSystem::update),
//! the [`on_level_changed`](WaterSystem::on_level_changed) notification,
//! and read-only queries for rendering and physics.
//!
//! ```
//! use seep_engine::{WaterConfig, WaterSystem};
//! use seep_space::ObstacleMap;
//!
//! // A closed 5x4 box with a 3x2 interior, inlet in the top interior row.
//! let walls = ObstacleMap::from_rows(&["#####", "#...#", "#...#", "#####"]);
//! let cfg = WaterConfig::new(5, 4, 16.0, 16.0).with_inlet(2, 2).with_outlet(1, 1);
//! let mut water = WaterSystem::new(cfg, walls).unwrap();
//!
//! while !water.is_active() {
//!     water.update(1.0 / 60.0);
//! }
//! water.update(1.0 / 60.0);
//! assert!(water.fill_field().sum() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buoyancy;
pub mod config;
pub mod metrics;
pub mod stream;
pub mod system;

pub use buoyancy::{BodySample, BuoyancyForce, BuoyancyProbe};
pub use config::{Anchor, ConfigError, StreamConfig, WaterConfig};
pub use metrics::StepMetrics;
pub use stream::{impact_height, FallingStream, InletStream};
pub use system::WaterSystem;
