//! Cellular-automaton flow stages for the Seep tile-water simulator.
//!
//! # Frame order
//!
//! [`FlowPipeline::standard`] runs, once per frame:
//!
//! 1. [`PurgeInvalid`]: zero fill and flux on tiles that cannot hold water
//! 2. [`ResetFlux`]: clear last frame's downward flux
//! 3. [`SourceInjection`]: add fill at the effective inlet
//! 4. [`IteratedTransfer`]: `flow_iterations` sweeps of fall + lateral spread
//! 5. [`OutsideDrain`]: leak fill next to outside space
//! 6. [`CrumbCleanup`]: snap tiny residues next to outside space
//!
//! Quantities are tile fractions; nothing here enforces global mass
//! conservation, but no stage creates fill except the source.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod drain;
pub mod pipeline;
pub mod purge;
pub mod source;
pub mod stage;
pub mod transfer;

pub use config::FlowConfig;
pub use context::{FlowContext, FlowTally, WaterFields};
pub use drain::{CrumbCleanup, OutsideDrain};
pub use pipeline::{FlowPipeline, StageTiming};
pub use purge::{purge_invalid, PurgeInvalid, ResetFlux};
pub use source::SourceInjection;
pub use stage::FlowStage;
pub use transfer::IteratedTransfer;
