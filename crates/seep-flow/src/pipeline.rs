//! Ordered stage list executed once per frame.

use crate::config::FlowConfig;
use crate::context::FlowContext;
use crate::drain::{CrumbCleanup, OutsideDrain};
use crate::purge::{PurgeInvalid, ResetFlux};
use crate::source::SourceInjection;
use crate::stage::FlowStage;
use crate::transfer::IteratedTransfer;
use std::time::Instant;

/// Wall-clock time spent in one stage, in microseconds.
pub type StageTiming = (String, u64);

/// An ordered list of [`FlowStage`]s.
pub struct FlowPipeline {
    stages: Vec<Box<dyn FlowStage>>,
}

impl FlowPipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard frame: purge, reset flux, source, transfer, drain, crumbs.
    pub fn standard(config: &FlowConfig) -> Self {
        Self::new()
            .with_stage(PurgeInvalid)
            .with_stage(ResetFlux)
            .with_stage(SourceInjection::new(config.source_rate))
            .with_stage(IteratedTransfer {
                down_rate: config.down_rate,
                side_rate: config.side_rate,
                iterations: config.flow_iterations,
                lateral_threshold: config.lateral_threshold,
            })
            .with_stage(OutsideDrain {
                rate: config.leak_rate,
            })
            .with_stage(CrumbCleanup {
                epsilon: config.crumb_epsilon,
            })
    }

    /// Append a stage (builder style).
    pub fn with_stage(mut self, stage: impl FlowStage) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append a stage in place.
    pub fn push(&mut self, stage: Box<dyn FlowStage>) {
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` if no stages are registered.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order and return per-stage timings.
    pub fn run(&self, ctx: &mut FlowContext<'_>) -> Vec<StageTiming> {
        let mut timings = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let start = Instant::now();
            stage.run(ctx);
            timings.push((stage.name().to_string(), start.elapsed().as_micros() as u64));
        }
        timings
    }
}

impl Default for FlowPipeline {
    fn default() -> Self {
        Self::standard(&FlowConfig::default())
    }
}

impl std::fmt::Debug for FlowPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
