//! Inlet source term.

use crate::context::FlowContext;
use crate::stage::FlowStage;

/// Adds `rate · dt` to the effective inlet, clamped to 1.
///
/// Does nothing while the inlet tile cannot hold water (blocked, cut
/// off, or exposed to outside space).
#[derive(Clone, Copy, Debug)]
pub struct SourceInjection {
    /// Fill per second.
    pub rate: f32,
}

impl SourceInjection {
    /// Create a source with the given rate.
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }
}

impl FlowStage for SourceInjection {
    fn name(&self) -> &str {
        "source"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        let inlet = ctx.masks().inlet();
        if !ctx.can_hold_water(inlet.x, inlet.y) {
            return;
        }
        let amount = self.rate * ctx.dt();
        let w = &mut ctx.fields.fill[inlet];
        let before = *w;
        *w = (before + amount).clamp(0.0, 1.0);
        ctx.tally.injected += *w - before;
    }
}
