//! The [`FlowStage`] trait.

use crate::context::FlowContext;

/// One pass of the per-frame flow update.
///
/// # Contract
///
/// - `run()` is deterministic: the same fields, masks, and `dt` produce
///   the same result.
/// - Stages hold only their tuning constants; all mutable state lives in
///   the context's [`WaterFields`](crate::WaterFields).
/// - After `run()` every fill value stays inside `[0, 1]`.
///
/// # Object safety
///
/// [`FlowPipeline`](crate::FlowPipeline) stores stages as
/// `Vec<Box<dyn FlowStage>>`.
///
/// ```
/// use seep_flow::{FlowContext, FlowStage};
///
/// struct Evaporate(f32);
///
/// impl FlowStage for Evaporate {
///     fn name(&self) -> &str { "evaporate" }
///
///     fn run(&self, ctx: &mut FlowContext<'_>) {
///         let loss = self.0 * ctx.dt();
///         for w in ctx.fields.fill.as_mut_slice() {
///             *w = (*w - loss).max(0.0);
///         }
///     }
/// }
///
/// assert_eq!(Evaporate(0.1).name(), "evaporate");
/// ```
pub trait FlowStage: Send + 'static {
    /// Stable name used in per-stage timings.
    fn name(&self) -> &str;

    /// Advance the fields by one frame.
    fn run(&self, ctx: &mut FlowContext<'_>);
}
