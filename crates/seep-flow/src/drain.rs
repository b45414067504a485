//! Sinks at the boundary with outside space.

use crate::context::FlowContext;
use crate::stage::FlowStage;

/// Drains `min(fill, rate · dt)` from every water tile that has an
/// outside tile among its 4-neighbours.
#[derive(Clone, Copy, Debug)]
pub struct OutsideDrain {
    /// Fill per second.
    pub rate: f32,
}

impl FlowStage for OutsideDrain {
    fn name(&self) -> &str {
        "drain"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        let cap = self.rate * ctx.dt();
        let grid = ctx.grid();
        let masks = ctx.masks();
        let mut drained = 0.0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let w = ctx.fields.fill[(x, y)];
                if w <= 0.0 || !ctx.can_hold_water(x, y) || !masks.touches_outside(x, y) {
                    continue;
                }
                let d = w.min(cap);
                ctx.fields.fill[(x, y)] = (w - d).max(0.0);
                drained += d;
            }
        }
        ctx.tally.drained += drained;
    }
}

/// Snaps residual fill below `epsilon` to zero next to outside tiles.
#[derive(Clone, Copy, Debug)]
pub struct CrumbCleanup {
    /// Fill below which a bordering tile is cleared.
    pub epsilon: f32,
}

impl FlowStage for CrumbCleanup {
    fn name(&self) -> &str {
        "crumbs"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        let grid = ctx.grid();
        let masks = ctx.masks();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let w = ctx.fields.fill[(x, y)];
                if w > 0.0 && w < self.epsilon && masks.touches_outside(x, y) {
                    ctx.fields.fill[(x, y)] = 0.0;
                    ctx.tally.drained += w;
                }
            }
        }
    }
}
