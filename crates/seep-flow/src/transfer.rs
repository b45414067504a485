//! Gravity-biased vertical transfer and damped lateral equalization.
//!
//! The sweep is Gauss–Seidel style: tiles are visited row-major from the
//! bottom row, and every move reads fill values already updated earlier
//! in the same sweep. Per tile the order is down, then left, then right.

use crate::context::{FlowContext, WaterFields};
use crate::stage::FlowStage;
use seep_core::TileMask;

/// Runs `iterations` transfer sweeps per frame, each with `dt / iterations`.
#[derive(Clone, Copy, Debug)]
pub struct IteratedTransfer {
    /// Cap on downward transfer, fill per second.
    pub down_rate: f32,
    /// Cap on each lateral transfer, fill per second.
    pub side_rate: f32,
    /// Sweeps per frame (at least 1).
    pub iterations: u32,
    /// Lateral moves happen only when the fill difference exceeds this.
    pub lateral_threshold: f32,
}

impl IteratedTransfer {
    /// One sweep over the grid with sub-step `dt`.
    ///
    /// `holdable` marks tiles that may contain water; all others are
    /// neither sources nor destinations.
    pub fn sweep(&self, fields: &mut WaterFields, holdable: &TileMask, dt: f32) {
        let width = holdable.width();
        let height = holdable.height();
        let down_cap = self.down_rate * dt;
        let side_cap = self.side_rate * dt;

        for y in 0..height {
            for x in 0..width {
                if !holdable[(x, y)] {
                    continue;
                }
                if fields.fill[(x, y)] <= 0.0 {
                    continue;
                }

                if y > 0 && holdable[(x, y - 1)] {
                    let w = fields.fill[(x, y)];
                    let space = 1.0 - fields.fill[(x, y - 1)];
                    if space > 0.0 {
                        let moved = w.min(space).min(down_cap);
                        fields.fill[(x, y)] = (w - moved).max(0.0);
                        fields.fill[(x, y - 1)] = (fields.fill[(x, y - 1)] + moved).min(1.0);
                        fields.flux[(x, y)] += moved;
                        if fields.fill[(x, y)] <= 0.0 {
                            continue;
                        }
                    }
                }

                if x > 0 && holdable[(x - 1, y)] {
                    self.equalize(fields, (x, y), (x - 1, y), side_cap);
                }
                if x + 1 < width && holdable[(x + 1, y)] {
                    self.equalize(fields, (x, y), (x + 1, y), side_cap);
                }
            }
        }
    }

    /// Move up to half the difference from `from` toward a lower `to`.
    fn equalize(
        &self,
        fields: &mut WaterFields,
        from: (usize, usize),
        to: (usize, usize),
        cap: f32,
    ) {
        let a = fields.fill[from];
        if a <= 0.0 {
            return;
        }
        let b = fields.fill[to];
        let diff = a - b;
        if diff <= self.lateral_threshold {
            return;
        }
        let moved = (diff * 0.5).min(cap).min(a);
        fields.fill[from] = (a - moved).max(0.0);
        fields.fill[to] = (b + moved).min(1.0);
    }
}

impl FlowStage for IteratedTransfer {
    fn name(&self) -> &str {
        "transfer"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        let iterations = self.iterations.max(1);
        let dt = ctx.dt() / iterations as f32;

        // Masks are fixed for the frame, so resolve validity once.
        let grid = ctx.grid();
        let mut holdable = grid.field(false);
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                holdable[(x, y)] = ctx.can_hold_water(x, y);
            }
        }

        for _ in 0..iterations {
            self.sweep(ctx.fields, &holdable, dt);
        }
    }
}
