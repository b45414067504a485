//! Housekeeping stages that run before any water moves.

use crate::context::{FlowContext, WaterFields};
use crate::stage::FlowStage;
use seep_core::ObstacleQuery;
use seep_space::ConnectivityMasks;

/// Zero fill and flux on every tile that cannot hold water.
///
/// Catches walls that appeared since the last frame, as well as tiles
/// that became unreachable or outside. Returns the fill discarded.
pub fn purge_invalid<O: ObstacleQuery + ?Sized>(
    fields: &mut WaterFields,
    masks: &ConnectivityMasks,
    obstacles: &O,
) -> f32 {
    let width = fields.fill.width();
    let mut discarded = 0.0;
    for (i, (w, f)) in fields
        .fill
        .as_mut_slice()
        .iter_mut()
        .zip(fields.flux.as_mut_slice())
        .enumerate()
    {
        let (x, y) = (i % width, i / width);
        if !masks.can_hold_water(obstacles, x, y) {
            discarded += *w;
            *w = 0.0;
            *f = 0.0;
        }
    }
    discarded
}

/// Stage wrapper around [`purge_invalid`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PurgeInvalid;

impl FlowStage for PurgeInvalid {
    fn name(&self) -> &str {
        "purge"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        let (masks, obstacles) = (ctx.masks(), ctx.obstacles());
        let discarded = purge_invalid(ctx.fields, masks, obstacles);
        if discarded > 0.0 {
            tracing::trace!(discarded, "purged fill from invalid tiles");
        }
        ctx.tally.purged += discarded;
    }
}

/// Clear last frame's flux.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetFlux;

impl FlowStage for ResetFlux {
    fn name(&self) -> &str {
        "reset_flux"
    }

    fn run(&self, ctx: &mut FlowContext<'_>) {
        ctx.fields.flux.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seep_core::TileCoord;
    use seep_space::{ConnectivityMasks, ObstacleMap, TileGrid};

    #[test]
    fn purge_clears_walls_and_outside() {
        let map = ObstacleMap::from_rows(&["#.#", "#.#", "###"]);
        let grid = TileGrid::new(3, 3, 1.0, 1.0).unwrap();
        let masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(1, 1));
        let mut fields = WaterFields::new(&grid);
        fields.fill.fill(0.5);
        fields.flux.fill(0.1);

        // (1, 2) and (1, 1) are open to the top edge, so everything is invalid.
        let gone = purge_invalid(&mut fields, &masks, &map);
        assert!((gone - 4.5).abs() < 1e-5);
        assert_eq!(fields.fill.sum(), 0.0);
        assert_eq!(fields.flux.sum(), 0.0);
    }
}
