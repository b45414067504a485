//! The water simulator: lifecycle, per-frame update, and queries.

use crate::config::{Anchor, ConfigError, WaterConfig};
use crate::metrics::StepMetrics;
use crate::stream::{impact_height, FallingStream, InletStream};
use seep_core::{ObstacleQuery, TileCoord, TileField};
use seep_flow::{purge_invalid, FlowContext, FlowPipeline, WaterFields};
use seep_space::{ConnectivityMasks, TileGrid};
use seep_surface::{
    CornerField, MeshParams, SurfaceMesh, SurfaceRun, WaterfallRun,
};
use std::time::Instant;

/// Tile water simulator over an injected obstacle backend.
///
/// # Lifecycle
///
/// The system starts in **Pre-fill**: only the falling stream below the
/// inlet advances. When the stream lands, the system latches **Active**
/// and from then on every [`update`](Self::update) runs the flow
/// pipeline. The latch is one-way.
///
/// # Obstacle changes
///
/// Connectivity masks are cached. After mutating the backend through
/// [`obstacles_mut`](Self::obstacles_mut), call
/// [`on_level_changed`](Self::on_level_changed) before the next update, or
/// use [`modify_obstacles`](Self::modify_obstacles) which does both.
///
/// # Queries
///
/// Tile queries take signed coordinates and return `0.0` / `false` for
/// tiles off the grid.
pub struct WaterSystem<O: ObstacleQuery> {
    config: WaterConfig,
    grid: TileGrid,
    obstacles: O,
    masks: ConnectivityMasks,
    fields: WaterFields,
    pipeline: FlowPipeline,
    stream: FallingStream,
    outlet: TileCoord,
    water_time: f32,
    active: bool,
    last_metrics: StepMetrics,
}

impl<O: ObstacleQuery> WaterSystem<O> {
    /// Validate `config` and build the simulator over `obstacles`.
    ///
    /// Masks are computed once here; the effective inlet may already be
    /// relocated if the nominal one is blocked.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`WaterConfig::validate`].
    pub fn new(config: WaterConfig, obstacles: O) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = TileGrid::new(
            config.width,
            config.height,
            config.tile_width,
            config.tile_height,
        )?;
        let nominal = config.anchor(Anchor::Inlet, config.inlet)?;
        let outlet = config.anchor(Anchor::Outlet, config.outlet)?;

        let masks = ConnectivityMasks::compute(&grid, &obstacles, nominal);
        let inlet = masks.inlet();
        let impact = impact_height(&grid, &obstacles, inlet);
        let stream = FallingStream::new(grid.tile_center(inlet)[1], impact);
        let pipeline = FlowPipeline::standard(&config.flow);
        let fields = WaterFields::new(&grid);

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            inlet = %inlet,
            outlet = %outlet,
            impact,
            "water system ready"
        );

        Ok(Self {
            config,
            grid,
            obstacles,
            masks,
            fields,
            pipeline,
            stream,
            outlet,
            water_time: 0.0,
            active: false,
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Per-frame ───────────────────────────────────────────────

    /// Advance one frame of `dt` seconds.
    ///
    /// A non-finite or negative `dt` is ignored. The frame on which the
    /// stream lands only latches Active; flow starts on the next frame.
    pub fn update(&mut self, dt: f32) -> StepMetrics {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "ignoring invalid frame step");
            return StepMetrics {
                total_fill: self.fields.fill.sum(),
                active: self.active,
                ..StepMetrics::default()
            };
        }
        let start = Instant::now();
        self.water_time += dt;

        let mut metrics = if self.active {
            self.run_flow(dt)
        } else {
            if self.stream.advance(dt, self.config.stream.gravity) {
                self.active = true;
                tracing::info!(
                    impact = self.stream.impact(),
                    water_time = self.water_time,
                    "stream landed, flow active"
                );
            }
            StepMetrics::default()
        };

        metrics.total_fill = self.fields.fill.sum();
        metrics.total_us = start.elapsed().as_micros() as u64;
        tracing::trace!(
            active = metrics.active,
            total_fill = metrics.total_fill,
            total_us = metrics.total_us,
            "water frame"
        );
        self.last_metrics = metrics.clone();
        metrics
    }

    fn run_flow(&mut self, dt: f32) -> StepMetrics {
        let mut ctx = FlowContext::new(
            &self.grid,
            &self.obstacles,
            &self.masks,
            &mut self.fields,
            dt,
        );
        let stage_us = self.pipeline.run(&mut ctx);
        StepMetrics {
            stage_us,
            injected: ctx.tally.injected,
            drained: ctx.tally.drained,
            active: true,
            ..StepMetrics::default()
        }
    }

    /// React to an external obstacle change.
    ///
    /// Recomputes both masks, re-snaps the inlet, recomputes the impact
    /// height (no effect once Active), and zeroes fill and flux on every
    /// tile that can no longer hold water.
    pub fn on_level_changed(&mut self) {
        self.masks.recompute(&self.grid, &self.obstacles);
        let inlet = self.masks.inlet();
        self.stream.set_top(self.grid.tile_center(inlet)[1]);
        self.stream
            .set_impact(impact_height(&self.grid, &self.obstacles, inlet));
        let purged = purge_invalid(&mut self.fields, &self.masks, &self.obstacles);
        tracing::debug!(
            outside = self.masks.outside().count(),
            reachable = self.masks.reachable().count(),
            purged,
            inlet = %inlet,
            "level changed"
        );
    }

    // ── Tile queries ────────────────────────────────────────────

    /// Fill fraction at `(tx, ty)`.
    pub fn get_fill(&self, tx: i32, ty: i32) -> f32 {
        self.grid.checked(tx, ty).map_or(0.0, |c| self.fields.fill[c])
    }

    /// Downward flux out of `(tx, ty)` during the last frame.
    pub fn get_flux(&self, tx: i32, ty: i32) -> f32 {
        self.grid.checked(tx, ty).map_or(0.0, |c| self.fields.flux[c])
    }

    /// World height of the water surface in `(tx, ty)`: tile bottom plus
    /// `fill · tile_height`.
    pub fn local_surface_height(&self, tx: i32, ty: i32) -> f32 {
        self.grid.checked(tx, ty).map_or(0.0, |c| {
            self.grid.tile_bottom(c.y) + self.fields.fill[c] * self.grid.tile_height()
        })
    }

    /// Open, reachable from the inlet, and not outside.
    pub fn is_in_water_region(&self, tx: i32, ty: i32) -> bool {
        self.grid
            .checked(tx, ty)
            .is_some_and(|c| self.masks.can_hold_water(&self.obstacles, c.x, c.y))
    }

    /// Whether the Pre-fill → Active latch has fired.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Metrics from the most recent valid [`update`](Self::update).
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    // ── Rendering support ───────────────────────────────────────

    /// Still-surface runs for this frame.
    pub fn surface_runs(&self) -> Vec<SurfaceRun> {
        seep_surface::surface_runs(
            &self.grid,
            &self.fields.fill,
            &self.fields.flux,
            &self.obstacles,
            &self.config.surface,
        )
    }

    /// Waterfall runs for this frame.
    pub fn waterfall_runs(&self) -> Vec<WaterfallRun> {
        seep_surface::waterfall_runs(&self.grid, &self.fields.flux, &self.config.surface)
    }

    /// Build a fresh surface mesh.
    pub fn build_mesh(&self) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();
        self.build_mesh_into(&mut mesh);
        mesh
    }

    /// Rebuild `mesh` in place, reusing its buffers.
    pub fn build_mesh_into(&self, mesh: &mut SurfaceMesh) {
        let corners = CornerField::build(&self.grid, &self.fields.fill, &self.masks, &self.obstacles);
        let surface = &self.config.surface;
        mesh.rebuild(
            &corners,
            &MeshParams {
                tile_width: self.grid.tile_width(),
                tile_height: self.grid.tile_height(),
                iso_level: surface.iso_level,
                palette: &surface.palette,
                time: self.water_time,
            },
        );
    }

    /// The falling ribbon below the inlet.
    pub fn inlet_stream(&self) -> InletStream {
        InletStream {
            x: self.inlet_center()[0],
            top: self.stream.top(),
            bottom: if self.active {
                self.stream.impact()
            } else {
                self.stream.head()
            },
        }
    }

    // ── Obstacles ───────────────────────────────────────────────

    /// The obstacle backend.
    pub fn obstacles(&self) -> &O {
        &self.obstacles
    }

    /// Mutable access to the backend.
    ///
    /// Masks go stale as soon as the backend changes; call
    /// [`on_level_changed`](Self::on_level_changed) afterwards.
    pub fn obstacles_mut(&mut self) -> &mut O {
        &mut self.obstacles
    }

    /// Edit the backend and notify the system in one call.
    pub fn modify_obstacles<R>(&mut self, edit: impl FnOnce(&mut O) -> R) -> R {
        let out = edit(&mut self.obstacles);
        self.on_level_changed();
        out
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Effective inlet after snapping.
    pub fn inlet(&self) -> TileCoord {
        self.masks.inlet()
    }

    /// Configured inlet.
    pub fn nominal_inlet(&self) -> TileCoord {
        self.masks.nominal_inlet()
    }

    /// Configured outlet.
    pub fn outlet(&self) -> TileCoord {
        self.outlet
    }

    /// World centre of the effective inlet.
    pub fn inlet_center(&self) -> [f32; 2] {
        self.grid.tile_center(self.masks.inlet())
    }

    /// World centre of the outlet.
    pub fn outlet_center(&self) -> [f32; 2] {
        self.grid.tile_center(self.outlet)
    }

    /// Seconds accumulated over all valid updates, Pre-fill included.
    pub fn water_time(&self) -> f32 {
        self.water_time
    }

    /// Grid geometry.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The fill field.
    pub fn fill_field(&self) -> &TileField<f32> {
        &self.fields.fill
    }

    /// The flux field.
    pub fn flux_field(&self) -> &TileField<f32> {
        &self.fields.flux
    }

    /// Connectivity masks.
    pub fn masks(&self) -> &ConnectivityMasks {
        &self.masks
    }

    /// The validated configuration.
    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    /// Stage names of the flow pipeline, in run order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.pipeline.stage_names()
    }
}

impl<O: ObstacleQuery> std::fmt::Debug for WaterSystem<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaterSystem")
            .field("grid", &self.grid)
            .field("inlet", &self.masks.inlet())
            .field("outlet", &self.outlet)
            .field("active", &self.active)
            .field("water_time", &self.water_time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seep_space::ObstacleMap;
    use seep_test_utils::AsciiLevel;

    fn system(rows: &[&str]) -> WaterSystem<ObstacleMap> {
        let level = AsciiLevel::parse(rows);
        let inlet = level.inlet();
        let outlet = level.outlet.unwrap_or(inlet);
        let cfg = WaterConfig::new(
            level.obstacles.width(),
            level.obstacles.height(),
            16.0,
            16.0,
        )
        .with_inlet(inlet.x, inlet.y)
        .with_outlet(outlet.x, outlet.y);
        WaterSystem::new(cfg, level.obstacles).unwrap()
    }

    fn activate(sys: &mut WaterSystem<ObstacleMap>) {
        for _ in 0..600 {
            if sys.is_active() {
                return;
            }
            sys.update(1.0 / 60.0);
        }
        panic!("stream never landed");
    }

    #[test]
    fn starts_in_prefill_with_dry_grid() {
        let sys = system(&["#####", "#.I.#", "#...#", "#####"]);
        assert!(!sys.is_active());
        assert_eq!(sys.fill_field().sum(), 0.0);
        let s = sys.inlet_stream();
        assert_eq!(s.top, sys.inlet_center()[1]);
        assert_eq!(s.bottom, s.top);
    }

    #[test]
    fn latch_frame_does_not_inject() {
        let mut sys = system(&["#####", "#.I.#", "#...#", "#####"]);
        let mut latched = None;
        for i in 0..600 {
            let m = sys.update(1.0 / 60.0);
            if sys.is_active() {
                latched = Some(i);
                assert!(!m.active);
                assert_eq!(m.total_fill, 0.0);
                break;
            }
        }
        assert!(latched.is_some());
        let m = sys.update(1.0 / 60.0);
        assert!(m.active);
        assert!(m.injected > 0.0);
        assert_eq!(m.stage_us.len(), 6);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut sys = system(&["###", "#I#", "###"]);
        sys.update(f32::NAN);
        sys.update(-1.0);
        sys.update(f32::INFINITY);
        assert_eq!(sys.water_time(), 0.0);
        assert!(!sys.is_active());
    }

    #[test]
    fn out_of_bounds_queries_are_inert() {
        let mut sys = system(&["###", "#I#", "###"]);
        activate(&mut sys);
        sys.update(1.0 / 60.0);
        for (x, y) in [(-1, 0), (0, -1), (3, 1), (1, 3), (i32::MIN, i32::MAX)] {
            assert_eq!(sys.get_fill(x, y), 0.0);
            assert_eq!(sys.get_flux(x, y), 0.0);
            assert_eq!(sys.local_surface_height(x, y), 0.0);
            assert!(!sys.is_in_water_region(x, y));
        }
        assert!(sys.get_fill(1, 1) > 0.0);
        assert!(sys.is_in_water_region(1, 1));
    }

    #[test]
    fn surface_height_tracks_fill() {
        let mut sys = system(&["###", "#I#", "###"]);
        activate(&mut sys);
        for _ in 0..5 {
            sys.update(1.0 / 60.0);
        }
        let fill = sys.get_fill(1, 1);
        assert!((sys.local_surface_height(1, 1) - (16.0 + fill * 16.0)).abs() < 1e-4);
    }

    #[test]
    fn blocked_inlet_is_relocated() {
        let level = AsciiLevel::parse(&["#####", "#...#", "#...#", "#####"]);
        let mut obstacles = level.obstacles;
        obstacles.set(2, 2);
        let cfg = WaterConfig::new(5, 4, 16.0, 16.0)
            .with_inlet(2, 2)
            .with_outlet(1, 1);
        let sys = WaterSystem::new(cfg, obstacles).unwrap();
        assert_eq!(sys.nominal_inlet(), TileCoord::new(2, 2));
        assert_ne!(sys.inlet(), TileCoord::new(2, 2));
        assert!(sys.is_in_water_region(sys.inlet().x as i32, sys.inlet().y as i32));
    }

    #[test]
    fn construction_rejects_bad_config() {
        let cfg = WaterConfig::new(4, 4, 16.0, 16.0).with_inlet(1, 1);
        let err = WaterSystem::new(cfg, ObstacleMap::open(4, 4)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingAnchor {
                anchor: Anchor::Outlet
            }
        );
    }
}
