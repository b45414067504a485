//! End-to-end behaviour of the water system on small levels.

use proptest::prelude::*;
use seep_core::ObstacleQuery;
use seep_engine::{WaterConfig, WaterSystem};
use seep_space::ObstacleMap;
use seep_test_utils::{random_cavern, walled_basin, AsciiLevel, TILE};

const DT: f32 = 1.0 / 60.0;

fn basin() -> WaterSystem<ObstacleMap> {
    // 7x7 ring, 5x5 interior, inlet in the top interior row.
    let cfg = WaterConfig::new(7, 7, TILE, TILE)
        .with_inlet(3, 5)
        .with_outlet(1, 1);
    WaterSystem::new(cfg, walled_basin(7, 7)).unwrap()
}

fn run_until_active<O: ObstacleQuery>(sys: &mut WaterSystem<O>) -> usize {
    let mut frames = 0;
    while !sys.is_active() {
        sys.update(DT);
        frames += 1;
        assert!(frames < 10_000, "stream never landed");
    }
    frames
}

fn assert_invariants<O: ObstacleQuery>(sys: &WaterSystem<O>) {
    let grid = sys.grid();
    for (c, _) in grid.field(()).iter_coords() {
        let (x, y) = (c.x as i32, c.y as i32);
        let w = sys.get_fill(x, y);
        assert!((0.0..=1.0).contains(&w), "fill {w} at {c}");
        if !sys.is_in_water_region(x, y) {
            assert_eq!(w, 0.0, "fill on invalid tile {c}");
            assert_eq!(sys.get_flux(x, y), 0.0, "flux on invalid tile {c}");
        }
    }
}

#[test]
fn basin_fills_from_the_bottom_up_to_the_inlet() {
    let mut sys = basin();
    let prefill = run_until_active(&mut sys);
    assert!(prefill > 1);
    assert_eq!(sys.inlet_stream().bottom, TILE);

    for _ in 0..1500 {
        sys.update(DT);
    }
    assert_invariants(&sys);
    assert!(sys.get_fill(3, 5) > 0.999, "inlet {}", sys.get_fill(3, 5));
    assert!(sys.get_fill(3, 1) > 0.0);
    for x in 1..6 {
        assert!(sys.get_fill(x, 1) > 0.99, "bottom row at {x}");
    }

    // Calm and full: the top interior row is a still surface.
    let runs = sys.surface_runs();
    assert!(runs.iter().any(|r| r.row == 5 && r.x0 == 1 && r.x1 == 5));
    let mesh = sys.build_mesh();
    assert!(!mesh.is_empty());
    assert!(mesh
        .vertices()
        .iter()
        .all(|v| v.position.iter().chain(&v.color).all(|c| c.is_finite())));
}

#[test]
fn falling_water_shows_up_as_a_waterfall() {
    let mut sys = basin();
    run_until_active(&mut sys);
    for _ in 0..30 {
        sys.update(DT);
    }
    let falls = sys.waterfall_runs();
    assert!(falls.iter().any(|r| r.column == 3), "{falls:?}");
    assert!(sys.get_flux(3, 5) > 0.0);
}

#[test]
fn inlet_saturates_then_stays_clamped() {
    let level = AsciiLevel::parse(&["###", "#I#", "###"]);
    let cfg = WaterConfig::new(3, 3, TILE, TILE)
        .with_inlet(1, 1)
        .with_outlet(1, 1);
    let mut sys = WaterSystem::new(cfg, level.obstacles).unwrap();
    run_until_active(&mut sys);

    let mut prev = sys.get_fill(1, 1);
    while prev < 1.0 {
        sys.update(DT);
        let now = sys.get_fill(1, 1);
        assert!(now > prev, "fill did not rise: {prev} -> {now}");
        prev = now;
    }
    for _ in 0..30 {
        sys.update(DT);
        assert_eq!(sys.get_fill(1, 1), 1.0);
    }
}

#[test]
fn new_wall_discards_its_water_without_creating_any() {
    let mut sys = basin();
    run_until_active(&mut sys);
    for _ in 0..300 {
        sys.update(DT);
    }
    let before: Vec<f32> = sys.fill_field().as_slice().to_vec();
    assert!(sys.get_fill(1, 1) > 0.0);

    sys.modify_obstacles(|o| o.set(1, 1));

    assert_eq!(sys.get_fill(1, 1), 0.0);
    assert_eq!(sys.get_flux(1, 1), 0.0);
    for (i, (&after, &was)) in sys.fill_field().as_slice().iter().zip(&before).enumerate() {
        assert!(after <= was, "tile {i} gained fill: {was} -> {after}");
    }

    let total = sys.fill_field().sum();
    let m = sys.update(DT);
    assert!(m.total_fill <= total + m.injected + 1e-4);
    assert_invariants(&sys);
}

#[test]
fn breaking_the_wall_drains_the_basin() {
    let mut sys = basin();
    run_until_active(&mut sys);
    for _ in 0..300 {
        sys.update(DT);
    }
    assert!(sys.fill_field().sum() > 1.0);

    // Opening the side wall connects the interior to the border.
    sys.modify_obstacles(|o| o.clear(0, 3));
    assert!(sys.masks().is_outside(3, 3));
    assert!(!sys.is_in_water_region(3, 5));
    assert_eq!(sys.fill_field().sum(), 0.0);

    for _ in 0..60 {
        let m = sys.update(DT);
        assert_eq!(m.injected, 0.0);
    }
    assert_eq!(sys.fill_field().sum(), 0.0);

    // Repair: the inlet is interior again and water resumes.
    sys.modify_obstacles(|o| o.set(0, 3));
    assert!(sys.is_active());
    let m = sys.update(DT);
    assert!(m.injected > 0.0);
    assert!(sys.fill_field().sum() > 0.0);
}

#[test]
fn active_latch_survives_removing_the_floor() {
    let mut sys = basin();
    run_until_active(&mut sys);
    let impact = sys.inlet_stream().bottom;
    sys.modify_obstacles(|o| o.clear(3, 0));
    assert!(sys.is_active());
    assert_eq!(sys.inlet_stream().bottom, impact);
}

#[test]
fn water_time_counts_prefill_frames() {
    let mut sys = basin();
    let frames = run_until_active(&mut sys);
    assert!((sys.water_time() - frames as f32 * DT).abs() < 1e-4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn caverns_respect_fill_invariants(
        seed in any::<u64>(),
        inlet_x in 0usize..12,
        inlet_y in 0usize..10,
        dts in proptest::collection::vec(0.0f32..0.05, 20..80),
        toggle in (0usize..12, 0usize..10),
    ) {
        let walls = random_cavern(12, 10, 0.3, seed);
        let cfg = WaterConfig::new(12, 10, TILE, TILE)
            .with_inlet(inlet_x, inlet_y)
            .with_outlet(0, 0);
        let mut sys = WaterSystem::new(cfg, walls).unwrap();
        for (i, &dt) in dts.iter().enumerate() {
            sys.update(dt);
            if i == dts.len() / 2 {
                sys.modify_obstacles(|o| {
                    o.toggle(toggle.0, toggle.1);
                });
            }
            for (c, _) in sys.grid().field(()).iter_coords() {
                let (x, y) = (c.x as i32, c.y as i32);
                let w = sys.get_fill(x, y);
                prop_assert!((0.0..=1.0).contains(&w));
                if !sys.is_in_water_region(x, y) {
                    prop_assert_eq!(w, 0.0);
                    prop_assert_eq!(sys.get_flux(x, y), 0.0);
                }
            }
        }
    }
}
