//! Benchmark profiles and utilities for the Seep water simulator.
//!
//! Provides pre-built levels for benchmarking:
//!
//! - [`reference_profile`]: 100x100 cave (10K tiles)
//! - [`stress_profile`]: 316x316 cave (~100K tiles)
//! - [`cave_level`]: deterministic walled cave via seed
//! - [`warmed`]: a system advanced past Pre-fill with water in motion

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seep_engine::{ConfigError, WaterConfig, WaterSystem};
use seep_space::ObstacleMap;

/// Tile size used by every profile, in world units.
pub const TILE: f32 = 16.0;

/// A level ready to hand to [`WaterSystem::new`].
pub type Profile = (WaterConfig, ObstacleMap);

/// Build the reference profile: 100x100 tiles, 25% interior walls.
pub fn reference_profile(seed: u64) -> Profile {
    profile(100, 100, 0.25, seed)
}

/// Build the stress profile: 316x316 tiles, same density.
pub fn stress_profile(seed: u64) -> Profile {
    profile(316, 316, 0.25, seed)
}

fn profile(width: usize, height: usize, density: f64, seed: u64) -> Profile {
    let obstacles = cave_level(width, height, density, seed);
    let config = WaterConfig::new(width, height, TILE, TILE)
        .with_inlet(width / 2, height - 2)
        .with_outlet(1, 1);
    (config, obstacles)
}

/// A closed cave: solid border, random interior walls at `density`, and a
/// clear shaft under the inlet column so the stream lands on the floor.
pub fn cave_level(width: usize, height: usize, density: f64, seed: u64) -> ObstacleMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = ObstacleMap::open(width, height);
    let shaft = width / 2;
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            if border || (x != shaft && rng.gen_bool(density.clamp(0.0, 1.0))) {
                map.set(x, y);
            }
        }
    }
    map
}

/// Construct a system from `profile` and run `frames` frames at 60 Hz
/// after the stream lands.
pub fn warmed(profile: Profile, frames: usize) -> Result<WaterSystem<ObstacleMap>, ConfigError> {
    let (config, obstacles) = profile;
    let mut system = WaterSystem::new(config, obstacles)?;
    while !system.is_active() {
        system.update(1.0 / 60.0);
    }
    for _ in 0..frames {
        system.update(1.0 / 60.0);
    }
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seep_core::ObstacleQuery;

    #[test]
    fn reference_profile_validates() {
        let (config, _) = reference_profile(42);
        config.validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        let (config, _) = stress_profile(42);
        config.validate().unwrap();
    }

    #[test]
    fn cave_is_closed_with_open_shaft() {
        let map = cave_level(20, 12, 0.5, 9);
        for x in 0..20 {
            assert!(map.is_obstacle(x, 0) && map.is_obstacle(x, 11));
        }
        for y in 1..11 {
            assert!(map.is_open(10, y));
        }
    }

    #[test]
    fn cave_level_deterministic() {
        assert_eq!(cave_level(50, 40, 0.3, 7), cave_level(50, 40, 0.3, 7));
    }

    #[test]
    fn warmed_reference_has_water() {
        let system = warmed(reference_profile(42), 30).unwrap();
        assert!(system.is_active());
        assert!(system.fill_field().sum() > 0.0);
    }
}
