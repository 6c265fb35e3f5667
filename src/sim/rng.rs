//! Seeded sampling helpers
//!
//! All randomness flows through a single `Pcg32` owned by the game, seeded
//! once at startup. Same seed, same session.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::dot::Bounds;

/// Inclusive integer sample in `[min, max]`; degenerate ranges collapse to
/// `min`
pub fn range_inclusive(rng: &mut Pcg32, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// One velocity axis: random sign, uniform integer magnitude `0..=max_speed`
pub fn velocity_component(rng: &mut Pcg32, max_speed: i32) -> f32 {
    let sign = if rng.random_bool(0.5) { 1 } else { -1 };
    (sign * range_inclusive(rng, 0, max_speed)) as f32
}

/// Uniform spawn position keeping the whole dot inside the canvas
pub fn spawn_position(rng: &mut Pcg32, bounds: Bounds, radius: f32) -> Vec2 {
    let x = range_inclusive(rng, radius as i32, (bounds.width - radius) as i32);
    let y = range_inclusive(rng, radius as i32, (bounds.height - radius) as i32);
    Vec2::new(x as f32, y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..1_000 {
            let v = range_inclusive(&mut rng, 0, 5);
            assert!((0..=5).contains(&v));
            seen_min |= v == 0;
            seen_max |= v == 5;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(range_inclusive(&mut rng, 9, 9), 9);
        assert_eq!(range_inclusive(&mut rng, 9, 3), 9);
    }

    #[test]
    fn test_velocity_component_stays_in_band() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..1_000 {
            let v = velocity_component(&mut rng, 5);
            assert!(v.abs() <= 5.0);
            assert_eq!(v, v.trunc(), "velocity components are integer-valued");
        }
    }

    #[test]
    fn test_spawn_position_keeps_dot_inside() {
        let mut rng = Pcg32::seed_from_u64(123);
        let bounds = Bounds::new(1280.0, 720.0);
        for _ in 0..1_000 {
            let pos = spawn_position(&mut rng, bounds, 50.0);
            assert!(pos.x >= 50.0 && pos.x <= 1230.0);
            assert!(pos.y >= 50.0 && pos.y <= 670.0);
        }
    }
}
