//! Coin drop rolls and scatter.

use bevy::prelude::*;
use rand::Rng;

use crate::core::DynamicSpawn;

/// Horizontal spread of spawn points around the death position.
const SCATTER_RADIUS: f32 = 6.0;
/// Upward component of the coin impulse.
const IMPULSE_UP: (f32, f32) = (140.0, 220.0);
/// Horizontal component of the coin impulse, either side.
const IMPULSE_OUT: f32 = 90.0;

/// Ticks a coin flies freely before it is frozen in place.
pub const SETTLE_TICKS: u64 = 45;

/// Roll how many coins drop, inclusive of both ends.
pub fn roll_drop_count<R: Rng + ?Sized>(min: u32, max: u32, rng: &mut R) -> u32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Coin spawns scattered around `origin`, each thrown up and outward.
pub fn scatter_coins<R: Rng + ?Sized>(origin: Vec2, count: u32, rng: &mut R) -> Vec<DynamicSpawn> {
    (0..count)
        .map(|_| {
            let offset = Vec2::new(
                rng.gen_range(-SCATTER_RADIUS..=SCATTER_RADIUS),
                rng.gen_range(0.0..=SCATTER_RADIUS * 0.5),
            );
            let velocity = Vec2::new(
                rng.gen_range(-IMPULSE_OUT..=IMPULSE_OUT),
                rng.gen_range(IMPULSE_UP.0..=IMPULSE_UP.1),
            );
            DynamicSpawn::Coin {
                position: origin + offset,
                velocity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn drop_count_stays_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let count = roll_drop_count(2, 5, &mut rng);
            assert!((2..=5).contains(&count));
        }
    }

    #[test]
    fn empty_range_drops_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll_drop_count(0, 0, &mut rng), 0);
        assert!(scatter_coins(Vec2::ZERO, 0, &mut rng).is_empty());
    }

    #[test]
    fn coins_fly_upward_near_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let origin = Vec2::new(50.0, 20.0);

        for spawn in scatter_coins(origin, 16, &mut rng) {
            let DynamicSpawn::Coin { position, velocity } = spawn else {
                panic!("expected coin");
            };
            assert!(position.distance(origin) <= SCATTER_RADIUS * 1.2);
            assert!(velocity.y >= IMPULSE_UP.0);
            assert!(velocity.x.abs() <= IMPULSE_OUT);
        }
    }

    #[test]
    fn same_seed_same_scatter() {
        let a = scatter_coins(Vec2::ZERO, 4, &mut ChaCha8Rng::seed_from_u64(3));
        let b = scatter_coins(Vec2::ZERO, 4, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
