//! Seeded randomness for loot rolls and scatter.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG shared by every combat system.
#[derive(Resource)]
pub struct CombatRng {
    pub rng: ChaCha8Rng,
}

impl CombatRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::new(0x5EED)
    }
}
