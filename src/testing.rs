//! Shared fixtures for unit tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::enemies::data::{
    BehaviorConfig, BossMove, ChargeConfig, CombatConfig, JumpConfig, RangedConfig,
};

/// Fixed frame step used by tick-driven tests.
pub const DT: f32 = 1.0 / 60.0;

pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

pub fn charge_config() -> ChargeConfig {
    ChargeConfig {
        range: 90.0,
        windup: 0.4,
        speed: 260.0,
        duration: 0.5,
        cooldown: 1.2,
    }
}

pub fn jump_config() -> JumpConfig {
    JumpConfig {
        hops: 3,
        jump_velocity: 320.0,
        horizontal_speed: 120.0,
        hop_delay: 0.2,
        landing_shake: 6.0,
    }
}

fn base_config(name: &str, behavior: BehaviorConfig) -> CombatConfig {
    CombatConfig {
        name: name.to_string(),
        max_hp: 10,
        contact_damage: 1,
        patrol_speed: 40.0,
        aggro_speed: 70.0,
        aggro_radius: 150.0,
        deaggro_radius: 220.0,
        hit_stun: 0.3,
        invulnerability: 0.4,
        hurt_flash: 0.2,
        knockback: (180.0, 120.0),
        loot: (1, 3),
        size: (20.0, 20.0),
        turn_cooldown: 0.35,
        death_duration: 0.6,
        ground_probe: (6.0, 10.0),
        behavior,
    }
}

pub fn charger_config() -> CombatConfig {
    base_config(
        "Charger",
        BehaviorConfig::Charger {
            charge: charge_config(),
        },
    )
}

pub fn brute_config() -> CombatConfig {
    let mut config = base_config(
        "Brute",
        BehaviorConfig::Brute {
            charge: charge_config(),
            slowed_opacity: 0.55,
        },
    );
    config.max_hp = 30;
    config
}

pub fn boss_config() -> CombatConfig {
    let mut config = base_config(
        "Warden",
        BehaviorConfig::Boss {
            pattern: vec![BossMove::Jump, BossMove::Ranged, BossMove::Charge],
            charge: charge_config(),
            jump: jump_config(),
            ranged: RangedConfig {
                windup: 0.7,
                projectile_speed: 220.0,
                projectile_damage: 2,
                recovery: 0.5,
            },
            cooldown: 1.0,
        },
    );
    config.max_hp = 80;
    config.aggro_radius = 260.0;
    config.deaggro_radius = 400.0;
    config
}
