//! Combat-related components, events and resources.

use bevy::prelude::*;
use rand::Rng;

use super::actor::{ActorTuning, DamageOutcome, Damageable};
use super::hit::{Hit, SwingId};
use crate::core::{Countdown, Countdowns, Facing, Tint};

/// Marker for the player entity.
#[derive(Component)]
pub struct Player;

/// The player's side of the damage contract.
#[derive(Component, Debug)]
pub struct PlayerCombat {
    pub actor: Damageable,
    pub timers: Countdowns,
    pub tuning: ActorTuning,
    /// Hurtbox (width, height) centred on the transform.
    pub size: Vec2,
}

impl PlayerCombat {
    pub fn new(max_hp: i32, size: Vec2) -> Self {
        Self {
            actor: Damageable::new(max_hp),
            timers: Countdowns::new(),
            tuning: ActorTuning {
                hit_stun: 0.2,
                invulnerability: 1.0,
                hurt_flash: 0.3,
                knockback: Vec2::new(160.0, 140.0),
            },
            size,
        }
    }

    pub fn bounds(&self, position: Vec2) -> Rect {
        Rect::from_center_size(position, self.size)
    }

    /// Apply an incoming hit; `velocity` receives the knockback.
    pub fn take_hit(&mut self, hit: &Hit, x: f32, velocity: &mut Vec2) -> DamageOutcome {
        self.actor
            .apply_damage(hit, x, &self.tuning, &mut self.timers, velocity)
    }

    pub fn is_flashing(&self) -> bool {
        self.timers.is_active(Countdown::HurtFlash)
    }

    /// A stunned player cannot start a swing.
    pub fn is_stunned(&self) -> bool {
        self.timers.is_active(Countdown::HitStun)
    }

    pub fn tint(&self) -> Tint {
        if self.is_flashing() {
            Tint::Hurt
        } else {
            Tint::Normal
        }
    }
}

/// Request for the player to swing. Whatever drives the player sends it.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerSwingEvent {
    pub facing: Facing,
    pub damage: i32,
}

/// Melee hitbox alive for a few frames. Every frame it overlaps a target
/// it queues a hit with the same swing id; the target keeps only the first.
#[derive(Component, Debug)]
pub struct SwingHitbox {
    pub swing: SwingId,
    pub damage: i32,
    pub size: Vec2,
    pub lifetime: f32,
}

/// Hostile projectile. Each one carries its own swing id.
#[derive(Component, Debug)]
pub struct Projectile {
    pub swing: SwingId,
    pub damage: i32,
    pub radius: f32,
    pub lifetime: f32,
}

/// Offset origin for a shaking camera.
#[derive(Component, Debug, Default)]
pub struct ShakeAnchor {
    pub base: Vec3,
}

/// Screen shake effect resource.
#[derive(Resource, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub timer: f32,
}

impl ScreenShake {
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        // Only override if new shake is stronger
        if intensity > self.intensity || self.timer <= 0.0 {
            self.intensity = intensity;
            self.duration = duration;
            self.timer = duration;
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Decay the shake and return this frame's camera offset.
    pub fn update<R: Rng + ?Sized>(&mut self, delta: f32, rng: &mut R) -> Vec2 {
        if self.timer <= 0.0 {
            return Vec2::ZERO;
        }

        self.timer = (self.timer - delta).max(0.0);
        let current_intensity = self.intensity * (self.timer / self.duration);
        if current_intensity <= 0.0 {
            self.intensity = 0.0;
            return Vec2::ZERO;
        }

        Vec2::new(
            rng.gen_range(-1.0..=1.0) * current_intensity,
            rng.gen_range(-1.0..=1.0) * current_intensity,
        )
    }
}
