//! The damageable actor shared by enemies and the player.

use bevy::prelude::*;

use super::hit::{Hit, SwingId};
use crate::core::{Countdown, Countdowns};

/// Timing and knockback applied to an actor when a hit lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorTuning {
    pub hit_stun: f32,
    pub invulnerability: f32,
    pub hurt_flash: f32,
    /// Horizontal component is mirrored away from the attacker.
    pub knockback: Vec2,
}

/// Why a damage application had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyDead,
    Invulnerable,
    SameSwing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored(Rejection),
    Hurt,
    /// Hit points reached zero on this hit. Reported exactly once.
    Killed,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, DamageOutcome::Ignored(_))
    }
}

/// Hit points plus the bookkeeping that keeps one swing from landing twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Damageable {
    hp: i32,
    max_hp: i32,
    last_swing: SwingId,
    dead: bool,
}

impl Damageable {
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            last_swing: SwingId::NONE,
            dead: false,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn last_swing(&self) -> SwingId {
        self.last_swing
    }

    /// Apply `hit` to an actor standing at `actor_x`.
    ///
    /// On success the hit-stun, invulnerability and hurt-flash countdowns are
    /// armed from `tuning` and `velocity` is replaced by the knockback.
    pub fn apply_damage(
        &mut self,
        hit: &Hit,
        actor_x: f32,
        tuning: &ActorTuning,
        timers: &mut Countdowns,
        velocity: &mut Vec2,
    ) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored(Rejection::AlreadyDead);
        }
        if timers.is_active(Countdown::Invulnerability) {
            return DamageOutcome::Ignored(Rejection::Invulnerable);
        }
        if !hit.swing.is_none() && hit.swing == self.last_swing {
            return DamageOutcome::Ignored(Rejection::SameSwing);
        }

        if !hit.swing.is_none() {
            self.last_swing = hit.swing;
        }
        self.hp = (self.hp - hit.damage.max(0)).max(0);

        timers.start(Countdown::HitStun, tuning.hit_stun);
        timers.start(Countdown::Invulnerability, tuning.invulnerability);
        timers.start(Countdown::HurtFlash, tuning.hurt_flash);

        let direction = knockback_direction(hit.source_x, actor_x);
        *velocity = Vec2::new(tuning.knockback.x * direction, tuning.knockback.y);

        if self.hp <= 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }
}

/// Sign of the knockback pushing an actor at `actor_x` away from `source_x`.
///
/// When both share the same x the push goes toward +x.
pub fn knockback_direction(source_x: f32, actor_x: f32) -> f32 {
    if actor_x < source_x {
        -1.0
    } else {
        1.0
    }
}
