//! Windup-then-lunge attack.

use bevy::prelude::*;

use super::{AttackContext, Progress};
use crate::core::{Countdown, EffectKind, Facing};
use crate::enemies::data::ChargeConfig;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChargePhase {
    #[default]
    Ready,
    /// Standing still, telegraphing.
    Windup,
    Charging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeAttack {
    config: ChargeConfig,
    phase: ChargePhase,
    direction: Facing,
}

impl ChargeAttack {
    pub fn new(config: ChargeConfig) -> Self {
        Self {
            config,
            phase: ChargePhase::Ready,
            direction: Facing::Right,
        }
    }

    pub fn phase(&self) -> ChargePhase {
        self.phase
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn cooldown(&self) -> f32 {
        self.config.cooldown
    }

    pub fn in_flight(&self) -> bool {
        self.phase != ChargePhase::Ready
    }

    /// In range, facing the player, off cooldown and nothing already running.
    pub fn can_trigger(&self, ctx: &AttackContext) -> bool {
        !self.in_flight()
            && ctx.may_start
            && ctx.timers.is_expired(Countdown::AttackCooldown)
            && ctx.distance() <= self.config.range
            && ctx.player_direction() == Some(ctx.facing)
    }

    pub fn begin(&mut self, ctx: &mut AttackContext) {
        self.phase = ChargePhase::Windup;
        self.direction = ctx.facing;
        ctx.timers.start(Countdown::AttackPhase, self.config.windup);
        ctx.velocity.x = 0.0;
    }

    /// Run one tick. `speed_multiplier` scales the lunge (hazard slowdowns).
    pub fn advance(&mut self, ctx: &mut AttackContext, speed_multiplier: f32) -> Progress {
        match self.phase {
            ChargePhase::Ready => Progress::Finished,
            ChargePhase::Windup => {
                ctx.velocity.x = 0.0;
                if ctx.timers.is_expired(Countdown::AttackPhase) {
                    self.phase = ChargePhase::Charging;
                    ctx.timers.start(Countdown::AttackPhase, self.config.duration);
                    ctx.velocity.x = self.direction.sign() * self.config.speed * speed_multiplier;
                }
                Progress::Running
            }
            ChargePhase::Charging => {
                if ctx.world.touching_wall(self.direction) {
                    let front = ctx.body.position
                        + Vec2::new(self.direction.sign() * ctx.body.size.x * 0.5, 0.0);
                    ctx.presentation.effect(EffectKind::WallImpact, front);
                    return self.stop(ctx);
                }
                if ctx.timers.is_expired(Countdown::AttackPhase) {
                    return self.stop(ctx);
                }
                ctx.velocity.x = self.direction.sign() * self.config.speed * speed_multiplier;
                Progress::Running
            }
        }
    }

    fn stop(&mut self, ctx: &mut AttackContext) -> Progress {
        self.phase = ChargePhase::Ready;
        ctx.timers.clear(Countdown::AttackPhase);
        ctx.velocity.x = 0.0;
        Progress::Finished
    }

    pub fn abandon(&mut self) {
        self.phase = ChargePhase::Ready;
    }
}
