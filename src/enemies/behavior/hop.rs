//! Bounded sequence of hops toward the player.

use bevy::prelude::*;

use super::{AttackContext, Progress};
use crate::core::{Countdown, EffectKind, Facing};
use crate::enemies::data::JumpConfig;

/// Air time before ground contact counts as a landing.
const MIN_AIR_TIME: f32 = 0.12;

const LANDING_SHAKE_DURATION: f32 = 0.25;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HopPhase {
    #[default]
    Idle,
    /// On the ground waiting for the next launch.
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HopSequence {
    config: JumpConfig,
    phase: HopPhase,
    remaining: u32,
    direction: Facing,
}

impl HopSequence {
    pub fn new(config: JumpConfig) -> Self {
        Self {
            config,
            phase: HopPhase::Idle,
            remaining: 0,
            direction: Facing::Right,
        }
    }

    pub fn phase(&self) -> HopPhase {
        self.phase
    }

    pub fn hops_remaining(&self) -> u32 {
        self.remaining
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn in_flight(&self) -> bool {
        self.phase != HopPhase::Idle
    }

    pub fn begin(&mut self, ctx: &mut AttackContext) {
        self.phase = HopPhase::Grounded;
        self.remaining = self.config.hops;
        self.direction = ctx.facing;
        ctx.timers.clear(Countdown::AttackPhase);
    }

    pub fn advance(&mut self, ctx: &mut AttackContext) -> Progress {
        match self.phase {
            HopPhase::Idle => Progress::Finished,
            HopPhase::Grounded => {
                ctx.velocity.x = 0.0;
                if ctx.timers.is_expired(Countdown::AttackPhase) && ctx.world.is_grounded() {
                    self.direction = ctx.player_direction().unwrap_or(ctx.facing);
                    *ctx.velocity = Vec2::new(
                        self.direction.sign() * self.config.horizontal_speed,
                        self.config.jump_velocity,
                    );
                    ctx.timers.start(Countdown::Airborne, MIN_AIR_TIME);
                    self.phase = HopPhase::Airborne;
                }
                Progress::Running
            }
            HopPhase::Airborne => {
                ctx.velocity.x = self.direction.sign() * self.config.horizontal_speed;
                if ctx.timers.is_active(Countdown::Airborne) || !ctx.world.is_grounded() {
                    return Progress::Running;
                }

                let feet = ctx.body.position - Vec2::new(0.0, ctx.body.size.y * 0.5);
                ctx.presentation.effect(EffectKind::GroundImpact, feet);
                if self.config.landing_shake > 0.0 {
                    ctx.presentation
                        .shake(self.config.landing_shake, LANDING_SHAKE_DURATION);
                }

                ctx.velocity.x = 0.0;
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining == 0 {
                    self.phase = HopPhase::Idle;
                    Progress::Finished
                } else {
                    self.phase = HopPhase::Grounded;
                    ctx.timers.start(Countdown::AttackPhase, self.config.hop_delay);
                    Progress::Running
                }
            }
        }
    }

    pub fn abandon(&mut self) {
        self.phase = HopPhase::Idle;
        self.remaining = 0;
    }
}
