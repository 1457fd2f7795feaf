//! Per-archetype attack behaviors layered over the shared AI core.
//!
//! Each archetype picks one [`AttackBehavior`] variant from its config. A
//! behavior only runs while the enemy is patrolling or aggroed; entering
//! `Hurt` or `Dead` abandons whatever it was doing.

mod boss;
mod charge;
mod hop;

pub use boss::{BossAttack, BossPhase};
pub use charge::{ChargeAttack, ChargePhase};
pub use hop::{HopPhase, HopSequence};

use bevy::prelude::*;

use super::data::BehaviorConfig;
use super::locomotion::Body;
use crate::core::{Countdown, Countdowns, Facing, Presentation, SpatialWorld};

/// Everything a behavior may read or write during one tick.
pub struct AttackContext<'a> {
    pub body: Body,
    pub player: Vec2,
    pub facing: Facing,
    /// Aggroed and not invulnerable: new attacks may begin.
    pub may_start: bool,
    pub timers: &'a mut Countdowns,
    pub velocity: &'a mut Vec2,
    pub world: &'a mut dyn SpatialWorld,
    pub presentation: &'a mut dyn Presentation,
}

impl AttackContext<'_> {
    pub fn distance(&self) -> f32 {
        self.world.distance(self.body.position, self.player)
    }

    pub fn player_direction(&self) -> Option<Facing> {
        Facing::toward(self.body.position.x, self.player.x)
    }
}

/// Result of advancing a timed sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Finished,
}

/// Who owns horizontal movement this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// No attack running; locomotion moves the enemy.
    Free,
    /// The attack set the velocity and faces the given way.
    Engaged(Facing),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttackBehavior {
    Charger(ChargeAttack),
    Brute {
        charge: ChargeAttack,
        slowed_opacity: f32,
        /// Speed multiplier while inside a hazard zone.
        hazard: Option<f32>,
    },
    Boss(BossAttack),
    Scuttler {
        hops: HopSequence,
        range: f32,
        cooldown: f32,
    },
    Passive,
}

impl AttackBehavior {
    pub fn from_config(config: &BehaviorConfig) -> Self {
        match config {
            BehaviorConfig::Charger { charge } => Self::Charger(ChargeAttack::new(charge.clone())),
            BehaviorConfig::Brute {
                charge,
                slowed_opacity,
            } => Self::Brute {
                charge: ChargeAttack::new(charge.clone()),
                slowed_opacity: *slowed_opacity,
                hazard: None,
            },
            BehaviorConfig::Boss {
                pattern,
                charge,
                jump,
                ranged,
                cooldown,
            } => Self::Boss(BossAttack::new(
                pattern.clone(),
                charge.clone(),
                jump.clone(),
                ranged.clone(),
                *cooldown,
            )),
            BehaviorConfig::Scuttler {
                jump,
                range,
                cooldown,
            } => Self::Scuttler {
                hops: HopSequence::new(jump.clone()),
                range: *range,
                cooldown: *cooldown,
            },
            BehaviorConfig::Passive => Self::Passive,
        }
    }

    pub fn aggro_enabled(&self) -> bool {
        !matches!(self, Self::Passive)
    }

    pub fn update(&mut self, ctx: &mut AttackContext) -> Control {
        match self {
            Self::Charger(charge) => run_charge(charge, ctx, 1.0),
            Self::Brute { charge, hazard, .. } => run_charge(charge, ctx, hazard.unwrap_or(1.0)),
            Self::Boss(boss) => boss.update(ctx),
            Self::Scuttler {
                hops,
                range,
                cooldown,
            } => {
                if !hops.in_flight() {
                    let ready = ctx.may_start
                        && ctx.timers.is_expired(Countdown::AttackCooldown)
                        && ctx.distance() <= *range;
                    if !ready {
                        return Control::Free;
                    }
                    hops.begin(ctx);
                }
                if hops.advance(ctx) == Progress::Finished {
                    ctx.timers.start(Countdown::AttackCooldown, *cooldown);
                }
                Control::Engaged(hops.direction())
            }
            Self::Passive => Control::Free,
        }
    }

    /// Forget any in-flight attack without side effects.
    pub fn abandon(&mut self, timers: &mut Countdowns) {
        match self {
            Self::Charger(charge) | Self::Brute { charge, .. } => charge.abandon(),
            Self::Boss(boss) => boss.abandon(),
            Self::Scuttler { hops, .. } => hops.abandon(),
            Self::Passive => {}
        }
        timers.clear(Countdown::AttackPhase);
        timers.clear(Countdown::Airborne);
    }

    pub fn in_flight(&self) -> bool {
        match self {
            Self::Charger(charge) | Self::Brute { charge, .. } => charge.in_flight(),
            Self::Boss(boss) => boss.in_flight(),
            Self::Scuttler { hops, .. } => hops.in_flight(),
            Self::Passive => false,
        }
    }

    pub fn is_telegraphing(&self) -> bool {
        match self {
            Self::Charger(charge) | Self::Brute { charge, .. } => {
                charge.phase() == ChargePhase::Windup
            }
            Self::Boss(boss) => boss.is_telegraphing(),
            Self::Scuttler { .. } | Self::Passive => false,
        }
    }

    /// Applied to locomotion speed as well as attacks.
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Self::Brute {
                hazard: Some(multiplier),
                ..
            } => *multiplier,
            _ => 1.0,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Self::Brute {
                hazard: Some(_),
                slowed_opacity,
                ..
            } => *slowed_opacity,
            _ => 1.0,
        }
    }

    /// Enter (`Some`) or leave (`None`) a slowing hazard. Only brutes react.
    pub fn set_hazard(&mut self, multiplier: Option<f32>) {
        if let Self::Brute { hazard, .. } = self {
            *hazard = multiplier;
        }
    }
}

fn run_charge(charge: &mut ChargeAttack, ctx: &mut AttackContext, speed_multiplier: f32) -> Control {
    if !charge.in_flight() {
        if !charge.can_trigger(ctx) {
            return Control::Free;
        }
        charge.begin(ctx);
    }
    if charge.advance(ctx, speed_multiplier) == Progress::Finished {
        ctx.timers.start(Countdown::AttackCooldown, charge.cooldown());
    }
    Control::Engaged(charge.direction())
}
