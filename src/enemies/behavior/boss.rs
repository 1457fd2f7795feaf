//! Multi-mode boss cycling through jump, ranged and charge moves.

use bevy::prelude::*;

use super::charge::{ChargeAttack, ChargePhase};
use super::hop::HopSequence;
use super::{AttackContext, Control, Progress};
use crate::core::{Countdown, DynamicSpawn};
use crate::enemies::data::{BossMove, ChargeConfig, JumpConfig, RangedConfig};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    #[default]
    Ready,
    Jumping,
    /// Recoloured tell before the shot.
    RangedWindup,
    RangedRecovery,
    Charging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossAttack {
    pattern: Vec<BossMove>,
    /// Number of moves started so far; selects the next pattern entry.
    cycle: u64,
    phase: BossPhase,
    charge: ChargeAttack,
    hops: HopSequence,
    ranged: RangedConfig,
    cooldown: f32,
    last_aim: Option<Vec2>,
}

impl BossAttack {
    pub fn new(
        pattern: Vec<BossMove>,
        charge: ChargeConfig,
        jump: JumpConfig,
        ranged: RangedConfig,
        cooldown: f32,
    ) -> Self {
        Self {
            pattern,
            cycle: 0,
            phase: BossPhase::Ready,
            charge: ChargeAttack::new(charge),
            hops: HopSequence::new(jump),
            ranged,
            cooldown,
            last_aim: None,
        }
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Move the next cycle will start.
    pub fn next_move(&self) -> BossMove {
        // Non-empty pattern is guaranteed by config validation.
        self.pattern[(self.cycle % self.pattern.len() as u64) as usize]
    }

    /// Direction of the most recent projectile.
    pub fn last_aim(&self) -> Option<Vec2> {
        self.last_aim
    }

    pub fn is_telegraphing(&self) -> bool {
        match self.phase {
            BossPhase::RangedWindup => true,
            BossPhase::Charging => self.charge.phase() == ChargePhase::Windup,
            _ => false,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.phase != BossPhase::Ready
    }

    pub fn update(&mut self, ctx: &mut AttackContext) -> Control {
        if self.phase == BossPhase::Ready {
            if !ctx.may_start || ctx.timers.is_active(Countdown::AttackCooldown) {
                return Control::Free;
            }
            self.start_next(ctx);
        }

        match self.phase {
            BossPhase::Ready => Control::Free,
            BossPhase::Jumping => {
                if self.hops.advance(ctx) == Progress::Finished {
                    self.finish(ctx);
                }
                Control::Engaged(self.hops.direction())
            }
            BossPhase::RangedWindup => {
                ctx.velocity.x = 0.0;
                if ctx.timers.is_expired(Countdown::AttackPhase) {
                    self.fire(ctx);
                }
                Control::Engaged(ctx.player_direction().unwrap_or(ctx.facing))
            }
            BossPhase::RangedRecovery => {
                ctx.velocity.x = 0.0;
                if ctx.timers.is_expired(Countdown::AttackPhase) {
                    self.finish(ctx);
                }
                Control::Engaged(ctx.facing)
            }
            BossPhase::Charging => {
                if self.charge.advance(ctx, 1.0) == Progress::Finished {
                    self.finish(ctx);
                }
                Control::Engaged(self.charge.direction())
            }
        }
    }

    fn start_next(&mut self, ctx: &mut AttackContext) {
        let next = self.next_move();
        self.cycle += 1;
        debug!("Boss starting {:?} (cycle {})", next, self.cycle);

        match next {
            BossMove::Jump => {
                self.hops.begin(ctx);
                self.phase = BossPhase::Jumping;
            }
            BossMove::Ranged => {
                ctx.timers.start(Countdown::AttackPhase, self.ranged.windup);
                ctx.velocity.x = 0.0;
                self.phase = BossPhase::RangedWindup;
            }
            BossMove::Charge => {
                if let Some(toward) = ctx.player_direction() {
                    ctx.facing = toward;
                }
                self.charge.begin(ctx);
                self.phase = BossPhase::Charging;
            }
        }
    }

    /// Spawn one projectile aimed where the player is right now.
    fn fire(&mut self, ctx: &mut AttackContext) {
        let mut aim = (ctx.player - ctx.body.position).normalize_or_zero();
        if aim == Vec2::ZERO {
            aim = Vec2::new(ctx.facing.sign(), 0.0);
        }

        ctx.world.spawn_dynamic(DynamicSpawn::Projectile {
            position: ctx.body.position,
            velocity: aim * self.ranged.projectile_speed,
            damage: self.ranged.projectile_damage,
        });
        self.last_aim = Some(aim);

        ctx.timers.start(Countdown::AttackPhase, self.ranged.recovery);
        self.phase = BossPhase::RangedRecovery;
    }

    fn finish(&mut self, ctx: &mut AttackContext) {
        self.phase = BossPhase::Ready;
        ctx.timers.start(Countdown::AttackCooldown, self.cooldown);
    }

    /// Drop whatever move is running; the cycle counter is kept.
    pub fn abandon(&mut self) {
        self.phase = BossPhase::Ready;
        self.charge.abandon();
        self.hops.abandon();
    }
}
