//! The enemy instance: one damageable actor driven by the AI core.

use bevy::prelude::*;
use rand::Rng;
use std::sync::Arc;

use super::ai::{self, AiState, Awareness};
use super::behavior::{AttackBehavior, AttackContext, Control};
use super::data::CombatConfig;
use super::error::ConfigError;
use super::locomotion::{Body, Locomotion};
use crate::combat::{ActorTuning, DamageOutcome, Damageable, Hit, SwingId};
use crate::core::{
    Countdown, Countdowns, Facing, PlayerView, Presentation, SpatialWorld, Tint,
};
use crate::loot;

/// Collaborators handed to [`Enemy::tick`].
pub struct TickContext<'a> {
    /// Seconds since the previous tick.
    pub delta: f32,
    pub player: PlayerView,
    pub world: &'a mut dyn SpatialWorld,
    pub presentation: &'a mut dyn Presentation,
}

/// Visual state derived at the end of every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub tint: Tint,
    pub opacity: f32,
    pub scale: f32,
    pub facing: Facing,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            tint: Tint::Normal,
            opacity: 1.0,
            scale: 1.0,
            facing: Facing::Right,
        }
    }
}

/// What happened during the death transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathReport {
    pub drops: u32,
}

#[derive(Component, Debug)]
pub struct Enemy {
    config: Arc<CombatConfig>,
    tuning: ActorTuning,
    actor: Damageable,
    timers: Countdowns,
    state: AiState,
    locomotion: Locomotion,
    behavior: AttackBehavior,
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    collision_enabled: bool,
    appearance: Appearance,
    death: Option<DeathReport>,
}

impl Enemy {
    /// Build an enemy, rejecting configurations that fail validation.
    pub fn new(config: Arc<CombatConfig>, spawn: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tuning: config.actor_tuning(),
            actor: Damageable::new(config.max_hp),
            timers: Countdowns::new(),
            state: AiState::Patrol,
            locomotion: Locomotion::new(Facing::Right),
            behavior: AttackBehavior::from_config(&config.behavior),
            position: spawn,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            collision_enabled: true,
            appearance: Appearance::default(),
            death: None,
            config,
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn hp(&self) -> i32 {
        self.actor.hp()
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == AiState::Dead
    }

    pub fn timers(&self) -> &Countdowns {
        &self.timers
    }

    pub fn behavior(&self) -> &AttackBehavior {
        &self.behavior
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn patrol_direction(&self) -> Facing {
        self.locomotion.direction()
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn death(&self) -> Option<DeathReport> {
        self.death
    }

    pub fn body(&self) -> Body {
        Body {
            position: self.position,
            size: self.config.size(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    /// Dead and the shrink/fade sequence has finished.
    pub fn is_removable(&self) -> bool {
        self.is_dead() && self.timers.is_expired(Countdown::Death)
    }

    /// Copy the physics body's state in before a tick.
    pub fn sync_body(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Enter or leave a slowing hazard zone.
    pub fn set_hazard(&mut self, multiplier: Option<f32>) {
        self.behavior.set_hazard(multiplier);
    }

    /// Body-contact hit against the player, if this enemy can deal one.
    pub fn contact_hit(&self) -> Option<Hit> {
        if self.is_dead() || self.config.contact_damage <= 0 {
            return None;
        }
        Some(Hit::new(
            self.config.contact_damage,
            self.position.x,
            SwingId::NONE,
        ))
    }

    /// Advance one frame: timers, AI transition, behavior, appearance.
    pub fn tick(&mut self, ctx: &mut TickContext) {
        self.timers.tick(ctx.delta);

        if self.is_dead() {
            self.velocity = Vec2::ZERO;
            self.derive_appearance(ctx.presentation);
            return;
        }

        let awareness = Awareness {
            aggro_radius: self.config.aggro_radius,
            deaggro_radius: self.config.deaggro_radius,
            aggro_enabled: self.behavior.aggro_enabled(),
        };
        let distance = ctx.world.distance(self.position, ctx.player.position);
        let next = ai::next_state(
            self.state,
            distance,
            self.timers.is_expired(Countdown::HitStun),
            &awareness,
        );
        if next != self.state {
            debug!("{}: {:?} -> {:?}", self.config.name, self.state, next);
            self.state = next;
        }

        if matches!(self.state, AiState::Patrol | AiState::Aggro) {
            self.act(ctx);
        }

        self.derive_appearance(ctx.presentation);
    }

    fn act(&mut self, ctx: &mut TickContext) {
        let body = self.body();
        let speed_multiplier = self.behavior.speed_multiplier();

        let control = {
            let mut attack = AttackContext {
                body,
                player: ctx.player.position,
                facing: self.facing,
                may_start: self.state == AiState::Aggro
                    && self.timers.is_expired(Countdown::Invulnerability),
                timers: &mut self.timers,
                velocity: &mut self.velocity,
                world: &mut *ctx.world,
                presentation: &mut *ctx.presentation,
            };
            self.behavior.update(&mut attack)
        };

        match control {
            Control::Engaged(facing) => self.facing = facing,
            Control::Free => {
                self.velocity.x = match self.state {
                    AiState::Aggro => self.locomotion.pursue(
                        &body,
                        ctx.player.position.x,
                        self.config.aggro_speed * speed_multiplier,
                        &*ctx.world,
                    ),
                    _ => self.locomotion.patrol(
                        &body,
                        self.config.ground_probe(),
                        self.config.patrol_speed * speed_multiplier,
                        self.config.turn_cooldown,
                        &*ctx.world,
                        &mut self.timers,
                    ),
                };
                self.facing = self.locomotion.direction();
            }
        }
    }

    fn derive_appearance(&mut self, presentation: &mut dyn Presentation) {
        let next = if self.is_dead() {
            let progress = 1.0
                - self.timers.remaining(Countdown::Death) / self.config.death_duration;
            Appearance {
                tint: Tint::Normal,
                opacity: 1.0 - progress,
                scale: 1.0 - progress,
                facing: self.facing,
            }
        } else {
            let tint = if self.timers.is_active(Countdown::HurtFlash) {
                Tint::Hurt
            } else if self.behavior.is_telegraphing() {
                Tint::Telegraph
            } else {
                Tint::Normal
            };
            Appearance {
                tint,
                opacity: self.behavior.opacity(),
                scale: 1.0,
                facing: self.facing,
            }
        };

        if next.tint != self.appearance.tint {
            presentation.tint(next.tint);
        }
        self.appearance = next;
    }

    /// Resolve one incoming hit. Returns whether it landed.
    ///
    /// A lethal hit runs the death transition immediately: collision is
    /// switched off and the coin drop is spawned through `world`.
    pub fn apply_damage<R: Rng + ?Sized>(
        &mut self,
        hit: &Hit,
        world: &mut dyn SpatialWorld,
        rng: &mut R,
    ) -> bool {
        let outcome = self.actor.apply_damage(
            hit,
            self.position.x,
            &self.tuning,
            &mut self.timers,
            &mut self.velocity,
        );

        match outcome {
            DamageOutcome::Ignored(reason) => {
                debug!("{}: hit ignored ({:?})", self.config.name, reason);
                false
            }
            DamageOutcome::Hurt => {
                self.behavior.abandon(&mut self.timers);
                self.state = AiState::Hurt;
                true
            }
            DamageOutcome::Killed => {
                self.die(world, rng);
                true
            }
        }
    }

    /// Enter the terminal state. Calling this again has no effect.
    fn die<R: Rng + ?Sized>(&mut self, world: &mut dyn SpatialWorld, rng: &mut R) {
        if self.death.is_some() {
            return;
        }

        self.behavior.abandon(&mut self.timers);
        self.state = AiState::Dead;
        self.velocity = Vec2::ZERO;
        self.timers.start(Countdown::Death, self.config.death_duration);

        self.collision_enabled = false;
        world.set_collision_enabled(false);

        let (min, max) = self.config.loot;
        let drops = loot::roll_drop_count(min, max, rng);
        for coin in loot::scatter_coins(self.position, drops, rng) {
            world.spawn_dynamic(coin);
        }

        info!(
            "{} died at ({:.0}, {:.0}), dropping {} coins",
            self.config.name, self.position.x, self.position.y, drops
        );
        self.death = Some(DeathReport { drops });
    }
}
