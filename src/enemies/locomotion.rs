//! Perception and horizontal movement for patrolling and pursuing enemies.

use bevy::prelude::*;

use crate::core::{Countdown, Countdowns, Facing, SpatialWorld};

/// Body geometry needed to place probes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center of the bounding box.
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// Rectangle just past the leading edge and below the feet.
    pub fn ground_probe(&self, direction: Facing, probe: Vec2) -> Rect {
        let front = self.position.x + direction.sign() * self.size.x * 0.5;
        let feet = self.position.y - self.size.y * 0.5;
        Rect::from_center_size(
            Vec2::new(front + direction.sign() * probe.x * 0.5, feet - probe.y * 0.5),
            probe,
        )
    }
}

/// Patrol direction and the turn bookkeeping around it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Locomotion {
    direction: Facing,
}

impl Locomotion {
    pub fn new(direction: Facing) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    fn turn(&mut self, timers: &mut Countdowns, turn_cooldown: f32) {
        self.direction = self.direction.flipped();
        timers.start(Countdown::TurnCooldown, turn_cooldown);
    }

    /// Walk the patrol route and return the horizontal velocity.
    ///
    /// Walls and ledges ahead flip the direction, at most once per turn
    /// cooldown.
    pub fn patrol(
        &mut self,
        body: &Body,
        probe: Vec2,
        speed: f32,
        turn_cooldown: f32,
        world: &dyn SpatialWorld,
        timers: &mut Countdowns,
    ) -> f32 {
        if timers.is_expired(Countdown::TurnCooldown) {
            if world.touching_wall(self.direction) {
                self.turn(timers, turn_cooldown);
            } else if world.is_grounded()
                && !world.overlaps_solid(body.ground_probe(self.direction, probe))
            {
                self.turn(timers, turn_cooldown);
            }
        }

        self.direction.sign() * speed
    }

    /// Chase the player horizontally and return the horizontal velocity.
    ///
    /// A wall in the way stops the chase instead of turning it around.
    pub fn pursue(&mut self, body: &Body, player_x: f32, speed: f32, world: &dyn SpatialWorld) -> f32 {
        if let Some(direction) = Facing::toward(body.position.x, player_x) {
            self.direction = direction;
        }

        if world.touching_wall(self.direction) {
            0.0
        } else {
            self.direction.sign() * speed
        }
    }
}
