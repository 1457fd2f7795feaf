//! Interfaces the combat core uses to talk to the rest of the game.
//!
//! The core never looks up globals. Each tick it receives a [`SpatialWorld`]
//! for queries and spawns, a [`Presentation`] sink for visual feedback and a
//! read-only [`PlayerView`].

use bevy::prelude::*;

/// Horizontal direction, used for facing, patrol direction and wall sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Direction from `from_x` toward `to_x`, or `None` when they coincide.
    pub fn toward(from_x: f32, to_x: f32) -> Option<Self> {
        let dx = to_x - from_x;
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Dynamic object the core asks the world to create.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DynamicSpawn {
    Coin { position: Vec2, velocity: Vec2 },
    /// The world assigns the projectile its own swing id when spawning it.
    Projectile {
        position: Vec2,
        velocity: Vec2,
        damage: i32,
    },
}

/// Spatial queries and world mutations available during a tick.
pub trait SpatialWorld {
    fn distance(&self, from: Vec2, to: Vec2) -> f32 {
        from.distance(to)
    }

    fn is_grounded(&self) -> bool;

    fn touching_wall(&self, side: Facing) -> bool;

    /// Does any solid level geometry overlap `area`?
    fn overlaps_solid(&self, area: Rect) -> bool;

    fn spawn_dynamic(&mut self, spawn: DynamicSpawn);

    fn set_collision_enabled(&mut self, enabled: bool);
}

/// Contact flags sampled for one entity before its tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sensors {
    pub grounded: bool,
    pub wall_left: bool,
    pub wall_right: bool,
}

/// Per-entity [`SpatialWorld`] that buffers every mutation.
///
/// Contact flags are sampled up front, overlap tests go through `solid`, and
/// spawns plus collision changes are collected for the caller to apply once
/// the entity's tick is over.
pub struct FrameWorld<'a> {
    sensors: Sensors,
    solid: &'a dyn Fn(Rect) -> bool,
    spawns: Vec<DynamicSpawn>,
    collision: Option<bool>,
}

impl<'a> FrameWorld<'a> {
    pub fn new(sensors: Sensors, solid: &'a dyn Fn(Rect) -> bool) -> Self {
        Self {
            sensors,
            solid,
            spawns: Vec::new(),
            collision: None,
        }
    }

    pub fn take_spawns(&mut self) -> Vec<DynamicSpawn> {
        std::mem::take(&mut self.spawns)
    }

    /// Last collision state requested during the tick, if any.
    pub fn collision_change(&self) -> Option<bool> {
        self.collision
    }
}

impl SpatialWorld for FrameWorld<'_> {
    fn is_grounded(&self) -> bool {
        self.sensors.grounded
    }

    fn touching_wall(&self, side: Facing) -> bool {
        match side {
            Facing::Left => self.sensors.wall_left,
            Facing::Right => self.sensors.wall_right,
        }
    }

    fn overlaps_solid(&self, area: Rect) -> bool {
        (self.solid)(area)
    }

    fn spawn_dynamic(&mut self, spawn: DynamicSpawn) {
        self.spawns.push(spawn);
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision = Some(enabled);
    }
}

/// Colour override requested for an entity's sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tint {
    #[default]
    Normal,
    Hurt,
    /// Attack tell shown during a windup.
    Telegraph,
}

impl Tint {
    pub fn color(self) -> Color {
        match self {
            Tint::Normal => Color::WHITE,
            Tint::Hurt => Color::srgb(1.0, 0.25, 0.25),
            Tint::Telegraph => Color::srgb(1.0, 0.8, 0.2),
        }
    }
}

/// Transient visual effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    GroundImpact,
    WallImpact,
}

/// Fire-and-forget visual feedback sink.
pub trait Presentation {
    fn tint(&mut self, tint: Tint);

    fn shake(&mut self, intensity: f32, duration: f32);

    fn effect(&mut self, kind: EffectKind, at: Vec2);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationRequest {
    Tint(Tint),
    Shake { intensity: f32, duration: f32 },
    Effect { kind: EffectKind, at: Vec2 },
}

/// [`Presentation`] that records requests in order for later playback.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PresentationQueue {
    pub requests: Vec<PresentationRequest>,
}

impl PresentationQueue {
    pub fn drain(&mut self) -> std::vec::Drain<'_, PresentationRequest> {
        self.requests.drain(..)
    }

    pub fn effects(&self) -> impl Iterator<Item = (EffectKind, Vec2)> + '_ {
        self.requests.iter().filter_map(|request| match request {
            PresentationRequest::Effect { kind, at } => Some((*kind, *at)),
            _ => None,
        })
    }

    pub fn last_tint(&self) -> Option<Tint> {
        self.requests.iter().rev().find_map(|request| match request {
            PresentationRequest::Tint(tint) => Some(*tint),
            _ => None,
        })
    }
}

impl Presentation for PresentationQueue {
    fn tint(&mut self, tint: Tint) {
        self.requests.push(PresentationRequest::Tint(tint));
    }

    fn shake(&mut self, intensity: f32, duration: f32) {
        self.requests
            .push(PresentationRequest::Shake { intensity, duration });
    }

    fn effect(&mut self, kind: EffectKind, at: Vec2) {
        self.requests.push(PresentationRequest::Effect { kind, at });
    }
}

/// What an enemy may know about the player during its tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_world_buffers_spawns_and_collision() {
        let solid = |area: Rect| area.min.y < 0.0;
        let mut world = FrameWorld::new(
            Sensors {
                grounded: true,
                wall_left: true,
                wall_right: false,
            },
            &solid,
        );

        world.spawn_dynamic(DynamicSpawn::Coin {
            position: Vec2::ZERO,
            velocity: Vec2::Y,
        });
        world.set_collision_enabled(false);

        assert!(world.touching_wall(Facing::Left));
        assert!(!world.touching_wall(Facing::Right));
        assert!(world.overlaps_solid(Rect::new(0.0, -1.0, 1.0, 1.0)));
        assert_eq!(world.take_spawns().len(), 1);
        assert_eq!(world.collision_change(), Some(false));
    }

    #[test]
    fn facing_toward_handles_ties() {
        assert_eq!(Facing::toward(0.0, 3.0), Some(Facing::Right));
        assert_eq!(Facing::toward(0.0, -3.0), Some(Facing::Left));
        assert_eq!(Facing::toward(2.0, 2.0), None);
    }
}
