//! Global events used for cross-system communication.
//!
//! Attack sources queue [`DamageEvent`]s; the combat plugin sorts and
//! resolves them. Enemies and the player announce deaths with
//! [`DeathEvent`], and anything the core wants created in the world travels
//! as a [`SpawnEvent`].

use bevy::prelude::*;

use super::collaborators::DynamicSpawn;
use crate::combat::Hit;

/// Queued damage application against `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub hit: Hit,
}

/// Sent once when an entity's hit points reach zero.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
    pub position: Vec2,
    /// Archetype display name, or "Player".
    pub name: String,
    pub drops: u32,
}

/// A dynamic object requested by the combat core.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnEvent(pub DynamicSpawn);

/// Sent when the player collects a coin.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupCollectedEvent {
    pub pickup: Entity,
    pub total: u32,
}
