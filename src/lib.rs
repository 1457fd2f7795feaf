//! Hollowblade - combat and enemy AI for a 2D side-scroller in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, frame clock, countdowns and the
//!   collaborator traits the combat core talks through
//! - **Combat**: Damage contract, swing ids, player swings, projectiles,
//!   contact damage and ordered hit resolution
//! - **Enemies**: Archetype data, the per-enemy AI core and its systems
//! - **Loot**: Coin drops, settling and collection
//!
//! The enemy core ([`enemies::Enemy`]) is plain data advanced by
//! [`enemies::Enemy::tick`]. It never reaches into the ECS; the systems hand
//! it a [`core::SpatialWorld`] and a [`core::Presentation`] every frame.

pub mod combat;
pub mod core;
pub mod enemies;
pub mod loot;

#[cfg(test)]
mod testing;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics is not included; add `RapierPhysicsPlugin` alongside it.
pub struct HollowbladePlugin;

impl Plugin for HollowbladePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Loot systems
            .add_plugins(loot::LootPlugin);
    }
}
