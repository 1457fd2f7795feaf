//! Enemies module - archetype data, the AI core and its Bevy systems.
//!
//! [`Enemy`] holds everything one combatant needs and is advanced by
//! [`Enemy::tick`]; the systems in this module only move data between the
//! ECS and that core.

pub mod ai;
pub mod behavior;
mod components;
pub mod data;
mod enemy;
mod error;
pub mod locomotion;
mod plugin;
mod spawning;
mod systems;

pub use ai::AiState;
pub use components::*;
pub use data::{ArchetypeRegistry, CombatConfig};
pub use enemy::{Appearance, DeathReport, Enemy, TickContext};
pub use error::ConfigError;
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
pub use systems::{overlaps_fixed, sample_sensors};
