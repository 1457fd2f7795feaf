//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::components::ExpireEffect;
use super::data::{load_archetypes, ArchetypeRegistry};
use super::spawning::spawn_at_spawn_points;
use super::systems;
use crate::combat::CombatSet;
use crate::core::{GameState, Scheduler};

/// Enemy plugin - handles archetype loading, spawning, AI ticks and removal.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArchetypeRegistry>()
            .init_resource::<Scheduler<ExpireEffect>>()
            // Load definitions, then enter gameplay
            .add_systems(Startup, load_archetypes)
            // Spawn points become enemies once the registry is ready
            .add_systems(OnEnter(GameState::InGame), spawn_at_spawn_points)
            // AI runs after attack sources appear and before overlaps are tested
            .add_systems(
                Update,
                (
                    systems::apply_hazard_zones,
                    systems::tick_enemies,
                    systems::expire_effects,
                    systems::sync_enemy_appearance,
                    systems::despawn_finished_enemies,
                )
                    .chain()
                    .after(CombatSet::Input)
                    .before(CombatSet::Detect)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
