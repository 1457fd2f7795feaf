//! Core plugin that sets up game states, events, and the frame clock.

use bevy::prelude::*;

use super::events::*;
use super::rng::CombatRng;
use super::schedule::{advance_frame_clock, FrameClock};
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver)
/// - Global events (DamageEvent, DeathEvent, SpawnEvent, ...)
/// - The monotonic frame clock and the seeded combat RNG
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<FrameClock>()
            .init_resource::<CombatRng>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<SpawnEvent>()
            .add_event::<PickupCollectedEvent>()
            .add_systems(
                First,
                advance_frame_clock.run_if(in_state(GameState::InGame)),
            );
    }
}
