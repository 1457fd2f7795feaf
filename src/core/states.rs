//! Game state definitions that gate which systems run.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while archetype data is read
/// - Move to `InGame` once the registry is ready
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Loading,
    InGame,
    GameOver,
}
