//! Enemy AI state machine.
//!
//! Only the proximity-driven transitions live here. `Hurt` and `Dead` are
//! entered from hit resolution; this module decides when they are left.

/// Lifecycle state gating what locomotion and attacks may do each tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
    /// Walking back and forth, turning at walls and ledges.
    #[default]
    Patrol,
    /// Pursuing the player; attacks may start.
    Aggro,
    /// Hit-stunned, carried only by knockback.
    Hurt,
    /// Terminal.
    Dead,
}

/// Distance thresholds with hysteresis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Awareness {
    pub aggro_radius: f32,
    /// Always greater than `aggro_radius`.
    pub deaggro_radius: f32,
    /// Passive archetypes never aggro from proximity.
    pub aggro_enabled: bool,
}

impl Awareness {
    fn notices(&self, distance: f32) -> bool {
        self.aggro_enabled && distance < self.aggro_radius
    }

    fn loses(&self, distance: f32) -> bool {
        !self.aggro_enabled || distance > self.deaggro_radius
    }
}

/// State for this tick given the distance to the player and whether the
/// (already aged) hit-stun countdown has run out.
pub fn next_state(
    current: AiState,
    distance: f32,
    hit_stun_over: bool,
    awareness: &Awareness,
) -> AiState {
    match current {
        AiState::Dead => AiState::Dead,
        AiState::Hurt if !hit_stun_over => AiState::Hurt,
        AiState::Hurt | AiState::Patrol => {
            if awareness.notices(distance) {
                AiState::Aggro
            } else {
                AiState::Patrol
            }
        }
        AiState::Aggro => {
            if awareness.loses(distance) {
                AiState::Patrol
            } else {
                AiState::Aggro
            }
        }
    }
}
