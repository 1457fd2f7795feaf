//! Enemy-related components placed in the level.

use bevy::prelude::*;

/// Where an enemy of `archetype` appears once gameplay starts.
#[derive(Component, Debug, Clone)]
pub struct SpawnPoint {
    /// Registry key (the RON file stem).
    pub archetype: String,
}

impl SpawnPoint {
    pub fn new(archetype: impl Into<String>) -> Self {
        Self {
            archetype: archetype.into(),
        }
    }
}

/// Area that slows the enemies walking through it.
#[derive(Component, Debug, Clone, Copy)]
pub struct HazardZone {
    pub area: Rect,
    /// Speed multiplier applied inside the zone.
    pub multiplier: f32,
}

impl HazardZone {
    pub fn contains(&self, point: Vec2) -> bool {
        self.area.contains(point)
    }
}

/// Short-lived impact effect sprite.
#[derive(Component)]
pub struct ImpactBurst;

/// Deferred removal of an [`ImpactBurst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpireEffect(pub Entity);
