//! Attack actions and the swing-id correlation key.

use bevy::prelude::*;

/// Correlates every frame of one discrete attack action.
///
/// A target remembers the last swing that damaged it and rejects further
/// hits carrying the same id. [`SwingId::NONE`] never suppresses anything;
/// it is used for body contact, which is gated by invulnerability instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwingId(pub u64);

impl SwingId {
    pub const NONE: SwingId = SwingId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Hands out swing ids, one per attack action, never reusing a value.
#[derive(Resource, Debug, Default)]
pub struct SwingIdAllocator {
    last: u64,
}

impl SwingIdAllocator {
    pub fn next(&mut self) -> SwingId {
        self.last += 1;
        SwingId(self.last)
    }
}

/// One damage application request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Never negative; nothing in the combat core heals.
    pub damage: i32,
    /// Horizontal position of the attacker, used for knockback direction.
    pub source_x: f32,
    pub swing: SwingId,
}

impl Hit {
    pub fn new(damage: i32, source_x: f32, swing: SwingId) -> Self {
        Self {
            damage: damage.max(0),
            source_x,
            swing,
        }
    }
}

/// Sort pending hits into resolution order.
///
/// Overlapping attacks landing in the same frame are applied by ascending
/// swing id, then by target entity bits. Older swings therefore win ties,
/// and the outcome never depends on query iteration order.
pub fn order_pending_hits(pending: &mut [(Entity, Hit)]) {
    pending.sort_by(|(a_target, a_hit), (b_target, b_hit)| {
        a_hit
            .swing
            .cmp(&b_hit.swing)
            .then_with(|| a_target.to_bits().cmp(&b_target.to_bits()))
    });
}
