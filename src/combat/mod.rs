//! Combat module - damage contract, swing ids, attack sources and feedback.

mod actor;
mod components;
mod hit;
mod plugin;
mod systems;

pub use actor::{knockback_direction, ActorTuning, DamageOutcome, Damageable, Rejection};
pub use components::*;
pub use hit::{order_pending_hits, Hit, SwingId, SwingIdAllocator};
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
