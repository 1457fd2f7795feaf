//! Core module - states, events, timing and the collaborator interfaces.
//!
//! Everything else builds on this: the countdown table and scheduler keep
//! per-entity timing deterministic, and the collaborator traits are the only
//! way the combat core reaches the world or the screen.

mod collaborators;
mod events;
mod plugin;
mod rng;
mod schedule;
mod states;
mod timers;

pub use collaborators::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use rng::CombatRng;
pub use schedule::{advance_frame_clock, FrameClock, Scheduler};
pub use states::*;
pub use timers::{Countdown, Countdowns};
