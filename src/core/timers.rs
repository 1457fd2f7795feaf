//! Named countdowns decayed uniformly once per tick.
//!
//! Every timed window an actor owns (hit-stun, invulnerability, attack
//! phases, ...) lives in one [`Countdowns`] table. The table is aged once at
//! the start of a tick, so every transition decision made later in the same
//! tick sees already-decayed values.

/// Identifies one countdown slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Countdown {
    HitStun,
    Invulnerability,
    HurtFlash,
    TurnCooldown,
    /// Remaining time of the current attack phase (windup, charge, recovery).
    AttackPhase,
    AttackCooldown,
    /// Minimum air time before a hop can register a landing.
    Airborne,
    Death,
}

impl Countdown {
    const COUNT: usize = 8;

    fn slot(self) -> usize {
        self as usize
    }
}

/// Fixed table of countdowns, all in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdowns {
    remaining: [f32; Countdown::COUNT],
}

impl Countdowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Age every countdown by `delta` seconds, clamping at zero.
    pub fn tick(&mut self, delta: f32) {
        for value in self.remaining.iter_mut() {
            *value = (*value - delta).max(0.0);
        }
    }

    pub fn start(&mut self, which: Countdown, seconds: f32) {
        self.remaining[which.slot()] = seconds.max(0.0);
    }

    pub fn clear(&mut self, which: Countdown) {
        self.remaining[which.slot()] = 0.0;
    }

    pub fn remaining(&self, which: Countdown) -> f32 {
        self.remaining[which.slot()]
    }

    pub fn is_active(&self, which: Countdown) -> bool {
        self.remaining(which) > 0.0
    }

    pub fn is_expired(&self, which: Countdown) -> bool {
        !self.is_active(which)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decays_every_slot_and_clamps() {
        let mut timers = Countdowns::new();
        timers.start(Countdown::HitStun, 0.25);
        timers.start(Countdown::Death, 1.0);

        timers.tick(0.5);

        assert!(timers.is_expired(Countdown::HitStun));
        assert_eq!(timers.remaining(Countdown::HitStun), 0.0);
        assert!((timers.remaining(Countdown::Death) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn negative_start_is_treated_as_expired() {
        let mut timers = Countdowns::new();
        timers.start(Countdown::TurnCooldown, -3.0);
        assert!(timers.is_expired(Countdown::TurnCooldown));
    }

    #[test]
    fn clear_stops_a_running_countdown() {
        let mut timers = Countdowns::new();
        timers.start(Countdown::AttackPhase, 2.0);
        timers.clear(Countdown::AttackPhase);
        assert!(!timers.is_active(Countdown::AttackPhase));
    }
}
