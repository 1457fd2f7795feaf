//! Monotonic frame clock and tick-keyed one-shot events.
//!
//! Deferred work (settling a coin, clearing a flash) is queued against the
//! tick number it should run on instead of wall-clock callbacks, so replays
//! with the same inputs produce the same results.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bevy::prelude::*;

/// Counts update passes since startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    tick: u64,
}

impl FrameClock {
    pub fn now(&self) -> u64 {
        self.tick
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

#[derive(Debug)]
struct Entry<E> {
    due: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Queue of events released once the frame clock reaches their tick.
///
/// Events due on the same tick come out in the order they were scheduled.
#[derive(Resource, Debug)]
pub struct Scheduler<E> {
    queue: BinaryHeap<Reverse<Entry<E>>>,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> Scheduler<E> {
    /// Schedule `event` to fire `delay` ticks after `now`.
    pub fn schedule_in(&mut self, now: u64, delay: u64, event: E) {
        self.schedule_at(now.saturating_add(delay), event);
    }

    pub fn schedule_at(&mut self, due: u64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, event }));
    }

    /// Remove and return every event due at or before `now`.
    pub fn drain_due(&mut self, now: u64) -> Vec<E> {
        let mut due = Vec::new();
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= now)
        {
            if let Some(Reverse(entry)) = self.queue.pop() {
                due.push(entry.event);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Advance the frame clock once per update, before any gameplay system.
pub fn advance_frame_clock(mut clock: ResMut<FrameClock>) {
    clock.advance();
}
