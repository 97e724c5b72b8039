//! Delayed events on the scene clock
//!
//! Timers live in a [`SlotMap`] so a scheduled entry can be cancelled by key
//! without searching, and a cancelled key can never alias a newer timer.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerKey;
}

struct Timer<E> {
    due: Duration,
    event: E,
}

/// Queue of events that fire once the scene clock reaches their due time
pub struct TimerQueue<E> {
    timers: SlotMap<TimerKey, Timer<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self { timers: SlotMap::with_key() }
    }

    /// Schedule `event` to fire at scene time `due`
    pub fn schedule(&mut self, due: Duration, event: E) -> TimerKey {
        self.timers.insert(Timer { due, event })
    }

    /// Cancel a pending timer, returning its event if it had not fired yet
    pub fn cancel(&mut self, key: TimerKey) -> Option<E> {
        self.timers.remove(key).map(|t| t.event)
    }

    /// Remove and return every event due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: Duration) -> Vec<E> {
        let mut due: Vec<(Duration, TimerKey)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .map(|(key, timer)| (timer.due, key))
            .collect();
        due.sort_by_key(|(at, _)| *at);
        due.into_iter()
            .filter_map(|(_, key)| self.timers.remove(key).map(|t| t.event))
            .collect()
    }

    #[inline]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
