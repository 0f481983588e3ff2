// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed timer queue with cancel-and-replace scheduling.
//!
//! Every pending transition in the engine is owned by a [`TimerQueue`]
//! entry, keyed by the entity it settles ([`TimerKey`]). Scheduling a timer
//! for a key that already has a pending entry *replaces* that entry, so at
//! most one transition can ever be in flight per entity. This is what closes
//! the classic unsynchronized-timer race: when the user changes the filter
//! selection twice in quick succession, the first pending settle is
//! cancelled rather than left to fire over the second one.
//!
//! The queue is passive. It never reads a clock; the backend asks for
//! [`next_deadline`](TimerQueue::next_deadline), arms its own platform timer,
//! and calls [`advance`](TimerQueue::advance) on wakeup. Due entries drain in
//! deterministic (deadline, insertion) order.

use alloc::vec::Vec;

use crate::time::Instant;

/// Identifies the entity a pending timer will settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// A content item's phase transition (kick or settle).
    Item(u32),
    /// A section's phase transition.
    Section(u32),
    /// The single toast instance's next lifecycle step.
    Toast,
    /// Release of an item's touch press feedback.
    Press(u32),
    /// Reset of a copy button back to its idle state.
    Button(u32),
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    key: TimerKey,
    at: Instant,
    seq: u64,
}

/// A queue of pending timers, at most one per [`TimerKey`].
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `at`, replacing any pending entry for the
    /// same key. Returns `true` if an earlier entry was superseded.
    pub fn schedule(&mut self, key: TimerKey, at: Instant) -> bool {
        let superseded = self.cancel(key);
        let seq = self.seq;
        self.seq += 1;
        self.entries.push(Entry { key, at, seq });
        superseded
    }

    /// Cancels the pending entry for `key`, if any. Returns `true` if an
    /// entry was removed.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    /// Returns `true` if `key` has a pending entry.
    #[must_use]
    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Returns the earliest pending deadline, if any entries are pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.at).min()
    }

    /// Returns the number of pending entries.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Removes and returns all entries due at or before `now`, ordered by
    /// (deadline, insertion order).
    pub fn advance(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.at <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_unstable_by_key(|e| (e.at, e.seq));
        due.into_iter().map(|e| e.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_and_advance() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKey::Item(0), Instant(100));
        q.schedule(TimerKey::Item(1), Instant(50));

        assert_eq!(q.next_deadline(), Some(Instant(50)));
        assert_eq!(q.advance(Instant(49)), Vec::new());
        assert_eq!(q.advance(Instant(100)), [TimerKey::Item(1), TimerKey::Item(0)]);
        assert_eq!(q.pending(), 0);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn schedule_replaces_pending_entry() {
        let mut q = TimerQueue::new();
        assert!(!q.schedule(TimerKey::Item(3), Instant(100)));
        // A second schedule for the same key supersedes the first.
        assert!(q.schedule(TimerKey::Item(3), Instant(500)));

        assert_eq!(q.pending(), 1);
        // The original deadline no longer fires.
        assert_eq!(q.advance(Instant(100)), Vec::new());
        assert_eq!(q.advance(Instant(500)), [TimerKey::Item(3)]);
    }

    #[test]
    fn cancel_removes_entry() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKey::Toast, Instant(10));
        assert!(q.is_scheduled(TimerKey::Toast));
        assert!(q.cancel(TimerKey::Toast));
        assert!(!q.cancel(TimerKey::Toast));
        assert_eq!(q.advance(Instant(10)), Vec::new());
    }

    #[test]
    fn distinct_keys_do_not_interfere() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKey::Item(0), Instant(100));
        q.schedule(TimerKey::Section(0), Instant(100));
        q.schedule(TimerKey::Press(0), Instant(100));

        assert!(!q.schedule(TimerKey::Button(0), Instant(100)));
        assert_eq!(q.pending(), 4);
    }

    #[test]
    fn same_deadline_drains_in_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKey::Section(1), Instant(100));
        q.schedule(TimerKey::Item(7), Instant(100));
        assert_eq!(
            q.advance(Instant(100)),
            [TimerKey::Section(1), TimerKey::Item(7)]
        );
    }
}
