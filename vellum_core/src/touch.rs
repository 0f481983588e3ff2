// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-to-refresh gesture tracking.
//!
//! The tracker follows one vertical drag at a time. While the page is
//! scrolled to the top and the finger has moved down by less than the
//! overscroll limit, [`PullTracker::update`] yields a damped visual offset
//! for the backend to apply. Releasing past the trigger distance reports a
//! completed pull.

/// Downward travel beyond which [`PullTracker::finish`] reports a pull.
pub const PULL_TRIGGER_DISTANCE: f64 = 50.0;

/// Downward travel at which the visual offset stops growing.
pub const PULL_MAX_DISTANCE: f64 = 100.0;

/// Fraction of finger travel applied as visual offset.
pub const PULL_DAMPING: f64 = 0.5;

/// State of one in-progress pull gesture.
#[derive(Debug, Default)]
pub struct PullTracker {
    start_y: Option<f64>,
    distance: f64,
}

impl PullTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_y.is_some()
    }

    /// Records the touch-down position.
    pub fn begin(&mut self, y: f64) {
        self.start_y = Some(y);
        self.distance = 0.0;
    }

    /// Records a finger move.
    ///
    /// Travel only accrues while the page is scrolled to the top; moves
    /// mid-scroll leave the tracked distance untouched, so a long swipe
    /// through page content cannot trigger a refresh.
    ///
    /// Returns the damped visual offset to apply while the travel is within
    /// `(0, PULL_MAX_DISTANCE)`. Returns `None` otherwise, including when no
    /// gesture is in progress.
    pub fn update(&mut self, y: f64, at_top: bool) -> Option<f64> {
        let start = self.start_y?;
        if !at_top {
            return None;
        }
        let distance = y - start;
        self.distance = distance;
        if distance > 0.0 && distance < PULL_MAX_DISTANCE {
            Some(distance * PULL_DAMPING)
        } else {
            None
        }
    }

    /// Ends the gesture.
    ///
    /// Returns `true` if the final travel passed the trigger distance.
    pub fn finish(&mut self) -> bool {
        let triggered = self.start_y.is_some() && self.distance > PULL_TRIGGER_DISTANCE;
        self.start_y = None;
        self.distance = 0.0;
        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_pull_does_not_trigger() {
        let mut pull = PullTracker::new();
        pull.begin(100.0);
        assert_eq!(pull.update(130.0, true), Some(15.0));
        assert!(!pull.finish());
        assert!(!pull.is_active());
    }

    #[test]
    fn long_pull_triggers() {
        let mut pull = PullTracker::new();
        pull.begin(100.0);
        assert_eq!(pull.update(180.0, true), Some(40.0));
        assert!(pull.finish());
    }

    #[test]
    fn offset_stops_past_overscroll_limit() {
        let mut pull = PullTracker::new();
        pull.begin(0.0);
        assert_eq!(pull.update(99.0, true), Some(49.5));
        assert_eq!(pull.update(100.0, true), None);
        assert!(pull.finish());
    }

    #[test]
    fn mid_page_swipe_never_triggers() {
        let mut pull = PullTracker::new();
        pull.begin(100.0);
        assert_eq!(pull.update(200.0, false), None);
        assert!(!pull.finish());
    }

    #[test]
    fn scrolling_away_freezes_accrued_travel() {
        let mut pull = PullTracker::new();
        pull.begin(0.0);
        assert_eq!(pull.update(60.0, true), Some(30.0));
        // Moves while scrolled away leave the tracked distance alone.
        assert_eq!(pull.update(200.0, false), None);
        assert!(pull.finish());
    }

    #[test]
    fn update_without_begin_is_ignored() {
        let mut pull = PullTracker::new();
        assert_eq!(pull.update(60.0, true), None);
        assert!(!pull.finish());
    }

    #[test]
    fn upward_drag_yields_no_offset() {
        let mut pull = PullTracker::new();
        pull.begin(200.0);
        assert_eq!(pull.update(150.0, true), None);
        assert!(!pull.finish());
    }
}
