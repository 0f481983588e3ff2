// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the engine.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! engine entry points call as state changes. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::backend::CopyOutcome;
use crate::time::Instant;
use crate::timer::TimerKey;
use crate::toast::ToastKind;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a filter is applied to the page.
#[derive(Clone, Copy, Debug)]
pub struct FilterEvent {
    /// Time the filter was applied.
    pub at: Instant,
    /// Items that started entering.
    pub items_shown: u32,
    /// Items that started leaving.
    pub items_hidden: u32,
    /// Sections that started entering.
    pub sections_shown: u32,
    /// Sections that started leaving.
    pub sections_hidden: u32,
}

/// Emitted when a transition timer is scheduled.
#[derive(Clone, Copy, Debug)]
pub struct TimerScheduledEvent {
    /// What the timer drives.
    pub key: TimerKey,
    /// When the timer is due.
    pub at: Instant,
    /// Whether an earlier timer for the same key was cancelled.
    pub superseded: bool,
}

/// Emitted when a due timer fires during [`advance`].
///
/// [`advance`]: crate::engine::Engine::advance
#[derive(Clone, Copy, Debug)]
pub struct TimerFiredEvent {
    /// What the timer drives.
    pub key: TimerKey,
    /// The time passed to `advance`.
    pub now: Instant,
}

/// Emitted when a toast is shown.
#[derive(Clone, Copy, Debug)]
pub struct ToastEvent {
    /// Visual flavor of the new toast.
    pub kind: ToastKind,
    /// Whether an existing toast was replaced.
    pub replaced: bool,
    /// Time the toast was shown.
    pub at: Instant,
}

/// Emitted when a clipboard copy completes.
#[derive(Clone, Copy, Debug)]
pub struct CopyEvent {
    /// Slot index of the button whose payload was copied.
    pub button_index: u32,
    /// How the copy ended.
    pub outcome: CopyOutcome,
    /// Time the outcome was reported.
    pub at: Instant,
}

/// Emitted when a semantic input event is handled.
#[derive(Clone, Copy, Debug)]
pub struct ActivationEvent {
    /// Time the event was handled.
    pub at: Instant,
    /// Number of actions returned to the backend.
    pub actions: usize,
}

/// Emitted when an item scrolls into view for the first time.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Index of the revealed item.
    pub item_index: u32,
    /// Time the reveal was reported.
    pub at: Instant,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a filter is applied.
    fn on_filter(&mut self, e: &FilterEvent) {
        _ = e;
    }

    /// Called when a transition timer is scheduled.
    fn on_timer_scheduled(&mut self, e: &TimerScheduledEvent) {
        _ = e;
    }

    /// Called when a due timer fires.
    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        _ = e;
    }

    /// Called when a toast is shown.
    fn on_toast(&mut self, e: &ToastEvent) {
        _ = e;
    }

    /// Called when a clipboard copy completes.
    fn on_copy(&mut self, e: &CopyEvent) {
        _ = e;
    }

    /// Called when a semantic input event is handled.
    fn on_activation(&mut self, e: &ActivationEvent) {
        _ = e;
    }

    /// Called when an item is revealed by scrolling.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FilterEvent`].
    #[inline]
    pub fn filter(&mut self, e: &FilterEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_filter(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerScheduledEvent`].
    #[inline]
    pub fn timer_scheduled(&mut self, e: &TimerScheduledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_scheduled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerFiredEvent`].
    #[inline]
    pub fn timer_fired(&mut self, e: &TimerFiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_fired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ToastEvent`].
    #[inline]
    pub fn toast(&mut self, e: &ToastEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_toast(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CopyEvent`].
    #[inline]
    pub fn copy(&mut self, e: &CopyEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_copy(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActivationEvent`].
    #[inline]
    pub fn activation(&mut self, e: &ActivationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_activation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filter() -> FilterEvent {
        FilterEvent {
            at: Instant(1_000_000),
            items_shown: 3,
            items_hidden: 2,
            sections_shown: 1,
            sections_hidden: 1,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_filter(&sample_filter());
        sink.on_timer_fired(&TimerFiredEvent {
            key: TimerKey::Toast,
            now: Instant(5),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.filter(&sample_filter());
        tracer.toast(&ToastEvent {
            kind: ToastKind::Success,
            replaced: false,
            at: Instant(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            fired: Vec<TimerKey>,
        }
        impl TraceSink for RecordingSink {
            fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
                self.fired.push(e.key);
            }
        }

        let mut sink = RecordingSink { fired: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.timer_fired(&TimerFiredEvent {
            key: TimerKey::Item(4),
            now: Instant(9),
        });
        drop(tracer);
        assert_eq!(sink.fired, &[TimerKey::Item(4)]);
    }
}
