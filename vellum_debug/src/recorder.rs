// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use vellum_core::backend::CopyOutcome;
use vellum_core::time::Instant;
use vellum_core::timer::TimerKey;
use vellum_core::toast::ToastKind;
use vellum_core::trace::{
    ActivationEvent, CopyEvent, FilterEvent, RevealEvent, TimerFiredEvent, TimerScheduledEvent,
    ToastEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FILTER: u8 = 1;
const TAG_TIMER_SCHEDULED: u8 = 2;
const TAG_TIMER_FIRED: u8 = 3;
const TAG_TOAST: u8 = 4;
const TAG_COPY: u8 = 5;
const TAG_ACTIVATION: u8 = 6;
const TAG_REVEAL: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_key(&mut self, key: TimerKey) {
        let (tag, idx) = match key {
            TimerKey::Item(idx) => (0, idx),
            TimerKey::Section(idx) => (1, idx),
            TimerKey::Toast => (2, 0),
            TimerKey::Press(idx) => (3, idx),
            TimerKey::Button(idx) => (4, idx),
        };
        self.write_u8(tag);
        self.write_u32(idx);
    }

    fn write_kind(&mut self, kind: ToastKind) {
        self.write_u8(match kind {
            ToastKind::Success => 0,
            ToastKind::Error => 1,
        });
    }

    fn write_outcome(&mut self, outcome: CopyOutcome) {
        self.write_u8(match outcome {
            CopyOutcome::Primary => 0,
            CopyOutcome::Fallback => 1,
            CopyOutcome::Failed => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_filter(&mut self, e: &FilterEvent) {
        self.write_u8(TAG_FILTER);
        self.write_u64(e.at.micros());
        self.write_u32(e.items_shown);
        self.write_u32(e.items_hidden);
        self.write_u32(e.sections_shown);
        self.write_u32(e.sections_hidden);
    }

    fn on_timer_scheduled(&mut self, e: &TimerScheduledEvent) {
        self.write_u8(TAG_TIMER_SCHEDULED);
        self.write_key(e.key);
        self.write_u64(e.at.micros());
        self.write_u8(u8::from(e.superseded));
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        self.write_u8(TAG_TIMER_FIRED);
        self.write_key(e.key);
        self.write_u64(e.now.micros());
    }

    fn on_toast(&mut self, e: &ToastEvent) {
        self.write_u8(TAG_TOAST);
        self.write_kind(e.kind);
        self.write_u8(u8::from(e.replaced));
        self.write_u64(e.at.micros());
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        self.write_u8(TAG_COPY);
        self.write_u32(e.button_index);
        self.write_outcome(e.outcome);
        self.write_u64(e.at.micros());
    }

    fn on_activation(&mut self, e: &ActivationEvent) {
        self.write_u8(TAG_ACTIVATION);
        self.write_u64(e.at.micros());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "action count capped at u32::MAX for recording"
        )]
        self.write_u32(e.actions.min(u32::MAX as usize) as u32);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.write_u8(TAG_REVEAL);
        self.write_u32(e.item_index);
        self.write_u64(e.at.micros());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FilterEvent`].
    Filter(FilterEvent),
    /// A [`TimerScheduledEvent`].
    TimerScheduled(TimerScheduledEvent),
    /// A [`TimerFiredEvent`].
    TimerFired(TimerFiredEvent),
    /// A [`ToastEvent`].
    Toast(ToastEvent),
    /// A [`CopyEvent`].
    Copy(CopyEvent),
    /// An [`ActivationEvent`].
    Activation(ActivationEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_key(&mut self) -> Option<TimerKey> {
        let tag = self.read_u8()?;
        let idx = self.read_u32()?;
        Some(match tag {
            0 => TimerKey::Item(idx),
            1 => TimerKey::Section(idx),
            2 => TimerKey::Toast,
            3 => TimerKey::Press(idx),
            _ => TimerKey::Button(idx),
        })
    }

    fn read_kind(&mut self) -> Option<ToastKind> {
        Some(match self.read_u8()? {
            0 => ToastKind::Success,
            _ => ToastKind::Error,
        })
    }

    fn read_outcome(&mut self) -> Option<CopyOutcome> {
        Some(match self.read_u8()? {
            0 => CopyOutcome::Primary,
            1 => CopyOutcome::Fallback,
            _ => CopyOutcome::Failed,
        })
    }

    fn decode_filter(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Filter(FilterEvent {
            at: Instant(self.read_u64()?),
            items_shown: self.read_u32()?,
            items_hidden: self.read_u32()?,
            sections_shown: self.read_u32()?,
            sections_hidden: self.read_u32()?,
        }))
    }

    fn decode_timer_scheduled(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerScheduled(TimerScheduledEvent {
            key: self.read_key()?,
            at: Instant(self.read_u64()?),
            superseded: self.read_u8()? != 0,
        }))
    }

    fn decode_timer_fired(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerFired(TimerFiredEvent {
            key: self.read_key()?,
            now: Instant(self.read_u64()?),
        }))
    }

    fn decode_toast(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Toast(ToastEvent {
            kind: self.read_kind()?,
            replaced: self.read_u8()? != 0,
            at: Instant(self.read_u64()?),
        }))
    }

    fn decode_copy(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Copy(CopyEvent {
            button_index: self.read_u32()?,
            outcome: self.read_outcome()?,
            at: Instant(self.read_u64()?),
        }))
    }

    fn decode_activation(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Activation(ActivationEvent {
            at: Instant(self.read_u64()?),
            actions: self.read_u32()? as usize,
        }))
    }

    fn decode_reveal(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reveal(RevealEvent {
            item_index: self.read_u32()?,
            at: Instant(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FILTER => self.decode_filter(),
            TAG_TIMER_SCHEDULED => self.decode_timer_scheduled(),
            TAG_TIMER_FIRED => self.decode_timer_fired(),
            TAG_TOAST => self.decode_toast(),
            TAG_COPY => self.decode_copy(),
            TAG_ACTIVATION => self.decode_activation(),
            TAG_REVEAL => self.decode_reveal(),
            _ => None, // unknown tag → stop iteration
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
            sections_hidden: 0,
        }
    }

    #[test]
    fn round_trip_filter() {
        let mut rec = RecorderSink::new();
        let orig = sample_filter();
        rec.on_filter(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Filter(e) => {
                assert_eq!(e.at, orig.at);
                assert_eq!(e.items_shown, 3);
                assert_eq!(e.items_hidden, 2);
                assert_eq!(e.sections_shown, 1);
                assert_eq!(e.sections_hidden, 0);
            }
            other => panic!("expected Filter, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_timer_events() {
        let mut rec = RecorderSink::new();
        rec.on_timer_scheduled(&TimerScheduledEvent {
            key: TimerKey::Item(7),
            at: Instant(300_000),
            superseded: true,
        });
        rec.on_timer_fired(&TimerFiredEvent {
            key: TimerKey::Toast,
            now: Instant(310_000),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::TimerScheduled(e) => {
                assert_eq!(e.key, TimerKey::Item(7));
                assert_eq!(e.at, Instant(300_000));
                assert!(e.superseded);
            }
            other => panic!("expected TimerScheduled, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::TimerFired(e) => {
                assert_eq!(e.key, TimerKey::Toast);
                assert_eq!(e.now, Instant(310_000));
            }
            other => panic!("expected TimerFired, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_toast_and_copy() {
        let mut rec = RecorderSink::new();
        rec.on_toast(&ToastEvent {
            kind: ToastKind::Error,
            replaced: false,
            at: Instant(42),
        });
        rec.on_copy(&CopyEvent {
            button_index: 3,
            outcome: CopyOutcome::Fallback,
            at: Instant(43),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::Toast(e) => {
                assert_eq!(e.kind, ToastKind::Error);
                assert!(!e.replaced);
            }
            other => panic!("expected Toast, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::Copy(e) => {
                assert_eq!(e.button_index, 3);
                assert_eq!(e.outcome, CopyOutcome::Fallback);
            }
            other => panic!("expected Copy, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_activation_and_reveal() {
        let mut rec = RecorderSink::new();
        rec.on_activation(&ActivationEvent {
            at: Instant(100),
            actions: 2,
        });
        rec.on_reveal(&RevealEvent {
            item_index: 9,
            at: Instant(200),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            RecordedEvent::Activation(ActivationEvent { actions: 2, .. })
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::Reveal(RevealEvent { item_index: 9, .. })
        ));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_filter(&sample_filter());
        let bytes = rec.as_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 2]).collect();
        assert!(events.is_empty());
    }
}
