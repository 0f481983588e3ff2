// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).
//! Timestamps are printed in milliseconds.

use std::io::Write;

use vellum_core::time::Instant;
use vellum_core::trace::{
    ActivationEvent, CopyEvent, FilterEvent, RevealEvent, TimerFiredEvent, TimerScheduledEvent,
    ToastEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "timestamps are small enough for display precision"
    )]
    fn ms(at: Instant) -> f64 {
        at.micros() as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_filter(&mut self, e: &FilterEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] filter       items +{} -{}  sections +{} -{}",
            Self::ms(e.at),
            e.items_shown,
            e.items_hidden,
            e.sections_shown,
            e.sections_hidden,
        );
    }

    fn on_timer_scheduled(&mut self, e: &TimerScheduledEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] scheduled    {:?}{}",
            Self::ms(e.at),
            e.key,
            if e.superseded { "  (superseded earlier)" } else { "" },
        );
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] fired        {:?}",
            Self::ms(e.now),
            e.key,
        );
    }

    fn on_toast(&mut self, e: &ToastEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] toast        {:?}{}",
            Self::ms(e.at),
            e.kind,
            if e.replaced { "  (replaced)" } else { "" },
        );
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] copy         button {}  {:?}",
            Self::ms(e.at),
            e.button_index,
            e.outcome,
        );
    }

    fn on_activation(&mut self, e: &ActivationEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] input        {} action(s)",
            Self::ms(e.at),
            e.actions,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[{:10.3}ms] reveal       item {}",
            Self::ms(e.at),
            e.item_index,
        );
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::timer::TimerKey;
    use vellum_core::toast::ToastKind;

    use super::*;

    #[test]
    fn lines_contain_event_fields() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_filter(&FilterEvent {
            at: Instant(1_500),
            items_shown: 2,
            items_hidden: 1,
            sections_shown: 0,
            sections_hidden: 0,
        });
        sink.on_timer_fired(&TimerFiredEvent {
            key: TimerKey::Item(4),
            now: Instant(2_000),
        });
        sink.on_toast(&ToastEvent {
            kind: ToastKind::Success,
            replaced: true,
            at: Instant(3_000),
        });

        let out = String::from_utf8(sink.writer).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("filter"));
        assert!(lines[0].contains("items +2 -1"));
        assert!(lines[1].contains("Item(4)"));
        assert!(lines[2].contains("(replaced)"));
    }
}
