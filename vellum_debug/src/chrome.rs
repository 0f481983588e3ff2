// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are already microseconds, the format's native unit.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Filter(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Filter",
                    "cat": "Engine",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "items_shown": e.items_shown,
                        "items_hidden": e.items_hidden,
                        "sections_shown": e.sections_shown,
                        "sections_hidden": e.sections_hidden,
                    }
                }));
            }
            RecordedEvent::TimerScheduled(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TimerScheduled",
                    "cat": "Timers",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "key": format!("{:?}", e.key),
                        "superseded": e.superseded,
                    }
                }));
            }
            RecordedEvent::TimerFired(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TimerFired",
                    "cat": "Timers",
                    "ts": e.now.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "key": format!("{:?}", e.key),
                    }
                }));
            }
            RecordedEvent::Toast(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Toast",
                    "cat": "Engine",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "kind": format!("{:?}", e.kind),
                        "replaced": e.replaced,
                    }
                }));
            }
            RecordedEvent::Copy(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Copy",
                    "cat": "Engine",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "button": e.button_index,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::Activation(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Activation",
                    "cat": "Input",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "actions": e.actions,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Input",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "item": e.item_index,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use vellum_core::backend::CopyOutcome;
    use vellum_core::time::Instant;
    use vellum_core::trace::{CopyEvent, FilterEvent, TraceSink};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_filter(&FilterEvent {
            at: Instant(1_000_000),
            items_shown: 1,
            items_hidden: 2,
            sections_shown: 0,
            sections_hidden: 1,
        });
        rec.on_copy(&CopyEvent {
            button_index: 0,
            outcome: CopyOutcome::Primary,
            at: Instant(2_000_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 2);

        assert_eq!(parsed[0]["name"], "Filter");
        assert_eq!(parsed[0]["args"]["items_hidden"], 2);
        assert_eq!(parsed[1]["name"], "Copy");
        assert_eq!(parsed[1]["args"]["outcome"], "Primary");
        assert_eq!(parsed[1]["ts"], 2_000_000);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
