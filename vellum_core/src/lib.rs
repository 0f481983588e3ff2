// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machines for documentation-page interactivity.
//!
//! `vellum_core` provides the platform-independent model behind an
//! interactive documentation page: category-based content filtering with
//! animated show/hide transitions, a single-instance toast notification,
//! scroll-reveal flags, touch press feedback, pull-to-refresh tracking, and
//! modality-independent input dispatch. It is `no_std` compatible (with
//! `alloc`) and owns no platform APIs; a backend crate supplies time, a
//! wakeup timer, a presenter, and a clipboard writer.
//!
//! # Architecture
//!
//! The crate is organized around an engine loop that turns input events and
//! timer wakeups into incremental presentation updates:
//!
//! ```text
//!   Backend (input events, timer wakeups)
//!       │
//!       ▼
//!   Engine::handle_event() / Engine::advance() ──► phase mutations
//!                                                      │
//!                 ┌────────────────────────────────────┘
//!                 ▼
//!   Engine::evaluate() ──► Changes ──► Presenter::apply()
//!                 │
//!                 ▼
//!   Engine::next_deadline() ──► Backend re-arms its wakeup timer
//! ```
//!
//! **[`page`]** — Struct-of-arrays page model: content items with category
//! sets, sections with derived visibility, and copy-button states. Phase
//! mutations automatically mark dirty channels; evaluation drains them into
//! [`Changes`](page::Changes).
//!
//! **[`category`]** — Category-token parsing and selection matching.
//!
//! **[`timer`]** — Keyed timer queue with cancel-and-replace scheduling.
//! At most one pending transition exists per entity, so a rapid repeated
//! selection change cannot race two timers on the same item; the later
//! request always wins.
//!
//! **[`engine`]** — Ties the model together: filter application, transition
//! settling, toast lifecycle, input dispatch.
//!
//! **[`toast`]** — Single-instance auto-dismissing notification state.
//!
//! **[`input`]** — Modality-independent `{activate, focus-move}` events and
//! the category-selector bar.
//!
//! **[`touch`]** — Pull-to-refresh distance tracking.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that
//! platform backends implement to apply changes to native trees.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! engine instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod category;
pub mod dirty;
pub mod engine;
pub mod input;
pub mod page;
pub mod time;
pub mod timer;
pub mod toast;
pub mod touch;
pub mod trace;
