// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Vellum splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Time** — A `now() -> Instant` free function that reads the platform's
//!   monotonic clock. All engine entry points take `now` explicitly, so the
//!   core never reads a clock itself.
//!
//! - **Wakeup source** — Arms a one-shot platform timer (e.g. `setTimeout`)
//!   for [`Engine::next_deadline`] and calls [`Engine::advance`] when it
//!   fires. This is backend-specific and not abstracted by a trait because
//!   the setup and lifecycle differ fundamentally across platforms.
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply evaluated
//!   changes to a platform-native tree (e.g. DOM elements).
//!
//! - **Clipboard** — Performs the asynchronous copy requested by
//!   [`Action::RequestCopy`](crate::input::Action::RequestCopy) and reports
//!   a [`CopyOutcome`] back via [`Engine::copy_finished`].
//!
//! - **Input translation** — Maps raw platform input (clicks, key presses,
//!   touches) into [`InputEvent`](crate::input::InputEvent)s.
//!
//! # Crate boundaries
//!
//! `vellum_core` owns the data model, the transition machinery, evaluation,
//! and this contract module. Backend crates depend on `vellum_core` and
//! provide platform glue. Application code depends on both and wires them
//! together in a wakeup loop.
//!
//! # Wakeup loop pseudocode
//!
//! ```rust,ignore
//! fn on_wakeup() {
//!     // Step: fire due timers, advancing transition phases
//!     engine.advance(now(), &mut tracer);
//!
//!     // Evaluate: drain dirty channels into a change set
//!     let changes = engine.evaluate();
//!
//!     // Present: apply incremental changes to the native tree
//!     presenter.apply(engine.store(), &changes);
//!
//!     // Re-arm: schedule the next platform timer, if anything is pending
//!     if let Some(deadline) = engine.next_deadline() {
//!         wakeup.arm(deadline);
//!     }
//! }
//! ```
//!
//! [`Engine::advance`]: crate::engine::Engine::advance
//! [`Engine::copy_finished`]: crate::engine::Engine::copy_finished
//! [`Engine::next_deadline`]: crate::engine::Engine::next_deadline

use crate::page::{Changes, PageStore};

/// How a clipboard copy request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyOutcome {
    /// The primary asynchronous clipboard API succeeded.
    Primary,
    /// The primary API was unavailable and the fallback path succeeded.
    Fallback,
    /// Both paths failed.
    Failed,
}

impl CopyOutcome {
    /// Whether the text reached the clipboard by either path.
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Applies evaluated changes to a platform-native presentation tree.
///
/// Both DOM-based presenters and test doubles implement this trait, enabling
/// generic wakeup loops. `apply` receives the store so it can read current
/// phases for the indices listed in `changes`; it must not retain references
/// past the call.
pub trait Presenter {
    /// Applies the given [`Changes`] to the backing presentation tree,
    /// reading current state from `store` as needed.
    fn apply(&mut self, store: &PageStore, changes: &Changes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_is_the_only_failure() {
        assert!(CopyOutcome::Primary.is_success());
        assert!(CopyOutcome::Fallback.is_success());
        assert!(!CopyOutcome::Failed.is_success());
    }
}
