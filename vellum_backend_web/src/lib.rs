// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vellum.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`Wakeup`]: one-shot `setTimeout` wakeup source for engine deadlines
//! - [`DomPresenter`]: applies engine changes to DOM elements
//! - [`copy_text`]: async clipboard writer with a textarea fallback
//! - [`RevealObserver`]: `IntersectionObserver` wrapper for scroll reveals

#![no_std]

extern crate alloc;

mod clipboard;
mod observer;
mod presenter;
mod wakeup;

pub use clipboard::copy_text;
pub use observer::RevealObserver;
pub use presenter::DomPresenter;
pub use vellum_core::backend::{CopyOutcome, Presenter};
pub use wakeup::Wakeup;

use vellum_core::time::Instant;

/// Returns the current time from `performance.now()`.
///
/// The returned [`Instant`] is in microsecond ticks from the page's time
/// origin.
#[must_use]
pub fn now() -> Instant {
    let ms = wakeup::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    Instant(us)
}
