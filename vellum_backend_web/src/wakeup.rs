// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` wakeup source.
//!
//! [`Wakeup`] arms a single pending browser timeout for the engine's next
//! deadline. Arming replaces any pending timeout, matching the engine's
//! cancel-and-replace timer semantics: the wakeup always targets the current
//! earliest deadline and never fires for a stale one.
//!
//! The typical loop arms the wakeup after every engine interaction:
//!
//! ```rust,ignore
//! let wakeup = Wakeup::new(move |now| {
//!     engine.advance(now, &mut Tracer::none());
//!     presenter.apply(engine.store(), &engine.evaluate());
//!     if let Some(deadline) = engine.next_deadline() {
//!         // re-arm from inside the callback
//!     }
//! });
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use vellum_core::time::Instant;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every call.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

type WakeupClosure = Closure<dyn FnMut()>;

/// A one-shot browser timeout that calls back with the current [`Instant`].
///
/// At most one timeout is pending at a time; [`arm`](Self::arm) replaces any
/// pending one. The callback is expected to re-arm if the engine still has
/// pending deadlines.
pub struct Wakeup {
    inner: Rc<WakeupInner>,
}

struct WakeupInner {
    /// The JS closure registered with `setTimeout`.
    ///
    /// Stored in its own `RefCell` so it can be set once after construction
    /// without conflicting with `callback`.
    closure: RefCell<Option<WakeupClosure>>,

    /// The user-supplied callback invoked when the timeout fires.
    callback: RefCell<Box<dyn FnMut(Instant)>>,

    /// Whether a timeout is currently pending.
    armed: Cell<bool>,

    /// The ID returned by the most recent `setTimeout` call, used by
    /// [`clear_timeout`] when disarming.
    timeout_id: Cell<i32>,
}

impl Wakeup {
    /// Creates a wakeup source that is **not yet armed**.
    ///
    /// `callback` receives the current time whenever an armed timeout fires.
    pub fn new(callback: impl FnMut(Instant) + 'static) -> Self {
        let inner = Rc::new(WakeupInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            armed: Cell::new(false),
            timeout_id: Cell::new(0),
        });

        let weak = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move || {
            weak.armed.set(false);
            let now = crate::now();
            // The borrow is scoped so a re-arming callback doesn't overlap
            // with the `closure` RefCell.
            weak.callback.borrow_mut()(now);
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms the wakeup for `deadline`, replacing any pending timeout.
    ///
    /// A deadline at or before the current time fires on the next timer
    /// turn (zero-millisecond timeout).
    pub fn arm(&self, deadline: Instant) {
        self.disarm();

        let delay_ms = deadline.saturating_since(crate::now()).micros().div_ceil(1_000);
        let millis = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref().unchecked_ref(), millis);
            self.inner.timeout_id.set(id);
            self.inner.armed.set(true);
        }
    }

    /// Cancels the pending timeout, if any.
    pub fn disarm(&self) {
        if self.inner.armed.get() {
            self.inner.armed.set(false);
            clear_timeout(self.inner.timeout_id.get());
        }
    }

    /// Returns `true` if a timeout is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.armed.get()
    }
}

impl Drop for Wakeup {
    fn drop(&mut self) {
        self.disarm();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Wakeup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wakeup")
            .field("armed", &self.inner.armed.get())
            .finish()
    }
}
