// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-reveal observation.
//!
//! [`RevealObserver`] wraps an `IntersectionObserver` configured for the
//! reveal heuristic: an element counts as revealed once a tenth of it enters
//! the viewport, with the bottom edge pulled in by 50 pixels so elements
//! reveal slightly before they would naturally scroll into view. Each
//! element is unobserved after its first intersection, making reveals
//! one-shot on the platform side as well.

use alloc::boxed::Box;
use alloc::format;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Attribute carrying the item slot index on observed elements.
const INDEX_ATTR: &str = "data-vellum-idx";

/// Visible fraction at which an element counts as revealed.
const REVEAL_THRESHOLD: f64 = 0.1;

/// Root margin pulling the bottom edge in by 50px.
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches item elements and reports the slot index of each first
/// intersection.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _closure: ObserverClosure,
}

impl core::fmt::Debug for RevealObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealObserver").finish_non_exhaustive()
    }
}

impl RevealObserver {
    /// Creates an observer that calls `on_reveal` with an item's slot index
    /// the first time it intersects the viewport.
    ///
    /// # Errors
    ///
    /// Returns the browser error if `IntersectionObserver` construction is
    /// rejected.
    pub fn new(mut on_reveal: impl FnMut(u32) + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(idx) = target
                        .get_attribute(INDEX_ATTR)
                        .and_then(|v| v.parse().ok())
                    {
                        on_reveal(idx);
                    }
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    /// Starts watching `element` as the item at slot `idx`.
    pub fn observe(&self, element: &Element, idx: u32) {
        let _ = element.set_attribute(INDEX_ATTR, &format!("{idx}"));
        self.observer.observe(element);
    }

    /// Stops watching everything.
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}
