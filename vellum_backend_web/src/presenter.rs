// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`PageStore`] state into CSS mutations on registered elements
//! by applying incremental updates from [`Changes`]. Elements come from the
//! existing page markup; the presenter never creates them, with the single
//! exception of the toast element, which has no markup counterpart.
//!
//! [`PageStore`]: vellum_core::page::PageStore
//! [`Changes`]: vellum_core::page::Changes

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use vellum_core::backend::Presenter;
use vellum_core::engine::{ITEM_ENTER, ITEM_LEAVE, SECTION_ENTER, TOAST_FADE};
use vellum_core::page::{ButtonState, Changes, PageStore, Phase};
use vellum_core::time::Delay;
use vellum_core::toast::{ToastKind, ToastOp};
use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

/// Reveal transition length. Purely presentational; the engine schedules no
/// timer for it.
const REVEAL_TRANSITION: Delay = Delay::from_millis(600);

/// Vertical offset applied to entrances before they kick, in pixels.
const ENTER_OFFSET_PX: i32 = 20;

/// Maps registered page elements to engine state, applying incremental
/// updates from [`Changes`].
///
/// Item, section, and button elements are registered by slot index while
/// wiring the page; indices must match the handles returned by the store's
/// wiring calls. Call [`apply`](Presenter::apply) after each evaluation.
pub struct DomPresenter {
    toast_host: HtmlElement,
    items: Vec<Option<HtmlElement>>,
    sections: Vec<Option<HtmlElement>>,
    buttons: Vec<Option<HtmlElement>>,
    toast: Option<HtmlElement>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("items_len", &self.items.len())
            .field("sections_len", &self.sections.len())
            .field("buttons_len", &self.buttons.len())
            .field("has_toast", &self.toast.is_some())
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter. Toast elements are appended to `toast_host`
    /// (typically `document.body`).
    #[must_use]
    pub fn new(toast_host: HtmlElement) -> Self {
        Self {
            toast_host,
            items: Vec::new(),
            sections: Vec::new(),
            buttons: Vec::new(),
            toast: None,
        }
    }

    /// Registers the element backing the item at slot `idx`.
    pub fn register_item(&mut self, idx: u32, el: HtmlElement) {
        put(&mut self.items, idx, el);
    }

    /// Registers the element backing the section at slot `idx`.
    pub fn register_section(&mut self, idx: u32, el: HtmlElement) {
        put(&mut self.sections, idx, el);
    }

    /// Registers the element backing the copy button at slot `idx`.
    pub fn register_button(&mut self, idx: u32, el: HtmlElement) {
        put(&mut self.buttons, idx, el);
    }

    /// Returns the registered item element for `idx`, if any.
    #[must_use]
    pub fn item_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.items.get(idx as usize).and_then(|slot| slot.as_ref())
    }

    fn create_toast(&mut self, message: &str, kind: ToastKind) {
        let doc = self.toast_host.owner_document().expect("no owner document");
        let el: HtmlElement = doc
            .create_element("div")
            .expect("create_element failed")
            .unchecked_into();
        el.set_text_content(Some(message));

        let s = el.style();
        let _ = s.set_property("position", "fixed");
        let _ = s.set_property("bottom", "20px");
        let _ = s.set_property("left", "50%");
        let _ = s.set_property("padding", "12px 24px");
        let _ = s.set_property("color", "#fff");
        let _ = s.set_property("border-radius", "8px");
        let _ = s.set_property("z-index", "1000");
        let _ = s.set_property("background", toast_background(kind));
        let _ = s.set_property("transition", &transition_value(TOAST_FADE, "ease-out"));
        // Pre-paint style: offscreen below, transparent.
        let _ = s.set_property("opacity", "0");
        let _ = s.set_property("transform", "translateX(-50%) translateY(100px)");

        let _ = self.toast_host.append_child(&el);
        if let Some(old) = self.toast.replace(el) {
            // A Removed op for the old element is always drained first, but
            // guard against a host that dropped it.
            old.remove();
        }
    }

    fn apply_toast_op(&mut self, op: &ToastOp) {
        match op {
            ToastOp::Created { message, kind } => self.create_toast(message, *kind),
            ToastOp::Kicked => {
                if let Some(el) = &self.toast {
                    let s = el.style();
                    let _ = s.set_property("opacity", "1");
                    let _ = s.set_property("transform", "translateX(-50%) translateY(0)");
                }
            }
            ToastOp::Dismissing => {
                if let Some(el) = &self.toast {
                    let s = el.style();
                    let _ = s.set_property("opacity", "0");
                    let _ = s.set_property("transform", "translateX(-50%) translateY(100px)");
                }
            }
            ToastOp::Removed => {
                if let Some(el) = self.toast.take() {
                    el.remove();
                }
            }
        }
    }
}

impl Presenter for DomPresenter {
    /// Applies incremental changes from an evaluation to the DOM.
    fn apply(&mut self, store: &PageStore, changes: &Changes) {
        // 1. Item phase transitions
        for &idx in &changes.items {
            if let Some(el) = self.item_element(idx) {
                apply_item_phase(el, store.item_phase_at(idx));
            }
        }

        // 2. Section phase transitions
        for &idx in &changes.sections {
            if let Some(el) = self.sections.get(idx as usize).and_then(Option::as_ref) {
                apply_section_phase(el, store.section_phase_at(idx));
            }
        }

        // 3. Scroll reveals
        for &idx in &changes.reveals {
            if let Some(el) = self.item_element(idx) {
                let s = el.style();
                let _ = s.set_property(
                    "transition",
                    &transition_value(REVEAL_TRANSITION, "ease-out"),
                );
                let _ = s.set_property("opacity", "1");
                let _ = s.set_property("transform", &translate_y(0));
            }
        }

        // 4. Press feedback
        for &idx in &changes.presses {
            if let Some(el) = self.item_element(idx) {
                let value = if store.pressed_at(idx) {
                    "scale(0.98)"
                } else {
                    "scale(1)"
                };
                let _ = el.style().set_property("transform", value);
            }
        }

        // 5. Copy button feedback
        for &idx in &changes.buttons {
            if let Some(el) = self.buttons.get(idx as usize).and_then(Option::as_ref) {
                el.set_text_content(Some(button_label(store.button_state_at(idx))));
            }
        }

        // 6. Toast lifecycle, in op order
        for op in &changes.toasts {
            self.apply_toast_op(op);
        }
    }
}

fn put(slots: &mut Vec<Option<HtmlElement>>, idx: u32, el: HtmlElement) {
    let slot = idx as usize;
    if slots.len() <= slot {
        slots.resize_with(slot + 1, || None);
    }
    slots[slot] = Some(el);
}

fn apply_item_phase(el: &HtmlElement, phase: Phase) {
    let s = el.style();
    match phase {
        Phase::Staged => {
            // Pre-paint: in flow but invisible, no transition so the jump
            // to the offset position doesn't animate.
            let _ = s.remove_property("display");
            let _ = s.set_property("transition", "none");
            let _ = s.set_property("opacity", "0");
            let _ = s.set_property("transform", &translate_y(ENTER_OFFSET_PX));
        }
        Phase::Entering | Phase::Visible => {
            let _ = s.set_property("transition", &transition_value(ITEM_ENTER, "ease-out"));
            let _ = s.set_property("opacity", "1");
            let _ = s.set_property("transform", &translate_y(0));
        }
        Phase::Leaving => {
            let _ = s.set_property("transition", &transition_value(ITEM_LEAVE, "ease-in"));
            let _ = s.set_property("opacity", "0");
            let _ = s.set_property("transform", &translate_y(-ENTER_OFFSET_PX));
        }
        Phase::Hidden => {
            let _ = s.set_property("display", "none");
        }
    }
}

fn apply_section_phase(el: &HtmlElement, phase: Phase) {
    let s = el.style();
    match phase {
        Phase::Staged => {
            let _ = s.remove_property("display");
            let _ = s.set_property("transition", "none");
            let _ = s.set_property("opacity", "0");
            let _ = s.set_property("transform", &translate_y(ENTER_OFFSET_PX));
        }
        Phase::Entering | Phase::Visible => {
            let _ = s.set_property("transition", &transition_value(SECTION_ENTER, "ease-out"));
            let _ = s.set_property("opacity", "1");
            let _ = s.set_property("transform", &translate_y(0));
        }
        Phase::Leaving => {
            // Sections fade under whatever transition is already in place.
            let _ = s.set_property("opacity", "0");
            let _ = s.set_property("transform", &translate_y(-ENTER_OFFSET_PX));
        }
        Phase::Hidden => {
            let _ = s.set_property("display", "none");
        }
    }
}

/// Formats a CSS `transition` shorthand for all properties.
fn transition_value(duration: Delay, easing: &str) -> String {
    format!("all {}ms {easing}", duration.as_millis())
}

/// Formats a CSS `translateY` transform.
fn translate_y(px: i32) -> String {
    format!("translateY({px}px)")
}

fn toast_background(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "#10b981",
        ToastKind::Error => "#ef4444",
    }
}

fn button_label(state: ButtonState) -> &'static str {
    match state {
        ButtonState::Idle => "Copy",
        ButtonState::Success => "Copied!",
        ButtonState::Error => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_value_formats_millis() {
        assert_eq!(transition_value(ITEM_ENTER, "ease-out"), "all 300ms ease-out");
        assert_eq!(transition_value(ITEM_LEAVE, "ease-in"), "all 200ms ease-in");
    }

    #[test]
    fn translate_y_formats_sign() {
        assert_eq!(translate_y(20), "translateY(20px)");
        assert_eq!(translate_y(-20), "translateY(-20px)");
        assert_eq!(translate_y(0), "translateY(0px)");
    }

    #[test]
    fn button_labels() {
        assert_eq!(button_label(ButtonState::Idle), "Copy");
        assert_eq!(button_label(ButtonState::Success), "Copied!");
        assert_eq!(button_label(ButtonState::Error), "Error");
    }
}
