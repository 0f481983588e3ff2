// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: an interactive documentation page driven by `vellum_backend_web`.
//!
//! Scans the host page for the documentation markup contract and wires it to
//! a [`Engine`]: category pills (`.category-pill` with a `data-category`
//! attribute) filter tagged cards (`[data-category]` descendants of
//! `.content-section`), copy buttons (`.copy-btn` inside a `.code-card`)
//! copy the adjacent `.code-block code` text, and cards reveal on scroll and
//! press on touch. The demo owns only platform plumbing; every decision
//! about what to animate and when lives in `vellum_core`.
//!
//! Build with: `wasm-pack build --target web demos/docs_page`
//!
//! Then serve a page containing the markup above alongside the generated
//! module.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, KeyboardEvent, TouchEvent};

use vellum_backend_web::{copy_text, DomPresenter, Presenter as _, RevealObserver, Wakeup};
use vellum_core::category::{CategorySet, Selection};
use vellum_core::engine::Engine;
use vellum_core::input::{Action, Direction, InputEvent, SelectorBar, Target};
use vellum_core::page::{ButtonId, ItemId, PageStore};
use vellum_core::trace::Tracer;

/// Everything the event closures share.
struct App {
    engine: Engine,
    presenter: DomPresenter,
    /// Pill elements, in [`SelectorBar`] order.
    pills: Vec<HtmlElement>,
    /// Code text per copy button, in [`ButtonId`] order.
    snippets: Vec<String>,
}

type Shared = Rc<RefCell<App>>;

/// The wakeup source, filled in after construction.
///
/// The wakeup callback re-arms the wakeup itself, so the closures reach it
/// through this shared slot rather than capturing it directly.
type WakeupSlot = Rc<RefCell<Option<Wakeup>>>;

/// Entry point — called automatically by `wasm_bindgen(start)`.
///
/// # Errors
///
/// Returns the browser error if the expected markup cannot be queried.
///
/// # Panics
///
/// Panics if there is no window, document, or body to wire into.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");

    let mut store = PageStore::new();
    let mut presenter = DomPresenter::new(body.clone());

    // Category pills drive the selector bar; their order is the focus order.
    let mut selections = Vec::new();
    let mut pills: Vec<HtmlElement> = Vec::new();
    let pill_nodes = document.query_selector_all(".category-pill")?;
    for i in 0..pill_nodes.length() {
        let Some(node) = pill_nodes.get(i) else {
            continue;
        };
        let pill: HtmlElement = node.unchecked_into();
        let raw = pill.get_attribute("data-category").unwrap_or_default();
        selections.push(Selection::parse(&raw));
        pills.push(pill);
    }
    let selector = SelectorBar::new(selections);

    // Sections own the tagged cards nested inside them.
    let mut cards: Vec<(ItemId, HtmlElement)> = Vec::new();
    let section_nodes = document.query_selector_all(".content-section")?;
    for s in 0..section_nodes.length() {
        let Some(node) = section_nodes.get(s) else {
            continue;
        };
        let section_el: HtmlElement = node.unchecked_into();
        let section = store.add_section();
        presenter.register_section(section.index(), section_el.clone());

        let card_nodes = section_el.query_selector_all("[data-category]")?;
        for c in 0..card_nodes.length() {
            let Some(node) = card_nodes.get(c) else {
                continue;
            };
            let card: HtmlElement = node.unchecked_into();
            let raw = card.get_attribute("data-category").unwrap_or_default();
            let item = store.add_item(CategorySet::parse(&raw), Some(section));
            presenter.register_item(item.index(), card.clone());

            // Cards start offscreen-styled until their first reveal.
            let style = card.style();
            style.set_property("opacity", "0")?;
            style.set_property("transform", "translateY(30px)")?;

            cards.push((item, card));
        }
    }

    // Copy buttons, one per code card.
    let mut buttons: Vec<(ButtonId, HtmlElement)> = Vec::new();
    let mut snippets = Vec::new();
    let code_cards = document.query_selector_all(".code-card")?;
    for i in 0..code_cards.length() {
        let Some(node) = code_cards.get(i) else {
            continue;
        };
        let code_card: HtmlElement = node.unchecked_into();
        let Some(btn) = code_card.query_selector(".copy-btn")? else {
            continue;
        };
        let btn: HtmlElement = btn.unchecked_into();
        let snippet = code_card
            .query_selector(".code-block code")?
            .and_then(|code| code.text_content())
            .unwrap_or_default();

        let button = store.add_button();
        presenter.register_button(button.index(), btn.clone());
        snippets.push(snippet);
        buttons.push((button, btn));
    }

    let app: Shared = Rc::new(RefCell::new(App {
        engine: Engine::new(store, selector),
        presenter,
        pills: pills.clone(),
        snippets,
    }));
    let wakeup_slot: WakeupSlot = Rc::new(RefCell::new(None));

    // The wakeup drives every scheduled transition: advance the engine to
    // the fired deadline, then flush (which re-arms for the next one).
    {
        let app = Rc::clone(&app);
        let slot = Rc::clone(&wakeup_slot);
        let wakeup = Wakeup::new(move |now| {
            app.borrow_mut().engine.advance(now, &mut Tracer::none());
            flush(&app, &slot);
        });
        *wakeup_slot.borrow_mut() = Some(wakeup);
    }

    // Pill clicks filter the page.
    for (i, pill) in pills.iter().enumerate() {
        let app = Rc::clone(&app);
        let slot = Rc::clone(&wakeup_slot);
        let closure: Closure<dyn FnMut()> = Closure::new(move || {
            dispatch(&app, &slot, InputEvent::Activate(Target::Pill(i)));
        });
        pill.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Card taps toast; touch presses scale the card down until the release
    // linger elapses.
    for (item, card) in &cards {
        let item = *item;

        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let click: Closure<dyn FnMut()> = Closure::new(move || {
            dispatch(&app_cb, &slot_cb, InputEvent::Activate(Target::Card(item)));
        });
        card.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();

        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let press: Closure<dyn FnMut()> = Closure::new(move || {
            app_cb.borrow_mut().engine.press(item);
            flush(&app_cb, &slot_cb);
        });
        card.add_event_listener_with_callback("touchstart", press.as_ref().unchecked_ref())?;
        press.forget();

        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let release: Closure<dyn FnMut()> = Closure::new(move || {
            let now = vellum_backend_web::now();
            app_cb
                .borrow_mut()
                .engine
                .release(item, now, &mut Tracer::none());
            flush(&app_cb, &slot_cb);
        });
        card.add_event_listener_with_callback("touchend", release.as_ref().unchecked_ref())?;
        release.forget();
    }

    // Copy button clicks go through the engine so the button state machine
    // stays authoritative.
    for (button, btn) in &buttons {
        let button = *button;
        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let closure: Closure<dyn FnMut()> = Closure::new(move || {
            dispatch(&app_cb, &slot_cb, InputEvent::Activate(Target::Copy(button)));
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard: arrows step to the adjacent pill and activate it (the
    // engine returns the focus target), Enter/Space activates the target
    // pill or card.
    {
        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let card_ids: Vec<(ItemId, HtmlElement)> = cards.clone();
        let closure: Closure<dyn FnMut(KeyboardEvent)> = Closure::new(move |event: KeyboardEvent| {
            let Some(target) = event.target() else {
                return;
            };
            let Ok(el) = target.dyn_into::<HtmlElement>() else {
                return;
            };
            let key = event.key();
            if el.class_list().contains("category-pill") {
                match key.as_str() {
                    "ArrowLeft" => {
                        event.prevent_default();
                        dispatch(&app_cb, &slot_cb, InputEvent::FocusMove(Direction::Left));
                    }
                    "ArrowRight" => {
                        event.prevent_default();
                        dispatch(&app_cb, &slot_cb, InputEvent::FocusMove(Direction::Right));
                    }
                    "Enter" | " " => {
                        event.prevent_default();
                        let index = app_cb.borrow().pills.iter().position(|p| *p == el);
                        if let Some(i) = index {
                            dispatch(&app_cb, &slot_cb, InputEvent::Activate(Target::Pill(i)));
                        }
                    }
                    _ => {}
                }
            } else if key == "Enter" || key == " " {
                let card = card_ids.iter().find(|(_, c)| *c == el).map(|(id, _)| *id);
                if let Some(item) = card {
                    event.prevent_default();
                    dispatch(&app_cb, &slot_cb, InputEvent::Activate(Target::Card(item)));
                }
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pull-to-refresh: track touches at document level, translating the
    // body by the damped pull distance while the pull is live.
    {
        let app_cb = Rc::clone(&app);
        let start: Closure<dyn FnMut(TouchEvent)> = Closure::new(move |event: TouchEvent| {
            if let Some(touch) = event.touches().get(0) {
                app_cb.borrow_mut().engine.pull_begin(f64::from(touch.client_y()));
            }
        });
        document.add_event_listener_with_callback("touchstart", start.as_ref().unchecked_ref())?;
        start.forget();

        let app_cb = Rc::clone(&app);
        let window_cb = window.clone();
        let body_cb = body.clone();
        let moved: Closure<dyn FnMut(TouchEvent)> = Closure::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            let at_top = window_cb.scroll_y().unwrap_or(0.0) <= 0.0;
            let offset = app_cb
                .borrow_mut()
                .engine
                .pull_update(f64::from(touch.client_y()), at_top);
            if let Some(px) = offset {
                let _ = body_cb.style().set_property("transform", &format!("translateY({px}px)"));
            }
        });
        document.add_event_listener_with_callback("touchmove", moved.as_ref().unchecked_ref())?;
        moved.forget();

        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let body_cb = body.clone();
        let end: Closure<dyn FnMut()> = Closure::new(move || {
            let _ = body_cb.style().set_property("transform", "translateY(0px)");
            let now = vellum_backend_web::now();
            let _triggered = app_cb.borrow_mut().engine.pull_finish(now, &mut Tracer::none());
            flush(&app_cb, &slot_cb);
        });
        document.add_event_listener_with_callback("touchend", end.as_ref().unchecked_ref())?;
        end.forget();
    }

    // Scroll reveal: each card animates in the first time it intersects the
    // viewport.
    {
        let app_cb = Rc::clone(&app);
        let slot_cb = Rc::clone(&wakeup_slot);
        let ids: Vec<ItemId> = cards.iter().map(|(id, _)| *id).collect();
        let observer = RevealObserver::new(move |idx| {
            if let Some(&item) = ids.get(idx as usize) {
                let now = vellum_backend_web::now();
                app_cb.borrow_mut().engine.reveal(item, now, &mut Tracer::none());
                flush(&app_cb, &slot_cb);
            }
        })?;
        for (item, card) in &cards {
            observer.observe(card, item.index());
        }
        // Keep the observer alive — there is no graceful shutdown on the web.
        core::mem::forget(observer);
    }

    sync_pills(&app.borrow());
    Ok(())
}

/// Routes an input event through the engine, performs the returned actions,
/// and flushes the resulting changes to the DOM.
fn dispatch(app: &Shared, wakeup: &WakeupSlot, event: InputEvent) {
    let now = vellum_backend_web::now();
    let actions = app
        .borrow_mut()
        .engine
        .handle_event(&event, now, &mut Tracer::none());
    for action in actions {
        match action {
            Action::FocusPill(index) => {
                if let Some(pill) = app.borrow().pills.get(index) {
                    let _ = pill.focus();
                }
            }
            Action::RequestCopy(button) => start_copy(app, wakeup, button),
            Action::Vibrate(millis) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.navigator().vibrate_with_duration(millis);
                }
            }
        }
    }
    sync_pills(&app.borrow());
    flush(app, wakeup);
}

/// Kicks off the async clipboard write for `button`'s snippet; the engine
/// learns the outcome (and drives the button label and toast) when the
/// browser resolves it.
fn start_copy(app: &Shared, wakeup: &WakeupSlot, button: ButtonId) {
    let text = app
        .borrow()
        .snippets
        .get(button.index() as usize)
        .cloned()
        .unwrap_or_default();
    let app_cb = Rc::clone(app);
    let wakeup_cb = Rc::clone(wakeup);
    copy_text(text, move |outcome| {
        let now = vellum_backend_web::now();
        app_cb
            .borrow_mut()
            .engine
            .copy_finished(button, outcome, now, &mut Tracer::none());
        flush(&app_cb, &wakeup_cb);
    });
}

/// Mirrors the selector bar's active index onto the pills' `active` class.
fn sync_pills(app: &App) {
    let active = app.engine.selector().active();
    for (i, pill) in app.pills.iter().enumerate() {
        let list = pill.class_list();
        if i == active {
            let _ = list.add_1("active");
        } else {
            let _ = list.remove_1("active");
        }
    }
}

/// Drains the engine's pending changes into the DOM and re-arms the wakeup
/// for the earliest remaining deadline (or disarms it if none is pending).
fn flush(app: &Shared, wakeup: &WakeupSlot) {
    let mut app = app.borrow_mut();
    let App {
        engine, presenter, ..
    } = &mut *app;
    let changes = engine.evaluate();
    presenter.apply(engine.store(), &changes);
    if let Some(wakeup) = wakeup.borrow().as_ref() {
        match engine.next_deadline() {
            Some(deadline) => wakeup.arm(deadline),
            None => wakeup.disarm(),
        }
    }
}
