// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard writing with a legacy fallback.
//!
//! The async Clipboard API requires a secure context and can still reject
//! (permissions, focus loss). When it is unavailable or fails, a hidden
//! textarea plus `document.execCommand("copy")` is tried before giving up.

use alloc::string::String;

use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlTextAreaElement};

use vellum_core::backend::CopyOutcome;

/// Copies `text` to the clipboard, calling `on_done` with the outcome.
///
/// The primary path resolves asynchronously, so `on_done` may run after this
/// function returns. Pass the outcome to
/// [`Engine::copy_finished`](vellum_core::engine::Engine::copy_finished)
/// with a fresh timestamp.
pub fn copy_text(text: String, on_done: impl FnOnce(CopyOutcome) + 'static) {
    let Some(window) = web_sys::window() else {
        on_done(CopyOutcome::Failed);
        return;
    };
    let Some(document) = window.document() else {
        on_done(CopyOutcome::Failed);
        return;
    };

    if window.is_secure_context() {
        let promise = window.navigator().clipboard().write_text(&text);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => on_done(CopyOutcome::Primary),
                Err(err) => {
                    web_sys::console::error_1(&err);
                    on_done(copy_via_textarea(&document, &text));
                }
            }
        });
    } else {
        on_done(copy_via_textarea(&document, &text));
    }
}

/// Selects `text` inside an offscreen textarea and issues the legacy copy
/// command.
fn copy_via_textarea(document: &Document, text: &str) -> CopyOutcome {
    let Ok(el) = document.create_element("textarea") else {
        return CopyOutcome::Failed;
    };
    let textarea: HtmlTextAreaElement = el.unchecked_into();
    textarea.set_value(text);

    // Keep the element out of view without display:none, which would make
    // the selection inoperative.
    let s = textarea.style();
    let _ = s.set_property("position", "fixed");
    let _ = s.set_property("top", "-1000px");
    let _ = s.set_property("opacity", "0");

    let Some(body) = document.body() else {
        return CopyOutcome::Failed;
    };
    let _ = body.append_child(&textarea);
    textarea.select();
    let copied = document.exec_command("copy").unwrap_or(false);
    textarea.remove();

    if copied {
        CopyOutcome::Fallback
    } else {
        CopyOutcome::Failed
    }
}
