// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change batching.
//!
//! Evaluation follows a drain pattern: every dirty channel is drained into
//! one [`Changes`] batch, which the presenter consumes by reading current
//! state from the store via the `*_at()` accessors (e.g.
//! [`item_phase_at`](super::PageStore::item_phase_at)). [`Changes`] carries
//! raw slot indices (`u32`) rather than handles so the presenter can index
//! its element slots directly.
//!
//! Toast lifecycle changes are not index-shaped; the engine appends them to
//! [`Changes::toasts`] as an ordered op log (see
//! [`Engine::evaluate_into`](crate::engine::Engine::evaluate_into)).

use alloc::vec::Vec;

use crate::dirty;
use crate::toast::ToastOp;

use super::store::PageStore;

/// The set of changes produced by a single evaluation call.
#[derive(Clone, Debug, Default)]
pub struct Changes {
    /// Items whose visibility phase changed.
    pub items: Vec<u32>,
    /// Sections whose visibility phase changed.
    pub sections: Vec<u32>,
    /// Items newly revealed by scrolling.
    pub reveals: Vec<u32>,
    /// Items whose press feedback changed.
    pub presses: Vec<u32>,
    /// Copy buttons whose feedback state changed.
    pub buttons: Vec<u32>,
    /// Ordered toast lifecycle operations.
    pub toasts: Vec<ToastOp>,
}

impl Changes {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.items.clear();
        self.sections.clear();
        self.reveals.clear();
        self.presses.clear();
        self.buttons.clear();
        self.toasts.clear();
    }

    /// Returns `true` if no changes are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.sections.is_empty()
            && self.reveals.is_empty()
            && self.presses.is_empty()
            && self.buttons.is_empty()
            && self.toasts.is_empty()
    }
}

impl PageStore {
    /// Evaluates the page model, draining all dirty channels into a fresh
    /// [`Changes`] batch.
    pub fn evaluate(&mut self) -> Changes {
        let mut changes = Changes::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut Changes) {
        changes.clear();

        changes.items = self.dirty.drain(dirty::ITEM).deterministic().run().collect();
        changes.sections = self
            .dirty
            .drain(dirty::SECTION)
            .deterministic()
            .run()
            .collect();
        changes.reveals = self
            .dirty
            .drain(dirty::REVEAL)
            .deterministic()
            .run()
            .collect();
        changes.presses = self
            .dirty
            .drain(dirty::PRESS)
            .deterministic()
            .run()
            .collect();
        changes.buttons = self
            .dirty
            .drain(dirty::BUTTON)
            .deterministic()
            .run()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategorySet;
    use crate::page::phase::{ButtonState, Phase};

    #[test]
    fn evaluate_drains_each_channel_once() {
        let mut store = PageStore::new();
        let sec = store.add_section();
        let item = store.add_item(CategorySet::parse("frontend"), Some(sec));
        let button = store.add_button();

        store.set_item_phase(item.index(), Phase::Leaving);
        store.set_section_phase(sec.index(), Phase::Leaving);
        store.set_pressed(item.index(), true);
        store.set_button_state(button.index(), ButtonState::Success);

        let changes = store.evaluate();
        assert_eq!(changes.items, [item.index()]);
        assert_eq!(changes.sections, [sec.index()]);
        assert_eq!(changes.presses, [item.index()]);
        assert_eq!(changes.buttons, [button.index()]);

        // A second evaluation sees nothing.
        assert!(store.evaluate().is_empty());
    }

    #[test]
    fn repeated_marks_coalesce() {
        let mut store = PageStore::new();
        let item = store.add_item(CategorySet::parse("frontend"), None);

        store.set_item_phase(item.index(), Phase::Leaving);
        store.set_item_phase(item.index(), Phase::Staged);
        store.set_item_phase(item.index(), Phase::Entering);

        let changes = store.evaluate();
        assert_eq!(changes.items, [item.index()], "one entry per item");
        assert_eq!(store.item_phase(item), Phase::Entering);
    }
}
