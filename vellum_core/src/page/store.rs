// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays page storage.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::category::CategorySet;
use crate::dirty;

use super::id::{ButtonId, INVALID, ItemId, SectionId};
use super::phase::{ButtonState, Phase};

/// Struct-of-arrays storage for all page entities.
///
/// Items, sections, and copy buttons are addressed by index handles.
/// Entities are created while wiring the static page markup and never
/// destroyed; only phase and flag state mutates at runtime. Mutations mark
/// the matching dirty channel, and
/// [`evaluate`](Self::evaluate) drains all channels into a
/// [`Changes`](super::Changes) batch for the presenter.
#[derive(Debug)]
pub struct PageStore {
    // -- Items --
    pub(crate) categories: Vec<CategorySet>,
    /// Owning section slot per item, or [`INVALID`].
    pub(crate) item_section: Vec<u32>,
    /// Authoritative post-filter visibility target per item.
    pub(crate) item_target: Vec<bool>,
    pub(crate) item_phase: Vec<Phase>,
    pub(crate) revealed: Vec<bool>,
    pub(crate) pressed: Vec<bool>,

    // -- Sections --
    pub(crate) section_target: Vec<bool>,
    pub(crate) section_phase: Vec<Phase>,

    // -- Copy buttons --
    pub(crate) button_state: Vec<ButtonState>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            item_section: Vec::new(),
            item_target: Vec::new(),
            item_phase: Vec::new(),
            revealed: Vec::new(),
            pressed: Vec::new(),
            section_target: Vec::new(),
            section_phase: Vec::new(),
            button_state: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Wiring API --

    /// Adds a section and returns its handle. Sections start visible.
    pub fn add_section(&mut self) -> SectionId {
        let idx = u32::try_from(self.section_target.len()).expect("section count fits in u32");
        self.section_target.push(true);
        self.section_phase.push(Phase::Visible);
        SectionId(idx)
    }

    /// Adds a content item tagged with `categories`, optionally owned by a
    /// section. Items start visible (the page loads unfiltered) and
    /// unrevealed.
    ///
    /// # Panics
    ///
    /// Panics if `section` is stale.
    pub fn add_item(&mut self, categories: CategorySet, section: Option<SectionId>) -> ItemId {
        let sec = match section {
            Some(s) => {
                self.validate_section(s);
                s.0
            }
            None => INVALID,
        };
        let idx = u32::try_from(self.categories.len()).expect("item count fits in u32");
        self.categories.push(categories);
        self.item_section.push(sec);
        self.item_target.push(true);
        self.item_phase.push(Phase::Visible);
        self.revealed.push(false);
        self.pressed.push(false);
        ItemId(idx)
    }

    /// Adds a copy button and returns its handle.
    pub fn add_button(&mut self) -> ButtonId {
        let idx = u32::try_from(self.button_state.len()).expect("button count fits in u32");
        self.button_state.push(ButtonState::Idle);
        ButtonId(idx)
    }

    /// Returns the number of items.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lengths were bounds-checked at insertion"
    )]
    pub fn item_count(&self) -> u32 {
        self.categories.len() as u32
    }

    /// Returns the number of sections.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lengths were bounds-checked at insertion"
    )]
    pub fn section_count(&self) -> u32 {
        self.section_target.len() as u32
    }

    /// Returns the number of copy buttons.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lengths were bounds-checked at insertion"
    )]
    pub fn button_count(&self) -> u32 {
        self.button_state.len() as u32
    }

    // -- Handle-based getters --

    /// Returns the category set of an item.
    #[must_use]
    pub fn categories(&self, id: ItemId) -> &CategorySet {
        self.validate_item(id);
        &self.categories[id.0 as usize]
    }

    /// Returns the owning section of an item, if any.
    #[must_use]
    pub fn item_section(&self, id: ItemId) -> Option<SectionId> {
        self.validate_item(id);
        let s = self.item_section[id.0 as usize];
        (s != INVALID).then_some(SectionId(s))
    }

    /// Returns an item's current visibility phase.
    #[must_use]
    pub fn item_phase(&self, id: ItemId) -> Phase {
        self.validate_item(id);
        self.item_phase[id.0 as usize]
    }

    /// Returns an item's post-filter visibility target.
    #[must_use]
    pub fn item_target(&self, id: ItemId) -> bool {
        self.validate_item(id);
        self.item_target[id.0 as usize]
    }

    /// Returns a section's current visibility phase.
    #[must_use]
    pub fn section_phase(&self, id: SectionId) -> Phase {
        self.validate_section(id);
        self.section_phase[id.0 as usize]
    }

    /// Returns a section's derived visibility target.
    #[must_use]
    pub fn section_target(&self, id: SectionId) -> bool {
        self.validate_section(id);
        self.section_target[id.0 as usize]
    }

    /// Returns whether an item has been revealed by scrolling.
    #[must_use]
    pub fn revealed(&self, id: ItemId) -> bool {
        self.validate_item(id);
        self.revealed[id.0 as usize]
    }

    /// Returns whether an item currently shows press feedback.
    #[must_use]
    pub fn pressed(&self, id: ItemId) -> bool {
        self.validate_item(id);
        self.pressed[id.0 as usize]
    }

    /// Returns a copy button's feedback state.
    #[must_use]
    pub fn button_state(&self, id: ButtonId) -> ButtonState {
        self.validate_button(id);
        self.button_state[id.0 as usize]
    }

    // -- Raw-index accessors for backends --
    //
    // These accept raw slot indices (as found in `Changes`) rather than
    // handles. Only use with indices that came from `Changes`.

    /// Returns the item phase at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn item_phase_at(&self, idx: u32) -> Phase {
        self.item_phase[idx as usize]
    }

    /// Returns the section phase at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn section_phase_at(&self, idx: u32) -> Phase {
        self.section_phase[idx as usize]
    }

    /// Returns whether the item at raw slot `idx` is revealed.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn revealed_at(&self, idx: u32) -> bool {
        self.revealed[idx as usize]
    }

    /// Returns whether the item at raw slot `idx` shows press feedback.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn pressed_at(&self, idx: u32) -> bool {
        self.pressed[idx as usize]
    }

    /// Returns the button state at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn button_state_at(&self, idx: u32) -> ButtonState {
        self.button_state[idx as usize]
    }

    // -- Mutation (auto-marks dirty; crate-internal, driven by the engine) --

    pub(crate) fn set_item_phase(&mut self, idx: u32, phase: Phase) {
        if self.item_phase[idx as usize] != phase {
            self.item_phase[idx as usize] = phase;
            self.dirty.mark(idx, dirty::ITEM);
        }
    }

    pub(crate) fn set_section_phase(&mut self, idx: u32, phase: Phase) {
        if self.section_phase[idx as usize] != phase {
            self.section_phase[idx as usize] = phase;
            self.dirty.mark(idx, dirty::SECTION);
        }
    }

    pub(crate) fn set_revealed(&mut self, idx: u32) {
        if !self.revealed[idx as usize] {
            self.revealed[idx as usize] = true;
            self.dirty.mark(idx, dirty::REVEAL);
        }
    }

    pub(crate) fn set_pressed(&mut self, idx: u32, pressed: bool) {
        if self.pressed[idx as usize] != pressed {
            self.pressed[idx as usize] = pressed;
            self.dirty.mark(idx, dirty::PRESS);
        }
    }

    pub(crate) fn set_button_state(&mut self, idx: u32, state: ButtonState) {
        if self.button_state[idx as usize] != state {
            self.button_state[idx as usize] = state;
            self.dirty.mark(idx, dirty::BUTTON);
        }
    }

    // -- Internal helpers --

    fn validate_item(&self, id: ItemId) {
        assert!(
            (id.0 as usize) < self.categories.len(),
            "stale ItemId: {id:?} (item count {})",
            self.categories.len()
        );
    }

    fn validate_section(&self, id: SectionId) {
        assert!(
            (id.0 as usize) < self.section_target.len(),
            "stale SectionId: {id:?} (section count {})",
            self.section_target.len()
        );
    }

    fn validate_button(&self, id: ButtonId) {
        assert!(
            (id.0 as usize) < self.button_state.len(),
            "stale ButtonId: {id:?} (button count {})",
            self.button_state.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Selection;

    #[test]
    fn wiring_assigns_sequential_handles() {
        let mut store = PageStore::new();
        let s = store.add_section();
        let a = store.add_item(CategorySet::parse("frontend"), Some(s));
        let b = store.add_item(CategorySet::parse("backend"), None);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(store.item_section(a), Some(s));
        assert_eq!(store.item_section(b), None);
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.section_count(), 1);
    }

    #[test]
    fn items_start_visible_and_unrevealed() {
        let mut store = PageStore::new();
        let id = store.add_item(CategorySet::parse("frontend"), None);
        assert_eq!(store.item_phase(id), Phase::Visible);
        assert!(store.item_target(id));
        assert!(!store.revealed(id));
        assert!(!store.pressed(id));
    }

    #[test]
    fn phase_change_marks_item_channel() {
        let mut store = PageStore::new();
        let id = store.add_item(CategorySet::parse("frontend"), None);
        store.set_item_phase(id.index(), Phase::Leaving);

        let changes = store.evaluate();
        assert_eq!(changes.items, [id.index()]);
    }

    #[test]
    fn redundant_mutation_marks_nothing() {
        let mut store = PageStore::new();
        let id = store.add_item(CategorySet::parse("frontend"), None);
        store.set_item_phase(id.index(), Phase::Visible);
        store.set_pressed(id.index(), false);

        let changes = store.evaluate();
        assert!(changes.is_empty());
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut store = PageStore::new();
        let id = store.add_item(CategorySet::parse("frontend"), None);
        store.set_revealed(id.index());
        let changes = store.evaluate();
        assert_eq!(changes.reveals, [id.index()]);

        store.set_revealed(id.index());
        let changes = store.evaluate();
        assert!(changes.reveals.is_empty());
    }

    #[test]
    #[should_panic(expected = "stale ItemId")]
    fn out_of_range_handle_panics() {
        let store = PageStore::new();
        let _ = store.item_phase(ItemId(0));
    }

    #[test]
    fn categories_round_trip() {
        let mut store = PageStore::new();
        let id = store.add_item(CategorySet::parse("frontend,backend"), None);
        assert!(store.categories(id).matches(&Selection::parse("backend")));
    }
}
