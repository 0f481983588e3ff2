// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable test harness for vellum engines.
//!
//! Provides the pieces a headless (non-browser) host needs to drive an
//! [`Engine`] deterministically:
//!
//! - [`ManualClock`] — a hand-advanced time source.
//! - [`RecordingPresenter`] — a [`Presenter`] that records every applied
//!   batch with the state resolved at apply time.
//! - [`settle`] — fires pending deadlines in order until the engine has
//!   nothing left scheduled.
//!
//! The integration tests at the bottom of this crate exercise full
//! interaction flows end to end through these pieces.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cell::Cell;

use vellum_core::backend::Presenter;
use vellum_core::engine::Engine;
use vellum_core::page::{ButtonState, Changes, PageStore, Phase};
use vellum_core::time::{Delay, Instant};
use vellum_core::toast::ToastOp;
use vellum_core::trace::Tracer;

/// A hand-advanced time source.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Creates a clock at `start`.
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Returns the current time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now.get()
    }

    /// Moves the clock forward by `delay` and returns the new time.
    pub fn advance(&self, delay: Delay) -> Instant {
        let next = self.now.get() + delay;
        self.now.set(next);
        next
    }

    /// Jumps the clock to `at`. Time never moves backwards; an earlier
    /// instant is ignored.
    pub fn jump_to(&self, at: Instant) -> Instant {
        if at > self.now.get() {
            self.now.set(at);
        }
        self.now.get()
    }
}

/// One applied batch, with phases and states resolved at apply time.
#[derive(Clone, Debug, Default)]
pub struct Applied {
    /// Item slot and the phase it held when applied.
    pub items: Vec<(u32, Phase)>,
    /// Section slot and the phase it held when applied.
    pub sections: Vec<(u32, Phase)>,
    /// Revealed item slots.
    pub reveals: Vec<u32>,
    /// Item slot and its press flag.
    pub presses: Vec<(u32, bool)>,
    /// Button slot and its feedback state.
    pub buttons: Vec<(u32, ButtonState)>,
    /// Toast lifecycle ops, in order.
    pub toasts: Vec<ToastOp>,
}

/// A [`Presenter`] that records every applied batch.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    applied: Vec<Applied>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the applied batches, oldest first. Empty batches are not
    /// recorded.
    #[must_use]
    pub fn applied(&self) -> &[Applied] {
        &self.applied
    }

    /// Returns every item phase ever applied for `idx`, in apply order.
    #[must_use]
    pub fn item_phases(&self, idx: u32) -> Vec<Phase> {
        self.applied
            .iter()
            .flat_map(|a| a.items.iter())
            .filter(|(i, _)| *i == idx)
            .map(|(_, phase)| *phase)
            .collect()
    }

    /// Returns every toast op ever applied, in apply order.
    #[must_use]
    pub fn toast_ops(&self) -> Vec<ToastOp> {
        self.applied
            .iter()
            .flat_map(|a| a.toasts.iter().cloned())
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, store: &PageStore, changes: &Changes) {
        if changes.is_empty() {
            return;
        }
        self.applied.push(Applied {
            items: changes
                .items
                .iter()
                .map(|&i| (i, store.item_phase_at(i)))
                .collect(),
            sections: changes
                .sections
                .iter()
                .map(|&i| (i, store.section_phase_at(i)))
                .collect(),
            reveals: changes.reveals.clone(),
            presses: changes
                .presses
                .iter()
                .map(|&i| (i, store.pressed_at(i)))
                .collect(),
            buttons: changes
                .buttons
                .iter()
                .map(|&i| (i, store.button_state_at(i)))
                .collect(),
            toasts: changes.toasts.clone(),
        });
    }
}

/// Fires pending deadlines in order until the engine settles, applying each
/// evaluation to `presenter`. The clock jumps to each deadline.
///
/// # Panics
///
/// Panics if the engine is still scheduling work after 256 wakeups.
pub fn settle(engine: &mut Engine, clock: &ManualClock, presenter: &mut dyn Presenter) {
    for _ in 0..256 {
        let Some(deadline) = engine.next_deadline() else {
            return;
        };
        let now = clock.jump_to(deadline);
        engine.advance(now, &mut Tracer::none());
        let changes = engine.evaluate();
        presenter.apply(engine.store(), &changes);
    }
    panic!("engine did not settle after 256 wakeups");
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use vellum_core::backend::CopyOutcome;
    use vellum_core::category::{CategorySet, Selection};
    use vellum_core::engine::{CARD_TOAST, COPY_SUCCESS_TOAST, PILL_VIBRATE_MS};
    use vellum_core::input::{Action, InputEvent, SelectorBar, Target};
    use vellum_core::page::{ButtonId, ItemId};
    use vellum_core::toast::ToastKind;

    use super::*;

    /// Builds a two-section page: a frontend section with two items and a
    /// mixed section with one dual-tagged item, plus one copy button.
    fn page() -> (Engine, Vec<ItemId>, Vec<u32>, ButtonId) {
        let mut store = PageStore::new();
        let sec_front = store.add_section();
        let sec_mixed = store.add_section();
        let items = vec![
            store.add_item(CategorySet::parse("frontend"), Some(sec_front)),
            store.add_item(CategorySet::parse("frontend"), Some(sec_front)),
            store.add_item(CategorySet::parse("frontend,backend"), Some(sec_mixed)),
        ];
        let button = store.add_button();
        let selector = SelectorBar::new(vec![
            Selection::parse("all"),
            Selection::parse("frontend"),
            Selection::parse("backend"),
        ]);
        let sections = vec![sec_front.index(), sec_mixed.index()];
        (Engine::new(store, selector), items, sections, button)
    }

    #[test]
    fn pill_click_filters_page_end_to_end() {
        let (mut engine, items, sections, _) = page();
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();

        // Select "backend": only the dual-tagged item and its section stay.
        let actions = engine.handle_event(
            &InputEvent::Activate(Target::Pill(2)),
            clock.now(),
            &mut Tracer::none(),
        );
        assert_eq!(actions, [Action::Vibrate(PILL_VIBRATE_MS)]);
        let changes = engine.evaluate();
        presenter.apply(engine.store(), &changes);
        settle(&mut engine, &clock, &mut presenter);

        assert_eq!(engine.store().item_phase(items[0]), Phase::Hidden);
        assert_eq!(engine.store().item_phase(items[1]), Phase::Hidden);
        assert_eq!(engine.store().item_phase(items[2]), Phase::Visible);
        assert_eq!(engine.store().section_phase_at(sections[0]), Phase::Hidden);
        assert_eq!(engine.store().section_phase_at(sections[1]), Phase::Visible);

        // The hidden item was presented leaving before it settled hidden.
        assert_eq!(
            presenter.item_phases(items[0].index()),
            [Phase::Leaving, Phase::Hidden]
        );
    }

    #[test]
    fn reselecting_all_restores_everything() {
        let (mut engine, items, sections, _) = page();
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();

        for pill in [2, 0] {
            let _ = engine.handle_event(
                &InputEvent::Activate(Target::Pill(pill)),
                clock.now(),
                &mut Tracer::none(),
            );
            let changes = engine.evaluate();
            presenter.apply(engine.store(), &changes);
            settle(&mut engine, &clock, &mut presenter);
        }

        for item in &items {
            assert_eq!(engine.store().item_phase(*item), Phase::Visible);
        }
        for sec in &sections {
            assert_eq!(engine.store().section_phase_at(*sec), Phase::Visible);
        }

        // Restored items walked the full entrance: staged, entering, visible.
        assert_eq!(
            presenter.item_phases(items[0].index()),
            [
                Phase::Leaving,
                Phase::Hidden,
                Phase::Staged,
                Phase::Entering,
                Phase::Visible
            ]
        );
    }

    #[test]
    fn dual_tagged_item_survives_both_filters() {
        // A "frontend,backend" item next to a plain "backend" item: the
        // dual-tagged one matches every selection, the plain one only its
        // own and "all".
        let mut store = PageStore::new();
        let sec = store.add_section();
        let mixed = store.add_item(CategorySet::parse("frontend,backend"), Some(sec));
        let back = store.add_item(CategorySet::parse("backend"), Some(sec));
        let selector = SelectorBar::new(vec![
            Selection::parse("all"),
            Selection::parse("frontend"),
            Selection::parse("backend"),
        ]);
        let mut engine = Engine::new(store, selector);
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();

        let mut select = |engine: &mut Engine, pill: usize| {
            let _ = engine.handle_event(
                &InputEvent::Activate(Target::Pill(pill)),
                clock.now(),
                &mut Tracer::none(),
            );
            let changes = engine.evaluate();
            presenter.apply(engine.store(), &changes);
            settle(engine, &clock, &mut presenter);
        };

        select(&mut engine, 2);
        assert_eq!(engine.store().item_phase(mixed), Phase::Visible);
        assert_eq!(engine.store().item_phase(back), Phase::Visible);

        select(&mut engine, 1);
        assert_eq!(engine.store().item_phase(mixed), Phase::Visible);
        assert_eq!(engine.store().item_phase(back), Phase::Hidden);
        // The surviving member keeps its section alive.
        assert_eq!(engine.store().section_phase(sec), Phase::Visible);

        select(&mut engine, 0);
        assert_eq!(engine.store().item_phase(mixed), Phase::Visible);
        assert_eq!(engine.store().item_phase(back), Phase::Visible);
    }

    #[test]
    fn rapid_reselect_never_strands_an_item_hidden() {
        let (mut engine, items, _, _) = page();
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();
        let mut tracer = Tracer::none();

        // Hide the frontend items, then flip back before their exits settle.
        let _ = engine.handle_event(
            &InputEvent::Activate(Target::Pill(2)),
            clock.now(),
            &mut tracer,
        );
        clock.advance(Delay::from_millis(50));
        let _ = engine.handle_event(
            &InputEvent::Activate(Target::Pill(1)),
            clock.now(),
            &mut tracer,
        );
        settle(&mut engine, &clock, &mut presenter);

        assert_eq!(engine.store().item_phase(items[0]), Phase::Visible);
        assert_eq!(engine.store().item_phase(items[1]), Phase::Visible);
        // The superseded exit never fired: no Hidden was ever presented.
        assert!(!presenter.item_phases(items[0].index()).contains(&Phase::Hidden));
    }

    #[test]
    fn copy_flow_shows_toast_and_resets_button() {
        let (mut engine, _, _, button) = page();
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();

        let actions = engine.handle_event(
            &InputEvent::Activate(Target::Copy(button)),
            clock.now(),
            &mut Tracer::none(),
        );
        assert_eq!(actions, [Action::RequestCopy(button)]);

        engine.copy_finished(button, CopyOutcome::Primary, clock.now(), &mut Tracer::none());
        let changes = engine.evaluate();
        presenter.apply(engine.store(), &changes);
        assert_eq!(engine.store().button_state(button), ButtonState::Success);

        settle(&mut engine, &clock, &mut presenter);
        assert_eq!(engine.store().button_state(button), ButtonState::Idle);
        assert_eq!(
            presenter.toast_ops(),
            [
                ToastOp::Created {
                    message: COPY_SUCCESS_TOAST.to_string(),
                    kind: ToastKind::Success
                },
                ToastOp::Kicked,
                ToastOp::Dismissing,
                ToastOp::Removed
            ]
        );
    }

    #[test]
    fn back_to_back_toasts_stay_single_instance() {
        let (mut engine, items, _, _) = page();
        let clock = ManualClock::default();
        let mut presenter = RecordingPresenter::new();
        let mut tracer = Tracer::none();

        let _ = engine.handle_event(
            &InputEvent::Activate(Target::Card(items[0])),
            clock.now(),
            &mut tracer,
        );
        clock.advance(Delay::from_millis(100));
        let _ = engine.handle_event(
            &InputEvent::Activate(Target::Card(items[1])),
            clock.now(),
            &mut tracer,
        );
        let changes = engine.evaluate();
        presenter.apply(engine.store(), &changes);
        settle(&mut engine, &clock, &mut presenter);

        // The first toast is removed before the second is created, and only
        // one removal ever follows a creation.
        let ops = presenter.toast_ops();
        let created = ops
            .iter()
            .filter(|op| matches!(op, ToastOp::Created { .. }))
            .count();
        let removed = ops
            .iter()
            .filter(|op| matches!(op, ToastOp::Removed))
            .count();
        assert_eq!(created, 2);
        assert_eq!(removed, 2);
        assert!(matches!(
            &ops[0],
            ToastOp::Created { message, .. } if message == CARD_TOAST
        ));
        assert!(engine.toast().current().is_none());
    }

    #[test]
    fn clock_never_runs_backwards() {
        let clock = ManualClock::new(Instant(1_000));
        assert_eq!(clock.jump_to(Instant(500)), Instant(1_000));
        assert_eq!(clock.advance(Delay::from_millis(1)), Instant(2_000));
    }
}
