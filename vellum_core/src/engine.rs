// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: filter application, timer stepping, and input dispatch.
//!
//! [`Engine`] owns the page model and every piece of pending-transition
//! state. Backends drive it through a small set of entry points, each taking
//! the current time explicitly:
//!
//! - [`handle_event`](Engine::handle_event) for semantic input,
//! - [`advance`](Engine::advance) when the platform wakeup fires,
//! - [`copy_finished`](Engine::copy_finished) when an async copy resolves,
//! - [`reveal`](Engine::reveal), [`press`](Engine::press) /
//!   [`release`](Engine::release), and the `pull_*` methods for scroll and
//!   touch input,
//! - [`evaluate`](Engine::evaluate) to collect what changed.
//!
//! Every transition is a two-phase walk through [`Phase`]: a state change
//! plus a timer scheduled in the [`TimerQueue`] to settle it. Because the
//! queue holds at most one timer per entity, a later request for the same
//! entity supersedes the earlier one and the stale settle never fires.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::backend::CopyOutcome;
use crate::category::Selection;
use crate::input::{Action, InputEvent, SelectorBar, Target};
use crate::page::{ButtonId, ButtonState, Changes, ItemId, PageStore, Phase};
use crate::time::{Delay, Instant};
use crate::timer::{TimerKey, TimerQueue};
use crate::toast::{ToastKind, ToastState};
use crate::touch::PullTracker;
use crate::trace::{
    ActivationEvent, CopyEvent, FilterEvent, RevealEvent, TimerFiredEvent, TimerScheduledEvent,
    ToastEvent, Tracer,
};

// ---------------------------------------------------------------------------
// Timing constants
// ---------------------------------------------------------------------------

/// Number of stagger slots for item entrances.
pub const STAGGER_SLOTS: u32 = 5;
/// Entrance kick offset per stagger slot.
pub const ENTER_STAGGER_STEP: Delay = Delay::from_millis(20);
/// Item entrance transition length.
pub const ITEM_ENTER: Delay = Delay::from_millis(300);
/// Item exit transition length.
pub const ITEM_LEAVE: Delay = Delay::from_millis(200);
/// Delay before a staged section's entrance kicks.
pub const SECTION_KICK: Delay = Delay::from_millis(50);
/// Section entrance transition length.
pub const SECTION_ENTER: Delay = Delay::from_millis(400);
/// Section exit transition length.
pub const SECTION_LEAVE: Delay = Delay::from_millis(300);
/// Delay before a staged toast's entrance kicks.
pub const TOAST_KICK: Delay = Delay::from_millis(10);
/// How long a toast stays fully visible.
pub const TOAST_LINGER: Delay = Delay::from_millis(3_000);
/// Toast fade-out transition length.
pub const TOAST_FADE: Delay = Delay::from_millis(300);
/// How long press feedback lingers after the finger lifts.
pub const PRESS_RELEASE: Delay = Delay::from_millis(150);
/// How long a copy button shows its outcome before resetting.
pub const BUTTON_RESET: Delay = Delay::from_millis(2_000);

// ---------------------------------------------------------------------------
// Toast messages
// ---------------------------------------------------------------------------

/// Toast text for a successful clipboard copy.
pub const COPY_SUCCESS_TOAST: &str = "Code copied to clipboard!";
/// Toast text for a failed clipboard copy.
pub const COPY_FAILURE_TOAST: &str = "Failed to copy code";
/// Toast text for a card tap.
pub const CARD_TOAST: &str = "Card interaction ready!";
/// Toast text for a completed pull-to-refresh gesture.
pub const PULL_TOAST: &str = "Pull to refresh feature ready!";

/// Haptic pulse length for pill activation, in milliseconds.
pub const PILL_VIBRATE_MS: u32 = 10;

/// Entrance kick offset for the item at slot `idx`.
///
/// Items are spread across [`STAGGER_SLOTS`] deterministic offsets by index,
/// so a batch of entrances fans out instead of starting in lockstep.
#[must_use]
pub const fn stagger(idx: u32) -> Delay {
    Delay(ENTER_STAGGER_STEP.micros() * (idx % STAGGER_SLOTS) as u64)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns the page model and all pending-transition state.
#[derive(Debug)]
pub struct Engine {
    store: PageStore,
    timers: TimerQueue,
    toast: ToastState,
    selector: SelectorBar,
    pull: PullTracker,
}

impl Engine {
    /// Creates an engine over a wired store and selector bar.
    #[must_use]
    pub fn new(store: PageStore, selector: SelectorBar) -> Self {
        Self {
            store,
            timers: TimerQueue::new(),
            toast: ToastState::new(),
            selector,
            pull: PullTracker::new(),
        }
    }

    /// Returns the page store, for presenters reading current state.
    #[must_use]
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// Returns the selector bar.
    #[must_use]
    pub fn selector(&self) -> &SelectorBar {
        &self.selector
    }

    /// Returns the toast state holder.
    #[must_use]
    pub fn toast(&self) -> &ToastState {
        &self.toast
    }

    /// Returns the earliest pending timer deadline, if any.
    ///
    /// Backends arm a one-shot platform timer for this instant and call
    /// [`advance`](Self::advance) when it fires. `None` means the engine is
    /// fully settled and needs no wakeup.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // -- Input dispatch --

    /// Handles a semantic input event, returning the effects the backend
    /// must carry out.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        now: Instant,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Action> {
        let mut actions = Vec::new();
        match event {
            InputEvent::Activate(Target::Pill(index)) => {
                self.activate_pill(*index, now, tracer, &mut actions);
            }
            InputEvent::Activate(Target::Card(item)) => {
                self.press(*item);
                self.release(*item, now, tracer);
                self.show_toast(CARD_TOAST, ToastKind::Success, now, tracer);
            }
            InputEvent::Activate(Target::Copy(button)) => {
                actions.push(Action::RequestCopy(*button));
            }
            InputEvent::FocusMove(direction) => {
                if let Some(next) = self.selector.step(*direction) {
                    actions.push(Action::FocusPill(next));
                    self.activate_pill(next, now, tracer, &mut actions);
                }
            }
        }
        tracer.activation(&ActivationEvent {
            at: now,
            actions: actions.len(),
        });
        actions
    }

    /// Makes pill `index` the active selection, applies its filter, and
    /// queues the haptic pulse. Out-of-range indices are ignored.
    fn activate_pill(
        &mut self,
        index: usize,
        now: Instant,
        tracer: &mut Tracer<'_>,
        actions: &mut Vec<Action>,
    ) {
        if let Some(selection) = self.selector.selection(index).cloned() {
            self.selector.activate(index);
            self.apply_filter(&selection, now, tracer);
            actions.push(Action::Vibrate(PILL_VIBRATE_MS));
        }
    }

    // -- Filtering --

    /// Applies a category selection to the whole page.
    ///
    /// Items whose visibility target flips start their entrance or exit
    /// transition; items already heading the right way are left alone, which
    /// keeps rapid selection changes race-free (any pending settle for a
    /// flipped item is superseded by the new one). Section targets are
    /// derived from their members and transition the same way.
    pub fn apply_filter(&mut self, selection: &Selection, now: Instant, tracer: &mut Tracer<'_>) {
        let mut event = FilterEvent {
            at: now,
            items_shown: 0,
            items_hidden: 0,
            sections_shown: 0,
            sections_hidden: 0,
        };

        for idx in 0..self.store.item_count() {
            let target = self.store.categories[idx as usize].matches(selection);
            self.store.item_target[idx as usize] = target;
            match (target, self.store.item_phase_at(idx)) {
                (true, Phase::Hidden | Phase::Leaving) => {
                    self.store.set_item_phase(idx, Phase::Staged);
                    self.schedule(TimerKey::Item(idx), now + stagger(idx), tracer);
                    event.items_shown += 1;
                }
                (false, Phase::Visible | Phase::Entering | Phase::Staged) => {
                    self.store.set_item_phase(idx, Phase::Leaving);
                    self.schedule(TimerKey::Item(idx), now + ITEM_LEAVE, tracer);
                    event.items_hidden += 1;
                }
                _ => {}
            }
        }

        for idx in 0..self.store.section_count() {
            let target = self.section_has_live_member(idx);
            self.store.section_target[idx as usize] = target;
            match (target, self.store.section_phase_at(idx)) {
                (true, Phase::Hidden | Phase::Leaving) => {
                    self.store.set_section_phase(idx, Phase::Staged);
                    self.schedule(TimerKey::Section(idx), now + SECTION_KICK, tracer);
                    event.sections_shown += 1;
                }
                (false, Phase::Visible | Phase::Entering | Phase::Staged) => {
                    self.store.set_section_phase(idx, Phase::Leaving);
                    self.schedule(TimerKey::Section(idx), now + SECTION_LEAVE, tracer);
                    event.sections_hidden += 1;
                }
                _ => {}
            }
        }

        tracer.filter(&event);
    }

    fn section_has_live_member(&self, section: u32) -> bool {
        self.store
            .item_section
            .iter()
            .zip(&self.store.item_target)
            .any(|(&sec, &target)| sec == section && target)
    }

    // -- Timer stepping --

    /// Fires every timer due at or before `now`, stepping the transitions
    /// they settle.
    ///
    /// A fired key is interpreted against the entity's *current* phase, so a
    /// key whose transition was redirected since scheduling steps the new
    /// transition, never the old one.
    pub fn advance(&mut self, now: Instant, tracer: &mut Tracer<'_>) {
        for key in self.timers.advance(now) {
            tracer.timer_fired(&TimerFiredEvent { key, now });
            match key {
                TimerKey::Item(idx) => match self.store.item_phase_at(idx) {
                    Phase::Staged => {
                        self.store.set_item_phase(idx, Phase::Entering);
                        self.schedule(TimerKey::Item(idx), now + ITEM_ENTER, tracer);
                    }
                    Phase::Entering => self.store.set_item_phase(idx, Phase::Visible),
                    Phase::Leaving => self.store.set_item_phase(idx, Phase::Hidden),
                    Phase::Hidden | Phase::Visible => {}
                },
                TimerKey::Section(idx) => match self.store.section_phase_at(idx) {
                    Phase::Staged => {
                        self.store.set_section_phase(idx, Phase::Entering);
                        self.schedule(TimerKey::Section(idx), now + SECTION_ENTER, tracer);
                    }
                    Phase::Entering => self.store.set_section_phase(idx, Phase::Visible),
                    Phase::Leaving => self.store.set_section_phase(idx, Phase::Hidden),
                    Phase::Hidden | Phase::Visible => {}
                },
                TimerKey::Toast => {
                    if let Some(delay) = self.toast.step(TOAST_LINGER, TOAST_FADE) {
                        self.schedule(TimerKey::Toast, now + delay, tracer);
                    }
                }
                TimerKey::Press(idx) => self.store.set_pressed(idx, false),
                TimerKey::Button(idx) => self.store.set_button_state(idx, ButtonState::Idle),
            }
        }
    }

    // -- Evaluation --

    /// Evaluates the page model, draining all dirty channels and pending
    /// toast operations into a fresh [`Changes`] batch.
    pub fn evaluate(&mut self) -> Changes {
        let mut changes = Changes::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut Changes) {
        self.store.evaluate_into(changes);
        self.toast.drain_ops_into(&mut changes.toasts);
    }

    // -- Toasts --

    /// Shows a toast, replacing any existing one.
    pub fn show_toast(
        &mut self,
        message: &str,
        kind: ToastKind,
        now: Instant,
        tracer: &mut Tracer<'_>,
    ) {
        let replaced = self.toast.show(message.to_string(), kind);
        // Scheduling supersedes the replaced toast's pending step, if any.
        self.schedule(TimerKey::Toast, now + TOAST_KICK, tracer);
        tracer.toast(&ToastEvent {
            kind,
            replaced,
            at: now,
        });
    }

    // -- Clipboard --

    /// Records the outcome of the copy requested for `button`.
    ///
    /// The button shows its outcome for [`BUTTON_RESET`], and a toast
    /// reports the result.
    pub fn copy_finished(
        &mut self,
        button: ButtonId,
        outcome: CopyOutcome,
        now: Instant,
        tracer: &mut Tracer<'_>,
    ) {
        let idx = button.index();
        let (state, message, kind) = if outcome.is_success() {
            (ButtonState::Success, COPY_SUCCESS_TOAST, ToastKind::Success)
        } else {
            (ButtonState::Error, COPY_FAILURE_TOAST, ToastKind::Error)
        };
        self.store.set_button_state(idx, state);
        self.schedule(TimerKey::Button(idx), now + BUTTON_RESET, tracer);
        self.show_toast(message, kind, now, tracer);
        tracer.copy(&CopyEvent {
            button_index: idx,
            outcome,
            at: now,
        });
    }

    // -- Scroll reveal --

    /// Marks an item as revealed by scrolling. Reveals are one-shot; calls
    /// for an already revealed item do nothing.
    pub fn reveal(&mut self, item: ItemId, now: Instant, tracer: &mut Tracer<'_>) {
        if self.store.revealed(item) {
            return;
        }
        self.store.set_revealed(item.index());
        tracer.reveal(&RevealEvent {
            item_index: item.index(),
            at: now,
        });
    }

    // -- Press feedback --

    /// Starts press feedback on an item (finger down). Cancels any pending
    /// release so the feedback holds while the finger is down.
    pub fn press(&mut self, item: ItemId) {
        let idx = item.index();
        self.store.set_pressed(idx, true);
        self.timers.cancel(TimerKey::Press(idx));
    }

    /// Ends press feedback on an item (finger up). The feedback lingers for
    /// [`PRESS_RELEASE`] before clearing.
    pub fn release(&mut self, item: ItemId, now: Instant, tracer: &mut Tracer<'_>) {
        self.schedule(TimerKey::Press(item.index()), now + PRESS_RELEASE, tracer);
    }

    // -- Pull to refresh --

    /// Records a touch-down at vertical position `y`.
    pub fn pull_begin(&mut self, y: f64) {
        self.pull.begin(y);
    }

    /// Records a finger move. Returns the damped visual offset the backend
    /// should apply, if the gesture is currently eligible.
    pub fn pull_update(&mut self, y: f64, at_top: bool) -> Option<f64> {
        self.pull.update(y, at_top)
    }

    /// Ends the pull gesture. A pull past the trigger distance shows the
    /// refresh toast and returns `true`.
    pub fn pull_finish(&mut self, now: Instant, tracer: &mut Tracer<'_>) -> bool {
        let triggered = self.pull.finish();
        if triggered {
            self.show_toast(PULL_TOAST, ToastKind::Success, now, tracer);
        }
        triggered
    }

    // -- Internal --

    fn schedule(&mut self, key: TimerKey, at: Instant, tracer: &mut Tracer<'_>) {
        let superseded = self.timers.schedule(key, at);
        tracer.timer_scheduled(&TimerScheduledEvent {
            key,
            at,
            superseded,
        });
    }
}
