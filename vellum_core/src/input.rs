// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events and the actions they produce.
//!
//! Backends translate whatever raw input they receive (pointer, keyboard,
//! touch) into the two semantic events here and hand them to
//! [`Engine::handle_event`]. The engine mutates its own state and returns
//! [`Action`]s for the effects only the backend can perform, such as moving
//! browser focus or invoking the clipboard. The event vocabulary carries no
//! modality: a pill activated by `Enter` and a pill activated by a click
//! arrive as the same [`InputEvent::Activate`].
//!
//! [`Engine::handle_event`]: crate::engine::Engine::handle_event

use alloc::vec::Vec;

use crate::category::Selection;
use crate::page::{ButtonId, ItemId};

/// Horizontal focus travel direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward lower pill indices.
    Left,
    /// Toward higher pill indices.
    Right,
}

/// What an event is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A filter pill, by position in the selector bar.
    Pill(usize),
    /// A content card.
    Card(ItemId),
    /// A copy-to-clipboard button.
    Copy(ButtonId),
}

/// A semantic input event, independent of input modality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The target was triggered (click, tap, `Enter`, `Space`).
    Activate(Target),
    /// Focus should travel between pills (`ArrowLeft`, `ArrowRight`).
    FocusMove(Direction),
}

/// An effect the backend must carry out.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move input focus to the pill at this position.
    FocusPill(usize),
    /// Read this button's payload text and copy it to the clipboard,
    /// reporting the outcome via
    /// [`Engine::copy_finished`](crate::engine::Engine::copy_finished).
    RequestCopy(ButtonId),
    /// Trigger haptic feedback for this many milliseconds, where supported.
    Vibrate(u32),
}

/// The row of filter pills and which one is active.
#[derive(Debug)]
pub struct SelectorBar {
    selections: Vec<Selection>,
    active: usize,
}

impl SelectorBar {
    /// Creates a bar from the pills' selections, with the first one active.
    ///
    /// An empty bar is permitted but inert.
    #[must_use]
    pub fn new(selections: Vec<Selection>) -> Self {
        Self {
            selections,
            active: 0,
        }
    }

    /// Number of pills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether the bar has no pills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Position of the active pill.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Selection carried by the active pill, if the bar is non-empty.
    #[must_use]
    pub fn active_selection(&self) -> Option<&Selection> {
        self.selections.get(self.active)
    }

    /// Selection carried by the pill at `index`.
    #[must_use]
    pub fn selection(&self, index: usize) -> Option<&Selection> {
        self.selections.get(index)
    }

    /// Makes the pill at `index` active. Out-of-range indices are ignored.
    ///
    /// Returns `true` if the active pill changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.selections.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Position one step from the active pill, wrapping at both ends.
    ///
    /// Returns `None` for an empty bar.
    #[must_use]
    pub fn step(&self, direction: Direction) -> Option<usize> {
        let len = self.selections.len();
        if len == 0 {
            return None;
        }
        Some(match direction {
            Direction::Left => (self.active + len - 1) % len,
            Direction::Right => (self.active + 1) % len,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn bar() -> SelectorBar {
        SelectorBar::new(vec![
            Selection::parse("all"),
            Selection::parse("frontend"),
            Selection::parse("backend"),
        ])
    }

    #[test]
    fn step_wraps_both_directions() {
        let mut bar = bar();
        assert_eq!(bar.step(Direction::Left), Some(2));
        assert_eq!(bar.step(Direction::Right), Some(1));

        assert!(bar.activate(2));
        assert_eq!(bar.step(Direction::Right), Some(0));
    }

    #[test]
    fn activate_ignores_out_of_range() {
        let mut bar = bar();
        assert!(!bar.activate(3));
        assert_eq!(bar.active(), 0);
        assert!(!bar.activate(0));
    }

    #[test]
    fn empty_bar_is_inert() {
        let bar = SelectorBar::new(vec![]);
        assert_eq!(bar.step(Direction::Left), None);
        assert!(bar.active_selection().is_none());
    }
}
