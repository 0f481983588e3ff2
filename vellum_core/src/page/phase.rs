// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility phases for items and sections.

/// The visibility state machine shared by content items and sections.
///
/// `Hidden` and `Visible` are the two settled states; the middle three are
/// transient and self-resolve through a pending [`TimerQueue`] entry:
///
/// ```text
///   Hidden ──► Staged ──kick──► Entering ──settle──► Visible
///     ▲                                                │
///     └──────────settle────────── Leaving ◄────────────┘
/// ```
///
/// `Staged` is the pre-paint state: the element is already un-hidden but
/// still carries its offset/transparent styles, so the transition that the
/// kick starts has something to animate from. Because the timer queue keeps
/// at most one entry per entity, a selection change mid-transition simply
/// redirects the machine; no stale timer can fire afterwards.
///
/// [`TimerQueue`]: crate::timer::TimerQueue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Settled hidden: removed from layout, no pending transition.
    Hidden,
    /// Entering, pre-paint: un-hidden but still offset and transparent.
    Staged,
    /// Entering: transition toward the visible style is running.
    Entering,
    /// Settled visible: no pending transition.
    #[default]
    Visible,
    /// Leaving: fade/offset toward hidden is running.
    Leaving,
}

impl Phase {
    /// Returns `true` for the two settled states.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Hidden | Self::Visible)
    }

    /// Returns `true` if the element currently occupies layout (everything
    /// except settled hidden).
    #[must_use]
    pub const fn is_displayed(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Transient feedback state of a copy button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Normal appearance.
    #[default]
    Idle,
    /// Copy succeeded; success styling until the reset timer fires.
    Success,
    /// Copy failed; error styling until the reset timer fires.
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_states() {
        assert!(Phase::Hidden.is_settled());
        assert!(Phase::Visible.is_settled());
        assert!(!Phase::Staged.is_settled());
        assert!(!Phase::Entering.is_settled());
        assert!(!Phase::Leaving.is_settled());
    }

    #[test]
    fn only_settled_hidden_leaves_layout() {
        assert!(!Phase::Hidden.is_displayed());
        assert!(Phase::Leaving.is_displayed());
        assert!(Phase::Staged.is_displayed());
    }
}
