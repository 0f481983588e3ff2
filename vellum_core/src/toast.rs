// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-instance toast notification state.
//!
//! At most one toast exists at a time. Showing a new toast removes any
//! existing one immediately (its pending lifecycle timer is superseded by
//! the new toast's, since both share [`TimerKey::Toast`]). The lifecycle is
//! a fixed walk:
//!
//! ```text
//!   show() ──► Staged ──kick──► Shown ──linger──► Fading ──fade──► removed
//! ```
//!
//! The state holder records lifecycle steps as ordered [`ToastOp`]s, which
//! the engine drains into [`Changes::toasts`](crate::page::Changes::toasts)
//! so the presenter can create, restyle, and remove the element in order.
//!
//! [`TimerKey::Toast`]: crate::timer::TimerKey::Toast

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::time::Delay;

/// Visual flavor of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Confirmation styling.
    Success,
    /// Failure styling.
    Error,
}

/// Lifecycle position of the active toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastPhase {
    /// Created in its pre-paint style (transparent, un-offset).
    Staged,
    /// Fully visible, waiting out the linger window.
    Shown,
    /// Fading out before removal.
    Fading,
}

/// A lifecycle operation for the presenter, in occurrence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastOp {
    /// A new toast element must be created in its pre-paint style.
    Created {
        /// Message text for the new element.
        message: String,
        /// Visual flavor for the new element.
        kind: ToastKind,
    },
    /// The toast's entrance transition must start.
    Kicked,
    /// The toast's exit transition must start.
    Dismissing,
    /// The toast element must be removed.
    Removed,
}

/// The currently displayed toast, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveToast {
    /// Message text.
    pub message: String,
    /// Visual flavor.
    pub kind: ToastKind,
    /// Lifecycle position.
    pub phase: ToastPhase,
}

/// State holder for the single toast instance.
#[derive(Debug, Default)]
pub struct ToastState {
    current: Option<ActiveToast>,
    pending_ops: Vec<ToastOp>,
}

impl ToastState {
    /// Creates an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active toast, if one exists.
    #[must_use]
    pub fn current(&self) -> Option<&ActiveToast> {
        self.current.as_ref()
    }

    /// Replaces any existing toast with a new one in [`ToastPhase::Staged`].
    ///
    /// Returns `true` if an existing toast was removed. The caller must
    /// schedule the kick timer.
    pub fn show(&mut self, message: String, kind: ToastKind) -> bool {
        let replaced = self.current.is_some();
        if replaced {
            self.pending_ops.push(ToastOp::Removed);
        }
        self.pending_ops.push(ToastOp::Created {
            message: message.clone(),
            kind,
        });
        self.current = Some(ActiveToast {
            message,
            kind,
            phase: ToastPhase::Staged,
        });
        replaced
    }

    /// Steps the lifecycle when the toast timer fires.
    ///
    /// Returns the delay until the next step, or `None` once the toast has
    /// been removed (no further timer needed). A fire with no active toast
    /// is a no-op (the timer was superseded in the same batch).
    pub fn step(&mut self, linger: Delay, fade: Delay) -> Option<Delay> {
        let toast = self.current.as_mut()?;
        match toast.phase {
            ToastPhase::Staged => {
                toast.phase = ToastPhase::Shown;
                self.pending_ops.push(ToastOp::Kicked);
                Some(linger)
            }
            ToastPhase::Shown => {
                toast.phase = ToastPhase::Fading;
                self.pending_ops.push(ToastOp::Dismissing);
                Some(fade)
            }
            ToastPhase::Fading => {
                self.current = None;
                self.pending_ops.push(ToastOp::Removed);
                None
            }
        }
    }

    /// Moves accumulated lifecycle ops into `out`, in occurrence order.
    pub fn drain_ops_into(&mut self, out: &mut Vec<ToastOp>) {
        out.append(&mut self.pending_ops);
    }

    /// Returns and clears the accumulated lifecycle ops.
    pub fn take_ops(&mut self) -> Vec<ToastOp> {
        mem::take(&mut self.pending_ops)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    const LINGER: Delay = Delay::from_millis(3_000);
    const FADE: Delay = Delay::from_millis(300);

    #[test]
    fn lifecycle_walks_to_removal() {
        let mut toast = ToastState::new();
        assert!(!toast.show("copied".to_string(), ToastKind::Success));

        assert_eq!(toast.step(LINGER, FADE), Some(LINGER));
        assert_eq!(toast.current().unwrap().phase, ToastPhase::Shown);

        assert_eq!(toast.step(LINGER, FADE), Some(FADE));
        assert_eq!(toast.current().unwrap().phase, ToastPhase::Fading);

        assert_eq!(toast.step(LINGER, FADE), None);
        assert!(toast.current().is_none());

        assert_eq!(
            toast.take_ops(),
            [
                ToastOp::Created {
                    message: "copied".to_string(),
                    kind: ToastKind::Success
                },
                ToastOp::Kicked,
                ToastOp::Dismissing,
                ToastOp::Removed
            ]
        );
    }

    #[test]
    fn second_show_replaces_first() {
        let mut toast = ToastState::new();
        toast.show("first".to_string(), ToastKind::Success);
        assert!(toast.show("second".to_string(), ToastKind::Error));

        let current = toast.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, ToastKind::Error);
        assert_eq!(current.phase, ToastPhase::Staged);

        // The presenter removes the old element before creating the new one.
        assert_eq!(
            toast.take_ops(),
            [
                ToastOp::Created {
                    message: "first".to_string(),
                    kind: ToastKind::Success
                },
                ToastOp::Removed,
                ToastOp::Created {
                    message: "second".to_string(),
                    kind: ToastKind::Error
                }
            ]
        );
    }

    #[test]
    fn step_without_toast_is_noop() {
        let mut toast = ToastState::new();
        assert_eq!(toast.step(LINGER, FADE), None);
        assert!(toast.take_ops().is_empty());
    }
}
