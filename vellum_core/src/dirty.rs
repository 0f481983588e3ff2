// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Vellum uses multi-channel dirty tracking (via [`understory_dirty`]) so
//! that a single evaluation pass can surface every pending presentation
//! update as one [`Changes`](crate::page::Changes) batch. Each channel
//! represents an independent category of change, keyed by the raw slot index
//! of the entity that changed.
//!
//! All channels are local-only: the page model is flat (items point at their
//! owning section), so derived section state is recomputed directly during
//! filter application rather than propagated through dependency edges.
//!
//! Callers never query dirty state directly. Each
//! [`PageStore::evaluate`](crate::page::PageStore::evaluate) call drains all
//! channels and surfaces the results as [`Changes`](crate::page::Changes),
//! which backends [consume](crate::backend::Presenter::apply) to apply
//! incremental style updates.

use understory_dirty::Channel;

/// An item's visibility phase changed.
pub const ITEM: Channel = Channel::new(0);

/// A section's derived visibility phase changed.
pub const SECTION: Channel = Channel::new(1);

/// An item was revealed by scrolling into the viewport.
pub const REVEAL: Channel = Channel::new(2);

/// An item's touch press feedback changed.
pub const PRESS: Channel = Channel::new(3);

/// A copy button's state changed.
pub const BUTTON: Channel = Channel::new(4);
