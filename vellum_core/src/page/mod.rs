// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page data model.
//!
//! The page is a flat collection of three entity kinds, defined once by the
//! static markup and wired into the store at load time:
//!
//! - **Content items** ([`ItemId`]) carry a parsed category set, an optional
//!   owning section, a post-filter visibility target, and a visibility
//!   [`Phase`]. They also hold the scroll-reveal and press-feedback flags.
//! - **Sections** ([`SectionId`]) own no state of their own beyond a derived
//!   visibility target (visible iff at least one member item's target is
//!   visible) and a [`Phase`].
//! - **Copy buttons** ([`ButtonId`]) carry a transient [`ButtonState`].
//!
//! Entities are never destroyed; only phase and flag state mutates. Phase
//! mutations mark the matching dirty channel (see [`dirty`](crate::dirty)),
//! and [`PageStore::evaluate`] drains every channel into a [`Changes`]
//! batch for the presenter.

mod evaluate;
mod id;
mod phase;
mod store;

pub use evaluate::Changes;
pub use id::{ButtonId, INVALID, ItemId, SectionId};
pub use phase::{ButtonState, Phase};
pub use store::PageStore;
