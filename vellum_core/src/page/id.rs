// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page entity identity types.

use core::fmt;

/// Sentinel value indicating "no section" in item→section index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a content item in a [`PageStore`](super::PageStore).
///
/// Items are created during page wiring and never destroyed, so the handle
/// is a plain slot index; the store validates range on access.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

/// A handle to a section in a [`PageStore`](super::PageStore).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub(crate) u32);

impl SectionId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

/// A handle to a copy button in a [`PageStore`](super::PageStore).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub(crate) u32);

impl ButtonId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ButtonId({})", self.0)
    }
}
