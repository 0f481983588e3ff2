// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic engine time.
//!
//! [`Instant`] represents a point in time as microsecond ticks from an
//! arbitrary backend-defined origin (the web backend derives it from
//! `performance.now()`). [`Delay`] is a duration in the same units. All
//! transition scheduling in the engine is expressed with these two types;
//! nothing in core ever reads a clock.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as microsecond ticks from a backend-defined
/// origin.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(pub u64);

impl Instant {
    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Returns the delay between `self` and an earlier instant, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> Delay {
        Delay(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a delay.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, delay: Delay) -> Option<Self> {
        match self.0.checked_add(delay.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Delay> for Instant {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Delay) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Delay> for Instant {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Delay) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for Instant {
    type Output = Delay;

    #[inline]
    fn sub(self, rhs: Self) -> Delay {
        Delay(self.0 - rhs.0)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({}us)", self.0)
    }
}

/// A duration in microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Delay(pub u64);

impl Delay {
    /// A zero-length delay.
    pub const ZERO: Self = Self(0);

    /// Creates a delay from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Returns the delay in whole milliseconds, truncating.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0 / 1_000
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Delay {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Delay {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delay({}us)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_is_micros() {
        assert_eq!(Delay::from_millis(300).micros(), 300_000);
        assert_eq!(Delay::from_millis(300).as_millis(), 300);
    }

    #[test]
    fn instant_delay_ops() {
        let t = Instant(1_000);
        let d = Delay(200);
        assert_eq!((t + d).micros(), 1_200);
        assert_eq!((t - d).micros(), 800);
        assert_eq!(t.saturating_since(Instant(1_500)), Delay::ZERO);
        assert_eq!(t.saturating_since(Instant(400)), Delay(600));
    }

    #[test]
    fn checked_add_at_limit() {
        let t = Instant(u64::MAX);
        assert_eq!(t.checked_add(Delay(1)), None);
        assert_eq!(t.checked_add(Delay::ZERO), Some(t));
    }

    #[test]
    fn delay_arithmetic() {
        let a = Delay(100);
        let b = Delay(30);
        assert_eq!((a + b).micros(), 130);
        assert_eq!((a - b).micros(), 70);
        assert_eq!(a.saturating_sub(Delay(200)), Delay::ZERO);
    }
}
