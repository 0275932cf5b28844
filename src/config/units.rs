//! Unit types for time quantities.
//!
//! Step pulse timing is expressed in microseconds, everything above the
//! pulse level (ramp duration, debounce window, long press, blink period)
//! in milliseconds. Keeping them as distinct types prevents mixing the two.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A duration in microseconds (step pulse half-periods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Micros(pub u32);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Return the larger of `self` and `floor`.
    #[inline]
    pub fn at_least(self, floor: Micros) -> Self {
        Self(self.0.max(floor.0))
    }
}

impl Add for Micros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Micros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// A duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millis(pub u32);

impl Millis {
    /// Create a new Millis value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this duration is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Micros.
    fn micros(self) -> Micros;
    /// Convert to Millis.
    fn millis(self) -> Millis;
}

impl UnitExt for u32 {
    #[inline]
    fn micros(self) -> Micros {
        Micros(self)
    }

    #[inline]
    fn millis(self) -> Millis {
        Millis(self)
    }
}
