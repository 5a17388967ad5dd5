//! Unit types for physical quantities.
//!
//! Provides type-safe representations of linear distance, velocity and
//! acceleration to prevent unit confusion at the configuration boundary.
//! Internals work in raw `f64` millimetres once an axis is constructed.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Linear distance in millimetres.
///
/// Used for configuration and user-facing API.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

impl Millimetres {
    /// Create a new Millimetres value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Millimetres {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimetres {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Linear velocity in millimetres per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct MillimetresPerSec(pub f64);

impl MillimetresPerSec {
    /// Create a new MillimetresPerSec value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Mul<f64> for MillimetresPerSec {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Linear acceleration in millimetres per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct MillimetresPerSecSquared(pub f64);

impl MillimetresPerSecSquared {
    /// Create a new MillimetresPerSecSquared value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Mul<f64> for MillimetresPerSecSquared {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Millimetres.
    fn mm(self) -> Millimetres;
    /// Convert to MillimetresPerSec.
    fn mm_per_sec(self) -> MillimetresPerSec;
    /// Convert to MillimetresPerSecSquared.
    fn mm_per_sec_squared(self) -> MillimetresPerSecSquared;
}

impl UnitExt for f64 {
    #[inline]
    fn mm(self) -> Millimetres {
        Millimetres(self)
    }

    #[inline]
    fn mm_per_sec(self) -> MillimetresPerSec {
        MillimetresPerSec(self)
    }

    #[inline]
    fn mm_per_sec_squared(self) -> MillimetresPerSecSquared {
        MillimetresPerSecSquared(self)
    }
}
