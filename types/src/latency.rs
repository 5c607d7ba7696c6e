//! Path cost type.
//!
//! Latencies are additive link weights. The sentinel [`Latency::INFINITY`]
//! marks a destination as unreachable; any sum that reaches it saturates
//! there, so "unreachable plus a link" stays unreachable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Cumulative path cost to a destination.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Latency(f64);

impl Latency {
    /// Unreachable. Matches the classic RIP metric ceiling of 16.
    pub const INFINITY: Self = Self(16.0);

    pub const ZERO: Self = Self(0.0);

    /// Cost of a host attached directly to one of our ports.
    pub const LOCAL_ATTACHMENT: Self = Self(0.1);

    /// Build a latency clamped to `[0, INFINITY]`. NaN maps to the
    /// sentinel; negative costs (including `-inf`) map to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() || value >= Self::INFINITY.0 {
            Self::INFINITY
        } else if value < 0.0 {
            Self::ZERO
        } else {
            Self(value)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether traffic can be forwarded along a route with this cost.
    pub fn is_reachable(&self) -> bool {
        self.0 < Self::INFINITY.0
    }

    /// Whether this latency is strictly greater than `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Add for Latency {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl From<f64> for Latency {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Latency> for f64 {
    fn from(latency: Latency) -> Self {
        latency.0
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reachable() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "inf")
        }
    }
}
