//! Simulation time and route expiry.
//!
//! Timestamps are seconds on the environment's monotonic clock. They are
//! fractional because the simulators this router runs in schedule events
//! on a continuous timeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the environment's monotonic clock, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Time zero.
    pub const EPOCH: Self = Self(0.0);

    pub fn new(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// This timestamp shifted forward by `secs`.
    pub fn after(&self, secs: f64) -> Self {
        Self(self.0 + secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// When a route stops being trusted without a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expiry {
    /// Stale once the clock reaches this instant.
    At(Timestamp),
    /// Statically installed; never expires.
    Forever,
}

impl Expiry {
    /// `FOREVER` sentinel used for static routes.
    pub const FOREVER: Self = Self::Forever;

    /// An expiry `ttl_secs` after `now`.
    pub fn after(now: Timestamp, ttl_secs: f64) -> Self {
        Self::At(now.after(ttl_secs))
    }

    /// Whether the entry is stale at `now`. An entry expiring exactly at
    /// `now` is already stale.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self {
            Self::At(at) => at.as_secs() <= now.as_secs(),
            Self::Forever => false,
        }
    }

    pub fn is_forever(&self) -> bool {
        matches!(self, Self::Forever)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(at) => write!(f, "{at}"),
            Self::Forever => write!(f, "forever"),
        }
    }
}
