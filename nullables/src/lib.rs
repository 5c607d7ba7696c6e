//! Nullable infrastructure for deterministic testing.
//!
//! The router core only touches the outside world through
//! [`dvr_types::Environment`]. This crate provides test-friendly pieces that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record every outbound message instead of delivering it
//!
//! Usage: hand a [`NullEnvironment`] to the router in tests.

pub mod clock;
pub mod environment;
pub mod network;

pub use clock::NullClock;
pub use environment::NullEnvironment;
pub use network::{NullNetwork, SentAdvertisement, SentPacket};
