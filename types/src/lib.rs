//! Fundamental types for the distance-vector router.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! port and host identifiers, path latencies, simulation time, the wire messages
//! exchanged with neighbors, and the [`Environment`] the router core calls into.

pub mod address;
pub mod environment;
pub mod latency;
pub mod message;
pub mod time;

pub use address::{HostId, PortId};
pub use environment::Environment;
pub use latency::Latency;
pub use message::{DataPacket, RouteAdvertisement};
pub use time::{Expiry, Timestamp};
