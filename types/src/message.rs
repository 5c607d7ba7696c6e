//! Messages exchanged with neighbors.
//!
//! The routing protocol has a single message: one destination and the
//! sender's believed cost to reach it. The port it travels on is supplied
//! by the environment alongside the message.

use serde::{Deserialize, Serialize};

use crate::{HostId, Latency};

/// One route advertisement: "I can reach `destination` at `latency`".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteAdvertisement {
    pub destination: HostId,
    pub latency: Latency,
}

impl RouteAdvertisement {
    pub fn new(destination: HostId, latency: Latency) -> Self {
        Self {
            destination,
            latency,
        }
    }

    /// An advertisement withdrawing `destination`.
    pub fn poison(destination: HostId) -> Self {
        Self::new(destination, Latency::INFINITY)
    }

    pub fn is_poison(&self) -> bool {
        !self.latency.is_reachable()
    }
}

/// A data packet routed hop by hop toward `destination`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPacket {
    pub source: HostId,
    pub destination: HostId,
    #[serde(default)]
    pub payload: Vec<u8>,
}

impl DataPacket {
    pub fn new(source: HostId, destination: HostId) -> Self {
        Self {
            source,
            destination,
            payload: Vec::new(),
        }
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }
}
