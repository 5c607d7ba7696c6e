//! Nullable environment — a [`NullClock`] and a [`NullNetwork`] behind the
//! router-facing [`Environment`] trait.

use dvr_types::{DataPacket, Environment, PortId, RouteAdvertisement, Timestamp};

use crate::{NullClock, NullNetwork};

/// Deterministic [`Environment`] for tests.
#[derive(Default)]
pub struct NullEnvironment {
    pub clock: NullClock,
    pub network: NullNetwork,
}

impl NullEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `secs` instead of zero.
    pub fn at(secs: f64) -> Self {
        Self {
            clock: NullClock::new(secs),
            network: NullNetwork::new(),
        }
    }
}

impl Environment for NullEnvironment {
    fn current_time(&self) -> Timestamp {
        self.clock.now()
    }

    fn send(&mut self, packet: DataPacket, port: PortId) {
        self.network.send_packet(port, packet);
    }

    fn send_route_advertisement(&mut self, port: PortId, advertisement: RouteAdvertisement) {
        self.network.send_advertisement(port, advertisement);
    }
}
