//! Nullable network — record messages without sending them.

use dvr_types::{DataPacket, HostId, Latency, PortId, RouteAdvertisement};

/// A route advertisement captured by [`NullNetwork`].
#[derive(Clone, Debug, PartialEq)]
pub struct SentAdvertisement {
    pub port: PortId,
    pub advertisement: RouteAdvertisement,
}

impl SentAdvertisement {
    pub fn destination(&self) -> &HostId {
        &self.advertisement.destination
    }

    pub fn latency(&self) -> Latency {
        self.advertisement.latency
    }
}

/// A data packet captured by [`NullNetwork`].
#[derive(Clone, Debug, PartialEq)]
pub struct SentPacket {
    pub port: PortId,
    pub packet: DataPacket,
}

/// A test network that records outbound traffic instead of sending it.
#[derive(Default)]
pub struct NullNetwork {
    advertisements: Vec<SentAdvertisement>,
    packets: Vec<SentPacket>,
}

impl NullNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an advertisement as "sent".
    pub fn send_advertisement(&mut self, port: PortId, advertisement: RouteAdvertisement) {
        self.advertisements.push(SentAdvertisement {
            port,
            advertisement,
        });
    }

    /// Record a data packet as "sent".
    pub fn send_packet(&mut self, port: PortId, packet: DataPacket) {
        self.packets.push(SentPacket { port, packet });
    }

    /// All advertisements sent so far (for assertions).
    pub fn advertisements(&self) -> &[SentAdvertisement] {
        &self.advertisements
    }

    /// All data packets sent so far (for assertions).
    pub fn packets(&self) -> &[SentPacket] {
        &self.packets
    }

    /// Advertisements sent out of `port`.
    pub fn advertisements_on(&self, port: PortId) -> Vec<&SentAdvertisement> {
        self.advertisements
            .iter()
            .filter(|sent| sent.port == port)
            .collect()
    }

    /// The most recent advertisement for `destination` sent on `port`.
    pub fn last_advertised(&self, port: PortId, destination: &HostId) -> Option<Latency> {
        self.advertisements
            .iter()
            .rev()
            .find(|sent| sent.port == port && sent.destination() == destination)
            .map(SentAdvertisement::latency)
    }

    /// Remove and return everything recorded since the last drain.
    pub fn drain_advertisements(&mut self) -> Vec<SentAdvertisement> {
        std::mem::take(&mut self.advertisements)
    }

    /// Clear all state.
    pub fn reset(&mut self) {
        self.advertisements.clear();
        self.packets.clear();
    }
}
