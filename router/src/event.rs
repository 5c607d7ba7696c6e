//! Events the environment delivers to a router.

use dvr_types::{DataPacket, HostId, Latency, PortId};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a router, processed one at a time by
/// [`DvRouter::handle_event`](crate::DvRouter::handle_event).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    /// A host was plugged directly into `port`.
    StaticHostAttached { host: HostId, port: PortId },
    /// A neighbor on `port` can reach `destination` at `latency`.
    AdvertisementReceived {
        destination: HostId,
        latency: Latency,
        port: PortId,
    },
    /// A data packet arrived on `port`.
    DataPacketArrived { packet: DataPacket, port: PortId },
    LinkUp { port: PortId, latency: f64 },
    LinkDown { port: PortId },
    /// Periodic timer: sweep expired routes, then advertise everything.
    TimerTick,
}

impl RouterEvent {
    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StaticHostAttached { .. } => "static_host_attached",
            Self::AdvertisementReceived { .. } => "advertisement_received",
            Self::DataPacketArrived { .. } => "data_packet_arrived",
            Self::LinkUp { .. } => "link_up",
            Self::LinkDown { .. } => "link_down",
            Self::TimerTick => "timer_tick",
        }
    }
}
