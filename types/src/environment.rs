//! The surface the router core calls into.
//!
//! The event loop, timers and physical links belong to whatever hosts the
//! router (a discrete-event simulator, a test harness). The core only needs
//! a clock and two ways to put bytes on a port.

use crate::{DataPacket, PortId, RouteAdvertisement, Timestamp};

/// Services supplied by the surrounding network environment.
pub trait Environment {
    /// Current time on a monotonic clock.
    fn current_time(&self) -> Timestamp;

    /// Hand a data packet to `port` for delivery.
    fn send(&mut self, packet: DataPacket, port: PortId);

    /// Emit one routing-protocol message to the neighbor on `port`.
    fn send_route_advertisement(&mut self, port: PortId, advertisement: RouteAdvertisement);
}
