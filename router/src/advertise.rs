//! Advertisement scheduler.
//!
//! A pass walks every (target port, destination) pair and decides what, if
//! anything, to tell the neighbor on that port:
//!
//! - Withdrawn routes (latency past the route TTL, or unreachable) go out as
//!   INFINITY. This check runs before split horizon so the first poison is
//!   never swallowed.
//! - Split horizon: nothing goes back out the next-hop port.
//! - Poison reverse: INFINITY goes back out the next-hop port.
//! - Everything else advertises the real latency.
//!
//! A non-forced (triggered) pass skips pairs whose value already went out on
//! the previous pass, according to the [`AdvertisementHistory`]. A forced
//! (periodic) pass sends everything. After either kind of pass the history
//! is re-snapshotted from the table.
//!
//! [`AdvertisementHistory`]: crate::history::AdvertisementHistory

use dvr_types::{Environment, PortId, RouteAdvertisement};

use crate::config::AdvertisementSuppressionPolicy;
use crate::router::DvRouter;
use crate::table::RouteEntry;
use crate::RouterError;

impl<E: Environment> DvRouter<E> {
    /// Advertise routes to every live port, or only to `single_port`.
    ///
    /// Returns the number of advertisements emitted.
    pub fn send_routes(
        &mut self,
        force: bool,
        single_port: Option<PortId>,
    ) -> Result<usize, RouterError> {
        let targets = match single_port {
            Some(port) if !self.ports.contains(port) => {
                return Err(RouterError::UnknownPort(port));
            }
            Some(port) => vec![port],
            None => self.ports.ports(),
        };

        let plan = self.plan_advertisements(force, &targets);
        let sent = plan.len();
        for (port, advertisement) in plan {
            tracing::trace!(
                port = %port,
                destination = %advertisement.destination,
                latency = %advertisement.latency,
                "advertising route"
            );
            self.env.send_route_advertisement(port, advertisement);
        }
        self.metrics.advertisements_sent.inc_by(sent as u64);
        self.history.snapshot(&self.table);

        if sent > 0 {
            tracing::debug!(force, ports = targets.len(), sent, "advertisement pass");
        }
        Ok(sent)
    }

    /// Decide what a pass over `targets` would send, without sending it.
    pub fn plan_advertisements(
        &self,
        force: bool,
        targets: &[PortId],
    ) -> Vec<(PortId, RouteAdvertisement)> {
        let mut plan = Vec::new();
        for &port in targets {
            for entry in self.table.iter() {
                if let Some(advertisement) = self.advertisement_for(entry, port, force) {
                    plan.push((port, advertisement));
                }
            }
        }
        plan
    }

    /// Whether `entry` counts as withdrawn for advertisement purposes.
    fn is_withdrawn(&self, entry: &RouteEntry) -> bool {
        entry.latency.exceeds(self.config.route_ttl) || !entry.latency.is_reachable()
    }

    fn advertisement_for(
        &self,
        entry: &RouteEntry,
        port: PortId,
        force: bool,
    ) -> Option<RouteAdvertisement> {
        let destination = &entry.destination;
        let changed = force || self.history.latency_changed(destination, entry.latency);

        if self.is_withdrawn(entry) {
            return changed.then(|| RouteAdvertisement::poison(destination.clone()));
        }

        if entry.next_hop == port {
            match self.config.suppression {
                AdvertisementSuppressionPolicy::SplitHorizon => return None,
                AdvertisementSuppressionPolicy::PoisonReverse => {
                    let send = force || !self.history.next_hop_was(destination, port);
                    return send.then(|| RouteAdvertisement::poison(destination.clone()));
                }
                AdvertisementSuppressionPolicy::None => {}
            }
        }

        changed.then(|| RouteAdvertisement::new(destination.clone(), entry.latency))
    }
}
