//! Route update engine: the distance-vector relaxation rule.
//!
//! For an advertisement `(destination, latency)` arriving on `in_port` the
//! candidate cost is `latency + link(in_port)`. The decision, in order:
//!
//! 1. Unknown destination: install the candidate (discovery).
//! 2. Arrived on the current next hop: install it unconditionally, better or
//!    worse. The next hop is authoritative for the path in use; refusing a
//!    worse value would leave us advertising a path that no longer exists.
//! 3. Strictly cheaper than the current route: switch next hop.
//! 4. Otherwise ignore.
//!
//! Every install triggers a non-forced advertisement pass.

use dvr_types::{Environment, Expiry, HostId, Latency, PortId};

use crate::router::DvRouter;
use crate::table::RouteEntry;
use crate::RouterError;

/// How an advertisement changed the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// First route to this destination.
    Discovered,
    /// Update from the current next hop (refresh, improvement or degradation).
    Refreshed,
    /// A strictly cheaper path through a different neighbor.
    Switched,
    /// The existing route stays.
    Ignored,
}

impl RelaxOutcome {
    pub fn installed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

fn relax(current: Option<&RouteEntry>, candidate: Latency, in_port: PortId) -> RelaxOutcome {
    match current {
        None => RelaxOutcome::Discovered,
        Some(entry) if entry.next_hop == in_port => RelaxOutcome::Refreshed,
        Some(entry) if candidate < entry.latency => RelaxOutcome::Switched,
        Some(_) => RelaxOutcome::Ignored,
    }
}

impl<E: Environment> DvRouter<E> {
    /// Handle a route advertisement from the neighbor on `in_port`.
    ///
    /// An advertisement on a port that is not up means the link model and
    /// the routing state disagree; it is returned as
    /// [`RouterError::UnknownPort`] without touching the table.
    pub fn on_advertisement(
        &mut self,
        destination: HostId,
        latency: Latency,
        in_port: PortId,
    ) -> Result<RelaxOutcome, RouterError> {
        let link = self.ports.latency_of(in_port).inspect_err(|_| {
            tracing::warn!(destination = %destination, port = %in_port, "advertisement on a port that is not up");
        })?;
        self.metrics.advertisements_received.inc();

        let candidate = latency + link;
        let outcome = relax(self.table.get(&destination), candidate, in_port);
        if !outcome.installed() {
            tracing::trace!(destination = %destination, port = %in_port, candidate = %candidate, "advertisement ignored");
            return Ok(outcome);
        }

        let expires = Expiry::after(self.now(), self.config.route_ttl);
        tracing::debug!(
            destination = %destination,
            port = %in_port,
            latency = %candidate,
            outcome = ?outcome,
            "route installed"
        );
        self.table
            .insert(RouteEntry::new(destination, in_port, candidate, expires));
        self.metrics.routes_installed.inc();
        self.sync_route_gauge();

        self.send_routes(false, None)?;
        Ok(outcome)
    }
}
