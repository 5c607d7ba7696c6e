//! Expiration sweeper.
//!
//! Learned routes carry an absolute expiry. A sweep either deletes a lapsed
//! route (silent withdrawal; neighbors time it out themselves) or, with
//! `poison_expired`, keeps it as INFINITY for one more TTL so the next
//! advertisement pass tells neighbors. A route that lapses while already
//! poisoned is deleted. Static routes never lapse.

use dvr_types::{Environment, HostId};

use crate::router::DvRouter;

/// Destinations touched by one sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpireReport {
    pub poisoned: Vec<HostId>,
    pub removed: Vec<HostId>,
}

impl ExpireReport {
    pub fn is_empty(&self) -> bool {
        self.poisoned.is_empty() && self.removed.is_empty()
    }
}

impl<E: Environment> DvRouter<E> {
    /// Poison or remove every route whose expiry has passed.
    ///
    /// Sends nothing itself; the next advertisement pass reflects the result.
    pub fn expire_routes(&mut self) -> ExpireReport {
        let now = self.now();
        let mut report = ExpireReport::default();

        for destination in self.table.expired_at(now) {
            let poison = self.config.poison_expired
                && self
                    .table
                    .get(&destination)
                    .is_some_and(|entry| entry.latency.is_reachable());

            if poison {
                if let Some(poisoned) = self
                    .table
                    .get(&destination)
                    .map(|entry| entry.poisoned(now, self.config.route_ttl))
                {
                    tracing::debug!(destination = %destination, "route expired, poisoning");
                    self.table.insert(poisoned);
                    report.poisoned.push(destination);
                }
            } else {
                tracing::debug!(destination = %destination, "route expired, removing");
                self.table.remove(&destination);
                report.removed.push(destination);
            }
        }

        let touched = report.poisoned.len() + report.removed.len();
        self.metrics.routes_expired.inc_by(touched as u64);
        self.sync_route_gauge();
        report
    }
}
