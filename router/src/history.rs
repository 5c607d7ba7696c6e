//! Advertisement history — what each destination looked like the last time
//! we advertised it.
//!
//! A cache, not routing state: it only decides whether a non-forced pass can
//! skip a (destination, port) pair. Clearing it makes the next pass send
//! everything.

use std::collections::BTreeMap;

use dvr_types::{HostId, Latency, PortId};

use crate::table::RouteTable;

/// Snapshot of a route as of the last advertisement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentRoute {
    pub latency: Latency,
    pub next_hop: PortId,
}

#[derive(Debug, Default)]
pub struct AdvertisementHistory {
    sent: BTreeMap<HostId, SentRoute>,
}

impl AdvertisementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pass must re-announce `latency` for `destination`: never
    /// announced, or announced with a different value.
    pub fn latency_changed(&self, destination: &HostId, latency: Latency) -> bool {
        self.sent
            .get(destination)
            .map_or(true, |last| last.latency != latency)
    }

    /// Whether the last pass already treated `port` as the next hop for
    /// `destination`, meaning a reverse poison on it has gone out.
    pub fn next_hop_was(&self, destination: &HostId, port: PortId) -> bool {
        self.sent
            .get(destination)
            .is_some_and(|last| last.next_hop == port)
    }

    /// Replace the whole history with the table's current state.
    pub fn snapshot(&mut self, table: &RouteTable) {
        self.sent = table
            .iter()
            .map(|entry| {
                (
                    entry.destination.clone(),
                    SentRoute {
                        latency: entry.latency,
                        next_hop: entry.next_hop,
                    },
                )
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
