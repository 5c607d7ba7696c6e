//! Route table — one best-known route per destination.
//!
//! A pure keyed store. The relaxation rule, expiry policy and advertisement
//! policy all live with the router; this module only guarantees there is
//! never more than one entry per destination.

use std::collections::BTreeMap;

use dvr_types::{Expiry, HostId, Latency, PortId, Timestamp};

/// The route currently used to reach `destination`.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteEntry {
    pub destination: HostId,
    /// Local port traffic for `destination` leaves through.
    pub next_hop: PortId,
    /// Cumulative path cost, or [`Latency::INFINITY`] when poisoned.
    pub latency: Latency,
    pub expires: Expiry,
}

impl RouteEntry {
    pub fn new(destination: HostId, next_hop: PortId, latency: Latency, expires: Expiry) -> Self {
        Self {
            destination,
            next_hop,
            latency,
            expires,
        }
    }

    /// Route to a host attached directly to `port`. Never expires.
    pub fn static_host(host: HostId, port: PortId) -> Self {
        Self::new(host, port, Latency::LOCAL_ATTACHMENT, Expiry::FOREVER)
    }

    /// This route marked unreachable, kept around until `now + ttl_secs`
    /// so neighbors hear the withdrawal.
    pub fn poisoned(&self, now: Timestamp, ttl_secs: f64) -> Self {
        Self::new(
            self.destination.clone(),
            self.next_hop,
            Latency::INFINITY,
            Expiry::after(now, ttl_secs),
        )
    }

    pub fn is_static(&self) -> bool {
        self.expires.is_forever()
    }
}

/// Per-destination store of [`RouteEntry`] values.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: BTreeMap<HostId, RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, destination: &HostId) -> Option<&RouteEntry> {
        self.entries.get(destination)
    }

    /// Insert `entry`, replacing whatever route its destination had.
    pub fn insert(&mut self, entry: RouteEntry) -> Option<RouteEntry> {
        self.entries.insert(entry.destination.clone(), entry)
    }

    pub fn remove(&mut self, destination: &HostId) -> Option<RouteEntry> {
        self.entries.remove(destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }

    /// Destinations whose traffic currently leaves through `port`.
    pub fn routes_via(&self, port: PortId) -> Vec<HostId> {
        self.entries
            .values()
            .filter(|entry| entry.next_hop == port)
            .map(|entry| entry.destination.clone())
            .collect()
    }

    /// Destinations whose expiry has passed at `now`.
    pub fn expired_at(&self, now: Timestamp) -> Vec<HostId> {
        self.entries
            .values()
            .filter(|entry| entry.expires.is_expired(now))
            .map(|entry| entry.destination.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
