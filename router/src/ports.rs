//! Port registry — which local links are up and what they cost.

use std::collections::BTreeMap;

use dvr_types::{Latency, PortId};

use crate::RouterError;

/// Registry of live ports and their link latencies.
///
/// Populated by link-up events, pruned by link-down events. Anything that
/// references a port not present here has drifted from the link model.
#[derive(Debug, Default)]
pub struct PortRegistry {
    links: BTreeMap<PortId, f64>,
}

impl PortRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or refresh a port's link latency.
    pub fn add_port(&mut self, port: PortId, latency: f64) -> Result<(), RouterError> {
        if !latency.is_finite() || latency < 0.0 {
            return Err(RouterError::InvalidLinkLatency { port, latency });
        }
        self.links.insert(port, latency);
        Ok(())
    }

    /// Remove a port, returning its latency if it was up.
    pub fn remove_port(&mut self, port: PortId) -> Option<f64> {
        self.links.remove(&port)
    }

    /// Link latency of `port`.
    pub fn latency_of(&self, port: PortId) -> Result<Latency, RouterError> {
        self.links
            .get(&port)
            .map(|&raw| Latency::new(raw))
            .ok_or(RouterError::UnknownPort(port))
    }

    pub fn contains(&self, port: PortId) -> bool {
        self.links.contains_key(&port)
    }

    /// All ports currently up, in ascending order.
    pub fn ports(&self) -> Vec<PortId> {
        self.links.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
