//! Prometheus metrics for a router.
//!
//! Each [`RouterMetrics`] owns a dedicated [`Registry`] so several routers
//! can live in one simulated process without colliding on metric names.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, IntCounter,
    IntGauge, Opts, Registry, TextEncoder,
};

use crate::RouterError;

/// Counters and gauges covering route churn and forwarding.
#[derive(Debug)]
pub struct RouterMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Advertisements emitted to neighbors (triggered and periodic).
    pub advertisements_sent: IntCounter,
    /// Advertisements received from neighbors.
    pub advertisements_received: IntCounter,
    /// Relaxations that installed a new or updated route.
    pub routes_installed: IntCounter,
    /// Routes poisoned or removed by the expiration sweep.
    pub routes_expired: IntCounter,
    /// Data packets handed to a next-hop port.
    pub packets_forwarded: IntCounter,
    /// Data packets dropped for lack of a reachable route.
    pub packets_dropped: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Current number of entries in the route table.
    pub route_count: IntGauge,
}

impl RouterMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let advertisements_sent = register_int_counter_with_registry!(
            Opts::new(
                "dvr_advertisements_sent_total",
                "Route advertisements sent to neighbors"
            ),
            registry
        )
        .expect("failed to register advertisements_sent counter");

        let advertisements_received = register_int_counter_with_registry!(
            Opts::new(
                "dvr_advertisements_received_total",
                "Route advertisements received from neighbors"
            ),
            registry
        )
        .expect("failed to register advertisements_received counter");

        let routes_installed = register_int_counter_with_registry!(
            Opts::new(
                "dvr_routes_installed_total",
                "Routes installed or updated by relaxation"
            ),
            registry
        )
        .expect("failed to register routes_installed counter");

        let routes_expired = register_int_counter_with_registry!(
            Opts::new(
                "dvr_routes_expired_total",
                "Routes poisoned or removed after their TTL lapsed"
            ),
            registry
        )
        .expect("failed to register routes_expired counter");

        let packets_forwarded = register_int_counter_with_registry!(
            Opts::new("dvr_packets_forwarded_total", "Data packets forwarded"),
            registry
        )
        .expect("failed to register packets_forwarded counter");

        let packets_dropped = register_int_counter_with_registry!(
            Opts::new(
                "dvr_packets_dropped_total",
                "Data packets dropped with no reachable route"
            ),
            registry
        )
        .expect("failed to register packets_dropped counter");

        let route_count = register_int_gauge_with_registry!(
            Opts::new("dvr_route_count", "Current number of route table entries"),
            registry
        )
        .expect("failed to register route_count gauge");

        Self {
            registry,
            advertisements_sent,
            advertisements_received,
            routes_installed,
            routes_expired,
            packets_forwarded,
            packets_dropped,
            route_count,
        }
    }

    /// Render every metric in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, RouterError> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| RouterError::Metrics(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| RouterError::Metrics(e.to_string()))
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
