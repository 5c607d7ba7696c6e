//! The router: owns the port registry, route table and advertisement
//! history, and dispatches environment events to the handlers in
//! [`update`](crate::update), [`advertise`](crate::advertise) and
//! [`expire`](crate::expire).
//!
//! Every handler takes `&mut self`, so events are applied strictly one at a
//! time and each runs to completion before the next.

use dvr_types::{DataPacket, Environment, HostId, PortId, Timestamp};

use crate::config::RouterConfig;
use crate::event::RouterEvent;
use crate::history::AdvertisementHistory;
use crate::metrics::RouterMetrics;
use crate::ports::PortRegistry;
use crate::table::{RouteEntry, RouteTable};
use crate::RouterError;

/// What happened to a data packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Forwarded(PortId),
    /// No route, or the route is poisoned.
    Dropped,
}

/// Distance-vector router for a single node.
#[derive(Debug)]
pub struct DvRouter<E: Environment> {
    pub(crate) config: RouterConfig,
    pub(crate) env: E,
    pub(crate) ports: PortRegistry,
    pub(crate) table: RouteTable,
    pub(crate) history: AdvertisementHistory,
    pub(crate) metrics: RouterMetrics,
}

impl<E: Environment> DvRouter<E> {
    /// Create a router. Fails if `config` is not runnable.
    pub fn new(config: RouterConfig, env: E) -> Result<Self, RouterError> {
        config.validate()?;
        tracing::debug!(
            route_ttl = config.route_ttl,
            suppression = ?config.suppression,
            poison_expired = config.poison_expired,
            send_on_link_up = config.send_on_link_up,
            poison_on_link_down = config.poison_on_link_down,
            "router configured"
        );
        Ok(Self {
            config,
            env,
            ports: PortRegistry::new(),
            table: RouteTable::new(),
            history: AdvertisementHistory::new(),
            metrics: RouterMetrics::new(),
        })
    }

    // -- Accessors -------------------------------------------------------------

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Drop the advertisement history so the next pass re-sends everything.
    pub fn forget_history(&mut self) {
        self.history.clear();
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.env.current_time()
    }

    pub(crate) fn sync_route_gauge(&self) {
        self.metrics.route_count.set(self.table.len() as i64);
    }

    // -- Dispatch --------------------------------------------------------------

    /// Apply one environment event.
    pub fn handle_event(&mut self, event: RouterEvent) -> Result<(), RouterError> {
        tracing::trace!(event = event.kind(), "handling event");
        match event {
            RouterEvent::StaticHostAttached { host, port } => {
                self.on_static_host_attached(host, port)
            }
            RouterEvent::AdvertisementReceived {
                destination,
                latency,
                port,
            } => self.on_advertisement(destination, latency, port).map(|_| ()),
            RouterEvent::DataPacketArrived { packet, port } => {
                self.on_data_packet(packet, port);
                Ok(())
            }
            RouterEvent::LinkUp { port, latency } => self.on_link_up(port, latency),
            RouterEvent::LinkDown { port } => self.on_link_down(port),
            RouterEvent::TimerTick => self.on_timer_tick(),
        }
    }

    // -- Static hosts and data -------------------------------------------------

    /// Install a permanent route to a host attached directly to `port`.
    ///
    /// The link must already be up.
    pub fn on_static_host_attached(&mut self, host: HostId, port: PortId) -> Result<(), RouterError> {
        if !self.ports.contains(port) {
            tracing::warn!(host = %host, port = %port, "static host attached to a port that is not up");
            return Err(RouterError::UnknownPort(port));
        }
        tracing::info!(host = %host, port = %port, "static host attached");
        self.table.insert(RouteEntry::static_host(host, port));
        self.sync_route_gauge();
        Ok(())
    }

    /// Forward a data packet along its route, or drop it silently.
    pub fn on_data_packet(&mut self, packet: DataPacket, in_port: PortId) -> ForwardOutcome {
        let next_hop = self
            .table
            .get(&packet.destination)
            .filter(|entry| entry.latency.is_reachable())
            .map(|entry| entry.next_hop);

        match next_hop {
            Some(port) => {
                tracing::trace!(destination = %packet.destination, in_port = %in_port, out_port = %port, "forwarding packet");
                self.env.send(packet, port);
                self.metrics.packets_forwarded.inc();
                ForwardOutcome::Forwarded(port)
            }
            None => {
                tracing::debug!(destination = %packet.destination, in_port = %in_port, "no route, dropping packet");
                self.metrics.packets_dropped.inc();
                ForwardOutcome::Dropped
            }
        }
    }

    // -- Links -----------------------------------------------------------------

    /// Register a new link. With `send_on_link_up`, greet the neighbor on
    /// that port (and only that port) with our current routes.
    pub fn on_link_up(&mut self, port: PortId, latency: f64) -> Result<(), RouterError> {
        self.ports.add_port(port, latency)?;
        tracing::info!(port = %port, latency, "link up");
        if self.config.send_on_link_up {
            self.send_routes(false, Some(port))?;
        }
        Ok(())
    }

    /// Deregister a link and deal with every route that used it.
    ///
    /// With `poison_on_link_down` those routes become INFINITY for one more
    /// TTL and a triggered pass announces it; otherwise they are deleted and
    /// neighbors time them out on their own.
    pub fn on_link_down(&mut self, port: PortId) -> Result<(), RouterError> {
        if self.ports.remove_port(port).is_none() {
            tracing::debug!(port = %port, "link down for a port that was not up");
        } else {
            tracing::info!(port = %port, "link down");
        }

        let affected = self.table.routes_via(port);
        if affected.is_empty() {
            return Ok(());
        }

        if self.config.poison_on_link_down {
            let now = self.now();
            for destination in &affected {
                if let Some(poisoned) = self
                    .table
                    .get(destination)
                    .map(|entry| entry.poisoned(now, self.config.route_ttl))
                {
                    tracing::debug!(destination = %destination, port = %port, "poisoning route after link down");
                    self.table.insert(poisoned);
                }
            }
            self.send_routes(false, None)?;
        } else {
            for destination in &affected {
                tracing::debug!(destination = %destination, port = %port, "removing route after link down");
                self.table.remove(destination);
            }
            self.sync_route_gauge();
        }
        Ok(())
    }

    // -- Timer -----------------------------------------------------------------

    /// Periodic work: sweep stale routes, then advertise the whole table.
    pub fn on_timer_tick(&mut self) -> Result<(), RouterError> {
        let report = self.expire_routes();
        if !report.is_empty() {
            tracing::debug!(
                poisoned = report.poisoned.len(),
                removed = report.removed.len(),
                "expired routes"
            );
        }
        self.send_routes(true, None)?;
        Ok(())
    }
}
