//! Scenario tests driving a single router through the public handlers and
//! checking both the route table and what went out on the wire.

use dvr_nullables::NullEnvironment;
use dvr_router::{
    AdvertisementSuppressionPolicy, DvRouter, ForwardOutcome, RelaxOutcome, RouterConfig,
    RouterError, RouterEvent,
};
use dvr_types::{DataPacket, HostId, Latency, PortId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn port(n: u32) -> PortId {
    PortId::new(n)
}

fn host(name: &str) -> HostId {
    HostId::new(name)
}

fn router_with(config: RouterConfig) -> DvRouter<NullEnvironment> {
    DvRouter::new(config, NullEnvironment::new()).expect("valid config")
}

/// R with host H statically on port 1, and neighbors on port 3 (latency 1.0)
/// and port 4 (latency 0.5).
fn standard_router(config: RouterConfig) -> DvRouter<NullEnvironment> {
    let mut r = router_with(config);
    r.on_link_up(port(1), 0.1).unwrap();
    r.on_link_up(port(3), 1.0).unwrap();
    r.on_link_up(port(4), 0.5).unwrap();
    r.on_static_host_attached(host("H"), port(1)).unwrap();
    r
}

// ---------------------------------------------------------------------------
// Relaxation
// ---------------------------------------------------------------------------

#[test]
fn discovery_refresh_and_switch() {
    let mut r = standard_router(RouterConfig::default());
    let z = host("Z");

    let h = r.table().get(&host("H")).unwrap();
    assert_eq!(h.latency, Latency::new(0.1));
    assert!(h.is_static());

    let outcome = r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();
    assert_eq!(outcome, RelaxOutcome::Discovered);
    let entry = r.table().get(&z).unwrap();
    assert_eq!((entry.next_hop, entry.latency), (port(3), Latency::new(3.0)));

    // Same next hop, worse value: still accepted.
    let outcome = r.on_advertisement(z.clone(), Latency::new(5.0), port(3)).unwrap();
    assert_eq!(outcome, RelaxOutcome::Refreshed);
    let entry = r.table().get(&z).unwrap();
    assert_eq!((entry.next_hop, entry.latency), (port(3), Latency::new(6.0)));

    // Cheaper path via another neighbor.
    let outcome = r.on_advertisement(z.clone(), Latency::new(1.0), port(4)).unwrap();
    assert_eq!(outcome, RelaxOutcome::Switched);
    let entry = r.table().get(&z).unwrap();
    assert_eq!((entry.next_hop, entry.latency), (port(4), Latency::new(1.5)));

    // Worse alternate is ignored.
    let outcome = r.on_advertisement(z.clone(), Latency::new(1.0), port(3)).unwrap();
    assert_eq!(outcome, RelaxOutcome::Ignored);
    assert_eq!(r.table().get(&z).unwrap().next_hop, port(4));
}

#[test]
fn every_install_triggers_an_advertisement() {
    let mut r = standard_router(RouterConfig::default());
    let z = host("Z");

    r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();
    let net = &r.env().network;
    // Split horizon: Z goes to ports 1 and 4, H goes to 3 and 4.
    assert_eq!(net.last_advertised(port(1), &z), Some(Latency::new(3.0)));
    assert_eq!(net.last_advertised(port(4), &z), Some(Latency::new(3.0)));
    assert_eq!(net.last_advertised(port(3), &z), None);
    assert_eq!(net.last_advertised(port(3), &host("H")), Some(Latency::new(0.1)));

    r.env_mut().network.reset();
    r.on_advertisement(z.clone(), Latency::new(1.0), port(3)).unwrap();
    // Only the changed route goes out.
    let net = &r.env().network;
    assert_eq!(net.advertisements().len(), 2);
    assert!(net.advertisements().iter().all(|sent| sent.destination() == &z));

    r.env_mut().network.reset();
    r.on_advertisement(z.clone(), Latency::new(9.0), port(4)).unwrap();
    assert!(r.env().network.advertisements().is_empty());
}

#[test]
fn advertisement_on_down_port_propagates_error() {
    let mut r = standard_router(RouterConfig::default());
    let err = r
        .on_advertisement(host("Z"), Latency::new(1.0), port(8))
        .unwrap_err();
    assert!(matches!(err, RouterError::UnknownPort(p) if p == port(8)));
    assert!(r.table().get(&host("Z")).is_none());
}

// ---------------------------------------------------------------------------
// Advertisement scheduling
// ---------------------------------------------------------------------------

#[test]
fn second_triggered_pass_is_silent() {
    let mut r = standard_router(RouterConfig::default());
    r.on_advertisement(host("Z"), Latency::new(2.0), port(3)).unwrap();
    r.on_advertisement(host("Y"), Latency::new(4.0), port(4)).unwrap();
    r.send_routes(false, None).unwrap();
    assert_eq!(r.send_routes(false, None).unwrap(), 0);
}

#[test]
fn timer_tick_sends_full_table() {
    let mut r = standard_router(RouterConfig::default());
    r.on_advertisement(host("Z"), Latency::new(2.0), port(3)).unwrap();
    r.env_mut().network.reset();

    r.handle_event(RouterEvent::TimerTick).unwrap();
    // 3 ports x 2 routes, minus one split-horizon skip per route.
    assert_eq!(r.env().network.advertisements().len(), 4);
}

#[test]
fn poison_reverse_scenario() {
    let config =
        RouterConfig::default().with_suppression(AdvertisementSuppressionPolicy::PoisonReverse);
    let mut r = standard_router(config);
    let z = host("Z");
    r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();
    r.env_mut().network.reset();

    r.on_timer_tick().unwrap();
    let net = &r.env().network;
    assert_eq!(net.last_advertised(port(3), &z), Some(Latency::INFINITY));
    assert_eq!(net.last_advertised(port(1), &host("H")), Some(Latency::INFINITY));
    assert_eq!(net.last_advertised(port(4), &z), Some(Latency::new(3.0)));
    assert_eq!(net.advertisements().len(), 6);
}

#[test]
fn send_on_link_up_greets_only_the_new_port() {
    let mut r = standard_router(RouterConfig::default().with_send_on_link_up(true));
    r.env_mut().network.reset();

    r.on_link_up(port(5), 2.0).unwrap();
    let net = &r.env().network;
    assert_eq!(net.advertisements().len(), 1);
    assert_eq!(net.advertisements()[0].port, port(5));
    assert_eq!(net.last_advertised(port(5), &host("H")), Some(Latency::new(0.1)));
}

#[test]
fn link_up_without_greeting_sends_nothing() {
    let mut r = standard_router(RouterConfig::default());
    r.env_mut().network.reset();
    r.on_link_up(port(5), 2.0).unwrap();
    assert!(r.env().network.advertisements().is_empty());
}

// ---------------------------------------------------------------------------
// Link down
// ---------------------------------------------------------------------------

#[test]
fn link_down_without_poison_deletes_silently() {
    let mut r = standard_router(RouterConfig::default());
    r.on_advertisement(host("Z"), Latency::new(2.0), port(3)).unwrap();
    r.on_advertisement(host("Y"), Latency::new(2.0), port(4)).unwrap();
    r.env_mut().network.reset();

    r.on_link_down(port(3)).unwrap();
    assert!(r.table().get(&host("Z")).is_none());
    assert!(r.table().get(&host("Y")).is_some());
    assert!(!r.ports().contains(port(3)));
    assert!(r.env().network.advertisements().is_empty());
}

#[test]
fn link_down_with_poison_announces_infinity() {
    let mut r = standard_router(RouterConfig::default().with_poison_on_link_down(true));
    let z = host("Z");
    r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();
    r.env_mut().network.reset();

    r.on_link_down(port(3)).unwrap();
    let entry = r.table().get(&z).unwrap();
    assert_eq!(entry.latency, Latency::INFINITY);

    let net = &r.env().network;
    assert_eq!(net.last_advertised(port(1), &z), Some(Latency::INFINITY));
    assert_eq!(net.last_advertised(port(4), &z), Some(Latency::INFINITY));
    assert!(net.advertisements_on(port(3)).is_empty());

    // Poisoned routes do not forward.
    let pkt = DataPacket::new(host("H"), z.clone());
    assert_eq!(r.on_data_packet(pkt, port(1)), ForwardOutcome::Dropped);
}

#[test]
fn link_down_of_host_port_removes_static_route() {
    let mut r = standard_router(RouterConfig::default());
    r.on_link_down(port(1)).unwrap();
    assert!(r.table().get(&host("H")).is_none());
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[test]
fn expire_twice_without_time_advance_is_stable() {
    let mut r = standard_router(RouterConfig::default().with_poison_expired(true));
    r.on_advertisement(host("Z"), Latency::new(2.0), port(3)).unwrap();
    r.on_advertisement(host("Y"), Latency::new(2.0), port(4)).unwrap();
    r.env().clock.advance(20.0);

    r.expire_routes();
    let first: Vec<_> = r.table().iter().cloned().collect();
    let second_report = r.expire_routes();
    let second: Vec<_> = r.table().iter().cloned().collect();
    assert!(second_report.is_empty());
    assert_eq!(first, second);
}

#[test]
fn poison_then_withdraw() {
    let mut r = standard_router(RouterConfig::default().with_poison_expired(true));
    let z = host("Z");
    r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();

    r.env().clock.advance(15.0);
    r.env_mut().network.reset();
    let report = r.expire_routes();
    assert_eq!(report.poisoned, vec![z.clone()]);

    // One triggered pass carries the poison on every port, including the
    // old next hop; a second pass has nothing new to say.
    r.send_routes(false, None).unwrap();
    for p in [1, 3, 4] {
        assert_eq!(r.env().network.last_advertised(port(p), &z), Some(Latency::INFINITY));
    }
    let poisons = r.env().network.advertisements().len();
    assert_eq!(poisons, 3);
    assert_eq!(r.send_routes(false, None).unwrap(), 0);
    assert!(r.table().get(&z).is_some());

    r.env().clock.advance(15.0);
    let report = r.expire_routes();
    assert_eq!(report.removed, vec![z.clone()]);
    assert!(r.table().get(&z).is_none());
}

#[test]
fn negative_wire_latency_never_undercuts_the_link() {
    let mut r = standard_router(RouterConfig::default());
    let z = host("Z");

    let advertised: Latency = serde_json::from_str("-5.0").unwrap();
    r.on_advertisement(z.clone(), advertised, port(3)).unwrap();

    let entry = r.table().get(&z).unwrap();
    assert_eq!(entry.latency, Latency::new(1.0));
    assert!(entry.latency.value() >= 0.0);
    assert_eq!(
        r.env().network.last_advertised(port(4), &z),
        Some(Latency::new(1.0))
    );

    r.on_advertisement(host("Y"), Latency::new(f64::NEG_INFINITY), port(4))
        .unwrap();
    assert_eq!(r.table().get(&host("Y")).unwrap().latency, Latency::new(0.5));
}

#[test]
fn static_routes_survive_ticks() {
    let mut r = standard_router(RouterConfig::default().with_poison_expired(true));
    for _ in 0..10 {
        r.env().clock.advance(10.0);
        r.on_timer_tick().unwrap();
    }
    let h = r.table().get(&host("H")).unwrap();
    assert_eq!(h.latency, Latency::new(0.1));
}

// ---------------------------------------------------------------------------
// Data plane and metrics
// ---------------------------------------------------------------------------

#[test]
fn packets_follow_the_switched_route() {
    let mut r = standard_router(RouterConfig::default());
    let z = host("Z");
    r.on_advertisement(z.clone(), Latency::new(2.0), port(3)).unwrap();
    let pkt = DataPacket::new(host("H"), z.clone()).with_payload(b"ping".to_vec());
    assert_eq!(r.on_data_packet(pkt.clone(), port(1)), ForwardOutcome::Forwarded(port(3)));

    r.on_advertisement(z.clone(), Latency::new(0.5), port(4)).unwrap();
    r.handle_event(RouterEvent::DataPacketArrived {
        packet: pkt,
        port: port(1),
    })
    .unwrap();
    let packets = r.env().network.packets();
    assert_eq!(packets.len(), 2);
    assert_eq!(packets[1].port, port(4));
    assert_eq!(packets[1].packet.payload, b"ping".to_vec());
}

#[test]
fn metrics_track_activity() {
    let mut r = standard_router(RouterConfig::default());
    r.on_advertisement(host("Z"), Latency::new(2.0), port(3)).unwrap();
    r.on_data_packet(DataPacket::new(host("H"), host("nowhere")), port(1));

    let m = r.metrics();
    assert_eq!(m.advertisements_received.get(), 1);
    assert_eq!(m.routes_installed.get(), 1);
    assert_eq!(m.route_count.get(), 2);
    assert_eq!(m.packets_dropped.get(), 1);
    assert!(m.advertisements_sent.get() > 0);
    assert!(m.encode().unwrap().contains("dvr_routes_installed_total 1"));
}
