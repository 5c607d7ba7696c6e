#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dvr_nullables::NullEnvironment;
use dvr_router::{AdvertisementSuppressionPolicy, DvRouter, RouterConfig};
use dvr_types::{DataPacket, HostId, Latency, PortId};

#[derive(Arbitrary, Debug)]
enum Op {
    LinkUp { port: u8, latency: u8 },
    LinkDown { port: u8 },
    Attach { host: u8, port: u8 },
    Advertise { dst: u8, latency: u8, port: u8 },
    Packet { dst: u8, port: u8 },
    Wait { secs: u8 },
    Tick,
}

#[derive(Arbitrary, Debug)]
struct Input {
    policy: u8,
    poison_expired: bool,
    send_on_link_up: bool,
    poison_on_link_down: bool,
    ops: Vec<Op>,
}

fn port(p: u8) -> PortId {
    PortId::new(u32::from(p % 8))
}

fn host(h: u8) -> HostId {
    HostId::new(format!("h{}", h % 16))
}

fuzz_target!(|input: Input| {
    let suppression = match input.policy % 3 {
        0 => AdvertisementSuppressionPolicy::None,
        1 => AdvertisementSuppressionPolicy::SplitHorizon,
        _ => AdvertisementSuppressionPolicy::PoisonReverse,
    };
    let config = RouterConfig::default()
        .with_suppression(suppression)
        .with_poison_expired(input.poison_expired)
        .with_send_on_link_up(input.send_on_link_up)
        .with_poison_on_link_down(input.poison_on_link_down);
    let mut router = DvRouter::new(config, NullEnvironment::new()).unwrap();

    for op in input.ops {
        // Referential errors are expected for ports that are down.
        let _ = match op {
            Op::LinkUp { port: p, latency } => router.on_link_up(port(p), f64::from(latency) / 8.0),
            Op::LinkDown { port: p } => router.on_link_down(port(p)),
            Op::Attach { host: h, port: p } => router.on_static_host_attached(host(h), port(p)),
            Op::Advertise { dst, latency, port: p } => router
                .on_advertisement(host(dst), Latency::new(f64::from(latency) / 8.0), port(p))
                .map(|_| ()),
            Op::Packet { dst, port: p } => {
                router.on_data_packet(DataPacket::new(host(0), host(dst)), port(p));
                Ok(())
            }
            Op::Wait { secs } => {
                router.env().clock.advance(f64::from(secs % 32));
                Ok(())
            }
            Op::Tick => router.on_timer_tick(),
        };

        for entry in router.table().iter() {
            assert!(entry.latency.value() <= Latency::INFINITY.value());
        }
    }

    // With no changes in between, a triggered pass after a pass is silent.
    router.send_routes(false, None).unwrap();
    assert_eq!(router.send_routes(false, None).unwrap(), 0);
});
