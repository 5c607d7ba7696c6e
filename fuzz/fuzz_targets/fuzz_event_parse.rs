#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed event scripts must be rejected, never panic.
    let _ = serde_json::from_slice::<dvr_router::RouterEvent>(data);
    let _ = serde_json::from_slice::<dvr_types::RouteAdvertisement>(data);
    let _ = serde_json::from_slice::<dvr_types::DataPacket>(data);
});
