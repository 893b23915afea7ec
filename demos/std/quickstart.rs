//! Quickstart: run one cluster test cycle, raise a popup and seal a checksum
//! frame on a bus that prints what it is given.
//!
//! `cargo run --example quickstart`
use core::convert::Infallible;

use can2010_bridge::{
    core::SimulatedVehicleState,
    protocol::{
        management::{
            bridge_supervisor::{BridgeState, SharedBridge},
            cluster_test::{ClusterTest, ClusterTestConfig},
        },
        messages::CHECKSUM_FRAME_ID,
        transport::{
            can_frame::CanFrame, traits::can_bus::CanBus, CYCLE_TICK_INTERVAL_MS,
            ENTERTAINMENT_CAN_BITRATE,
        },
    },
};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::Instant;

/// Prints every transmitted frame, never receives anything.
struct ConsoleBus;

impl CanBus for ConsoleBus {
    type Error = Infallible;

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        println!("TX {:03X} {:02X?}", frame.id, frame.payload());
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error> {
        Ok(None)
    }
}

fn main() {
    println!(
        "Cluster test on a {} kbit/s bus, one tick every {} ms",
        ENTERTAINMENT_CAN_BITRATE / 1_000,
        CYCLE_TICK_INTERVAL_MS
    );

    let config = ClusterTestConfig {
        enabled: true,
        vehicle: SimulatedVehicleState {
            speed: 90,
            rpm: 2_500,
            fuel: 60,
            odometer: 12_345,
            ..SimulatedVehicleState::new()
        },
        ..Default::default()
    };
    let cluster = match ClusterTest::new(config) {
        Ok(cluster) => cluster,
        Err(err) => {
            eprintln!("Invalid test configuration: {err}");
            return;
        }
    };
    let bridge: SharedBridge<NoopRawMutex> = SharedBridge::new(BridgeState::new(cluster));
    let mut bus = ConsoleBus;

    // One full cycle on a virtual clock.
    for tick in 1..=601u64 {
        bridge.poll_cluster(Instant::from_millis(tick * CYCLE_TICK_INTERVAL_MS), &mut bus);
    }

    // Shown once, the repeat is dropped, then closed.
    for present in [true, true, false] {
        let outcome = bridge.set_popup(&mut bus, present, 0x0A21, 4, 0x00);
        println!("Popup 0x0A21 present={present}: {outcome:?}");
    }

    let mut payload = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0x00];
    let checksum = bridge.seal(&mut payload);
    println!("Checksum {checksum:#04X}");
    match CanFrame::new(CHECKSUM_FRAME_ID, &payload) {
        Ok(frame) => {
            let _ = bus.transmit(&frame);
        }
        Err(err) => eprintln!("Frame rejected: {err}"),
    }
}
