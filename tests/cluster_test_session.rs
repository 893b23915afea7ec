//! Cluster test mode end to end: the runner drives the scheduler from a virtual
//! clock and the emitted traffic is checked on the cluster side of the bus.
mod helpers;

use can2010_bridge::{
    core::SimulatedVehicleState,
    protocol::{
        management::{
            bridge_supervisor::{BridgeRunner, BridgeState, SharedBridge, MAX_FRAMES_PER_POLL},
            cluster_test::{ClusterTest, ClusterTestConfig},
            popup_cache::PopupOutcome,
        },
        messages::{
            BRIGHTNESS_FRAME_ID, DASH_LIGHTS_1_FRAME_ID, DASH_LIGHTS_2_FRAME_ID,
            ENGINE_SPEED_FRAME_ID, ODOMETER_FRAME_ID, OIL_FUEL_FRAME_ID, POPUP_FRAME_ID,
        },
        transport::can_frame::CanFrame,
    },
};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use helpers::{MockCanBus, MockTimer};

fn shared_bridge(vehicle: SimulatedVehicleState) -> SharedBridge<NoopRawMutex> {
    let config = ClusterTestConfig {
        enabled: true,
        vehicle,
        ..Default::default()
    };
    SharedBridge::new(BridgeState::new(ClusterTest::new(config).unwrap()))
}

#[tokio::test]
/// One polling iteration per millisecond for 6.02 s yields exactly one cycle:
/// the first tick waits one interval after boot.
async fn test_runner_emits_one_cycle() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    let bus = MockCanBus::default();
    let timer = MockTimer::default();
    let mut runner = BridgeRunner::new(&bridge, bus.clone(), timer.clone());

    runner.run_for(6_020, |_, _, _| {}).await;

    assert_eq!(timer.elapsed_ms(), 6_020);
    assert_eq!(
        bus.sent_ids(),
        vec![
            BRIGHTNESS_FRAME_ID,
            DASH_LIGHTS_1_FRAME_ID,
            DASH_LIGHTS_2_FRAME_ID,
            ENGINE_SPEED_FRAME_ID,
            ODOMETER_FRAME_ID,
            OIL_FUEL_FRAME_ID,
        ]
    );
    bridge.lock(|state| assert_eq!(state.cluster.scheduler().counter(), 0));
}

#[tokio::test]
/// Auto-increment walks the scenario table once per cycle.
async fn test_runner_walks_scenarios() {
    let bridge = shared_bridge(SimulatedVehicleState {
        auto_increment: true,
        ..SimulatedVehicleState::new()
    });
    let bus = MockCanBus::default();
    let mut runner = BridgeRunner::new(&bridge, bus.clone(), MockTimer::default());

    // Three full cycles of 601 ticks, 10 ms apart, after the boot interval.
    runner.run_for(3 * 6_010 + 10, |_, _, _| {}).await;

    bridge.lock(|state| {
        let vehicle = state.cluster.vehicle();
        assert_eq!(vehicle.scenario, 3);
        assert_eq!((vehicle.speed, vehicle.rpm, vehicle.fuel), (50, 1000, 25));
    });

    // The second cycle ran scenario 1 (10 km/h): its speed frame shows 1000 raw units.
    let speed_frames: Vec<CanFrame> = bus
        .sent()
        .into_iter()
        .filter(|frame| frame.id == ENGINE_SPEED_FRAME_ID)
        .collect();
    assert_eq!(speed_frames.len(), 3);
    assert_eq!(speed_frames[0].data[2..4], [0x00, 0x00]);
    assert_eq!(speed_frames[1].data[2..4], [0x03, 0xE8]);
    assert_eq!(speed_frames[2].data[2..4], [0x0B, 0xB8]);
}

#[tokio::test]
/// Received frames reach the handler, which can raise popups on the same bus.
async fn test_runner_forwards_received_frames() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    bridge.lock(|state| state.cluster.set_enabled(false));

    let bus = MockCanBus::default();
    let mut runner = BridgeRunner::new(&bridge, bus.clone(), MockTimer::default());

    // A car-side alert frame: byte 0 tells whether the alert is active.
    bus.inject(CanFrame::new(0x221, &[0x01]).unwrap());
    bus.inject(CanFrame::new(0x221, &[0x01]).unwrap());
    bus.inject(CanFrame::new(0x221, &[0x00]).unwrap());

    let mut outcomes = Vec::new();
    runner
        .run_for(5, |bridge, can_bus, frame| {
            if frame.id == 0x221 {
                outcomes.push(bridge.set_popup(can_bus, frame.data[0] != 0, 0x0001, 3, 0x00));
            }
        })
        .await;

    assert_eq!(
        outcomes,
        vec![PopupOutcome::Shown, PopupOutcome::Dropped, PopupOutcome::Closed]
    );
    assert_eq!(bus.sent_ids(), vec![POPUP_FRAME_ID, POPUP_FRAME_ID]);
    assert_eq!(bus.sent()[0].data[..3], [0x80, 0x01, 0xC3]);
    assert_eq!(bus.sent()[1].data[..2], [0x7F, 0xFF]);
}

#[tokio::test]
async fn test_disabled_session_stays_quiet() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    bridge.lock(|state| state.cluster.set_enabled(false));
    let bus = MockCanBus::default();
    let mut runner = BridgeRunner::new(&bridge, bus.clone(), MockTimer::default());

    runner.run_for(7_000, |_, _, _| {}).await;
    assert!(bus.sent().is_empty());
}

#[tokio::test]
/// `run_until` stops on the external signal and hands the bus back.
async fn test_runner_stops_on_signal() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    let bus = MockCanBus::default();
    let timer = MockTimer::default();
    let runner = BridgeRunner::new(&bridge, bus.clone(), timer.clone());

    let clock = timer.clone();
    let stop = async move {
        while clock.elapsed_ms() < 3_010 {
            tokio::task::yield_now().await;
        }
    };
    let (returned_bus, _timer) = runner.run_until(stop, |_, _, _| {}).await;

    // Counter n ticks at 10 * n ms, so 300 is the last phase reached.
    assert_eq!(
        returned_bus.sent_ids(),
        vec![BRIGHTNESS_FRAME_ID, DASH_LIGHTS_1_FRAME_ID, DASH_LIGHTS_2_FRAME_ID]
    );
    let elapsed = timer.elapsed_ms();
    assert!((3_010..3_020).contains(&elapsed));
}

#[tokio::test]
/// A burst of received frames is spread over iterations so the scheduler still
/// gets polled in between.
async fn test_step_bounds_received_frames() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    let bus = MockCanBus::default();
    let timer = MockTimer::default();
    timer.advance(10);
    let mut runner = BridgeRunner::new(&bridge, bus.clone(), timer);

    for index in 0..20u8 {
        bus.inject(CanFrame::new(0x221, &[index]).unwrap());
    }

    let mut first = Vec::new();
    let ticked = runner.step(&mut |_, _, frame| first.push(frame.data[0]));
    assert_eq!(first.len(), MAX_FRAMES_PER_POLL);
    assert_eq!(ticked, Some(1));

    let mut rest = Vec::new();
    assert_eq!(runner.step(&mut |_, _, frame| rest.push(frame.data[0])), None);
    assert_eq!(rest, vec![16, 17, 18, 19]);
    assert_eq!(first, (0..16u8).collect::<Vec<_>>());
}

#[tokio::test]
/// `drive` keeps forwarding frames and ticking until it is dropped.
async fn test_drive_runs_until_dropped() {
    let bridge = shared_bridge(SimulatedVehicleState::new());
    let bus = MockCanBus::default();
    let timer = MockTimer::default();
    let runner = BridgeRunner::new(&bridge, bus.clone(), timer.clone());
    bus.inject(CanFrame::new(0x221, &[0x01]).unwrap());

    let mut forwarded = 0usize;
    let clock = timer.clone();
    tokio::select! {
        biased;
        _ = async {
            while clock.elapsed_ms() < 1_010 {
                tokio::task::yield_now().await;
            }
        } => {}
        _ = runner.drive(|_, _, _| forwarded += 1) => unreachable!("drive never returns"),
    }

    assert_eq!(forwarded, 1);
    assert_eq!(bus.sent_ids(), vec![BRIGHTNESS_FRAME_ID]);
    assert!(timer.elapsed_ms() >= 1_010);
}
