//! Cooperative, phase-multiplexed emitter of the cluster telemetry frames.
//!
//! One counter runs from 0 to 600 and wraps; each frame group is bound to a fixed
//! counter value (its phase). Every group is therefore sent once per cycle, and
//! no two groups share a tick, which keeps the bus load flat:
//!
//! ```text
//! counter   0 : next scenario (auto-increment only)
//! counter 100 : 0x36  ignition / brightness
//! counter 200 : 0x128 dash lights 1
//! counter 300 : 0x168 dash lights 2
//! counter 500 : 0xB6 rpm + speed, 0xF6 odometer, 0x161 oil + fuel, then odometer +1 km
//! ```
//!
//! The scheduler never blocks. [`CycleScheduler::poll`] is meant to be called on
//! every iteration of the driver loop and only ticks when the configured interval
//! has elapsed since the previous tick.
use embassy_time::{Duration, Instant};

use crate::core::SimulatedVehicleState;
use crate::protocol::management::scenario;
use crate::protocol::messages::{
    brightness_frame, dash_lights_1_frame, dash_lights_2_frame, engine_speed_frame,
    odometer_frame, oil_fuel_frame, DEFAULT_BRIGHTNESS,
};
use crate::protocol::transport::traits::can_bus::{transmit_best_effort, CanBus};
use crate::protocol::transport::CYCLE_TICK_INTERVAL_MS;

/// Last counter value of a cycle; the tick after it is counter 0.
pub const CYCLE_LAST_TICK: u16 = 600;

/// Reference of the tick gate before the first tick.
const BOOT: Instant = Instant::from_ticks(0);

/// Work bound to one phase of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleAction {
    /// Move to the next scenario when auto-increment is on.
    NextScenario,
    /// `0x36`.
    Brightness,
    /// `0x128`.
    DashLights1,
    /// `0x168`.
    DashLights2,
    /// `0xB6`, `0xF6`, `0x161`, then the simulated odometer step.
    Telemetry,
}

/// Phase table: (counter value, action).
pub const CYCLE_SCHEDULE: [(u16, CycleAction); 5] = [
    (0, CycleAction::NextScenario),
    (100, CycleAction::Brightness),
    (200, CycleAction::DashLights1),
    (300, CycleAction::DashLights2),
    (500, CycleAction::Telemetry),
];

/// Tick-driven frame scheduler owning the simulated vehicle.
#[derive(Debug, Clone)]
pub struct CycleScheduler {
    counter: u16,
    last_tick: Instant,
    interval: Duration,
    brightness: u8,
    vehicle: SimulatedVehicleState,
}

impl Default for CycleScheduler {
    fn default() -> Self {
        Self::new(SimulatedVehicleState::new())
    }
}

impl CycleScheduler {
    /// Scheduler with the default 10 ms interval and brightness.
    pub fn new(vehicle: SimulatedVehicleState) -> Self {
        Self::with_settings(
            vehicle,
            Duration::from_millis(CYCLE_TICK_INTERVAL_MS),
            DEFAULT_BRIGHTNESS,
        )
    }

    pub fn with_settings(vehicle: SimulatedVehicleState, interval: Duration, brightness: u8) -> Self {
        Self {
            counter: 0,
            last_tick: BOOT,
            interval,
            brightness,
            vehicle,
        }
    }

    /// Tick if at least one interval elapsed since the last tick. Returns the new
    /// counter value when it ticked.
    ///
    /// Before the first tick the reference is boot time, so nothing is sent during
    /// the first interval. A late call ticks once; missed ticks are not replayed.
    pub fn poll<C: CanBus + ?Sized>(&mut self, now: Instant, can_bus: &mut C) -> Option<u16> {
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return None;
        }
        self.last_tick = now;
        Some(self.tick(can_bus))
    }

    /// Advance the counter by one and run whatever is bound to the new value.
    /// Bypasses the interval gate.
    pub fn tick<C: CanBus + ?Sized>(&mut self, can_bus: &mut C) -> u16 {
        self.counter += 1;
        if self.counter > CYCLE_LAST_TICK {
            self.counter = 0;
        }

        for &(phase, action) in CYCLE_SCHEDULE.iter() {
            if phase == self.counter {
                self.run(action, can_bus);
            }
        }

        if self.counter == 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Cluster test - scenario: {}, speed: {} km/h, rpm: {}, fuel: {}%, odo: {} km",
                self.vehicle.scenario,
                self.vehicle.speed,
                self.vehicle.rpm,
                self.vehicle.fuel,
                self.vehicle.odometer
            );
        }
        self.counter
    }

    fn run<C: CanBus + ?Sized>(&mut self, action: CycleAction, can_bus: &mut C) {
        let vehicle = &mut self.vehicle;
        match action {
            CycleAction::NextScenario => {
                if vehicle.auto_increment {
                    let index = vehicle.next_scenario();
                    vehicle.apply_preset(scenario::apply(index));
                    #[cfg(feature = "defmt")]
                    defmt::info!("Scenario {} applied", index);
                }
            }
            CycleAction::Brightness => {
                transmit_best_effort(can_bus, &brightness_frame(self.brightness));
            }
            CycleAction::DashLights1 => transmit_best_effort(can_bus, &dash_lights_1_frame()),
            CycleAction::DashLights2 => transmit_best_effort(can_bus, &dash_lights_2_frame()),
            CycleAction::Telemetry => {
                transmit_best_effort(can_bus, &engine_speed_frame(vehicle.rpm, vehicle.speed));
                transmit_best_effort(can_bus, &odometer_frame(vehicle.ignition, vehicle.odometer));
                transmit_best_effort(
                    can_bus,
                    &oil_fuel_frame(vehicle.oil_temperature, vehicle.fuel),
                );
                vehicle.advance_odometer();
            }
        }
    }

    /// Current counter value (0-600).
    pub fn counter(&self) -> u16 {
        self.counter
    }

    /// Restart the cycle at counter 0. The tick gate keeps its timing.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn vehicle(&self) -> &SimulatedVehicleState {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut SimulatedVehicleState {
        &mut self.vehicle
    }
}
