//! Instrument cluster test mode: emulates the CAN2004 car so that a CAN2010
//! cluster can be exercised on the bench, without a car or BSI.
//!
//! The frames are in the car's format and are written to the cluster side of the
//! bridge, exactly like forwarded car traffic would be. A console (outside this
//! crate) drives the session through the setters below.
use embassy_time::{Duration, Instant};

use crate::core::{ScenarioPreset, SimulatedVehicleState, MAX_ODOMETER_KM, SCENARIO_COUNT};
use crate::error::ConfigError;
use crate::protocol::management::cycle_scheduler::CycleScheduler;
use crate::protocol::management::scenario;
use crate::protocol::messages::DEFAULT_BRIGHTNESS;
use crate::protocol::transport::traits::can_bus::CanBus;
use crate::protocol::transport::CYCLE_TICK_INTERVAL_MS;

/// Start-up settings of a test session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClusterTestConfig {
    /// Emit frames at all.
    pub enabled: bool,
    /// Minimum spacing between scheduler ticks (ms).
    pub interval_ms: u64,
    /// Backlight level written into the `0x36` frame.
    pub brightness: u8,
    /// Initial state of the emulated car.
    pub vehicle: SimulatedVehicleState,
}

impl Default for ClusterTestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: CYCLE_TICK_INTERVAL_MS,
            brightness: DEFAULT_BRIGHTNESS,
            vehicle: SimulatedVehicleState::new(),
        }
    }
}

impl ClusterTestConfig {
    /// Check every field against what the cluster can display.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        check_scenario(self.vehicle.scenario)?;
        check_odometer(self.vehicle.odometer)?;
        check_fuel(self.vehicle.fuel)
    }
}

fn check_scenario(scenario: u8) -> Result<(), ConfigError> {
    if scenario >= SCENARIO_COUNT {
        return Err(ConfigError::ScenarioOutOfRange { scenario });
    }
    Ok(())
}

fn check_odometer(odometer: u32) -> Result<(), ConfigError> {
    if odometer > MAX_ODOMETER_KM {
        return Err(ConfigError::OdometerOutOfRange { odometer });
    }
    Ok(())
}

fn check_fuel(fuel: u8) -> Result<(), ConfigError> {
    if fuel > 100 {
        return Err(ConfigError::FuelOutOfRange { fuel });
    }
    Ok(())
}

/// A running (or paused) cluster test session.
#[derive(Debug, Clone)]
pub struct ClusterTest {
    enabled: bool,
    scheduler: CycleScheduler,
}

impl ClusterTest {
    /// Validate the configuration and build the session.
    pub fn new(config: ClusterTestConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Self {
            enabled: config.enabled,
            scheduler: CycleScheduler::with_settings(
                config.vehicle,
                Duration::from_millis(config.interval_ms),
                config.brightness,
            ),
        };
        if session.enabled {
            session.log_banner();
        }
        Ok(session)
    }

    /// Drive the scheduler; does nothing while the session is disabled.
    pub fn poll<C: CanBus + ?Sized>(&mut self, now: Instant, can_bus: &mut C) -> Option<u16> {
        if !self.enabled {
            return None;
        }
        self.scheduler.poll(now, can_bus)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn test mode on or off. Enabling restarts the cycle from counter 0.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.scheduler.reset();
            self.enabled = true;
            self.log_banner();
        } else if !enabled && self.enabled {
            self.enabled = false;
            #[cfg(feature = "defmt")]
            defmt::info!("Instrument cluster test mode disabled");
        }
    }

    //==================================================================================CONTROLS
    pub fn set_speed(&mut self, speed: u16) {
        self.scheduler.vehicle_mut().speed = speed;
    }

    pub fn set_rpm(&mut self, rpm: u16) {
        self.scheduler.vehicle_mut().rpm = rpm;
    }

    pub fn set_fuel(&mut self, fuel: u8) -> Result<(), ConfigError> {
        check_fuel(fuel)?;
        self.scheduler.vehicle_mut().fuel = fuel;
        Ok(())
    }

    pub fn set_odometer(&mut self, odometer: u32) -> Result<(), ConfigError> {
        check_odometer(odometer)?;
        self.scheduler.vehicle_mut().odometer = odometer;
        Ok(())
    }

    pub fn set_ignition(&mut self, ignition: bool) {
        self.scheduler.vehicle_mut().ignition = ignition;
    }

    pub fn set_oil_temperature(&mut self, oil_temperature: u8) {
        self.scheduler.vehicle_mut().oil_temperature = oil_temperature;
    }

    pub fn set_auto_increment(&mut self, auto_increment: bool) {
        self.scheduler.vehicle_mut().auto_increment = auto_increment;
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.scheduler.set_brightness(brightness);
    }

    /// Jump to a scenario and load its speed, RPM and fuel.
    pub fn set_scenario(&mut self, index: u8) -> Result<ScenarioPreset, ConfigError> {
        check_scenario(index)?;
        let preset = scenario::apply(index);
        let vehicle = self.scheduler.vehicle_mut();
        vehicle.scenario = index;
        vehicle.apply_preset(preset);
        Ok(preset)
    }

    pub fn vehicle(&self) -> &SimulatedVehicleState {
        self.scheduler.vehicle()
    }

    pub fn scheduler(&self) -> &CycleScheduler {
        &self.scheduler
    }

    fn log_banner(&self) {
        #[cfg(feature = "defmt")]
        {
            let vehicle = self.scheduler.vehicle();
            defmt::info!("INSTRUMENT CLUSTER TEST MODE ENABLED");
            defmt::info!(
                "Update rate: {} Hz base frequency",
                1000 / self.scheduler.interval().as_millis().max(1)
            );
            defmt::info!(
                "Initial values: scenario={}, speed={} km/h, rpm={}, fuel={}%, odometer={} km",
                vehicle.scenario,
                vehicle.speed,
                vehicle.rpm,
                vehicle.fuel,
                vehicle.odometer
            );
        }
    }
}
