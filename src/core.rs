//! Vehicle-side data contract shared by the scenario table, the cycle scheduler
//! and the cluster test generator.
//!
//! Nothing here talks to the bus: these are plain values the scheduler reads when
//! it builds telemetry frames, and mutates when it simulates a drive.

/// Highest value the six-digit BCD odometer can display (km).
pub const MAX_ODOMETER_KM: u32 = 999_999;

/// Number of rows in the scenario table.
pub const SCENARIO_COUNT: u8 = 16;

/// Oil temperature sent when nothing else was configured (raw byte).
pub const DEFAULT_OIL_TEMPERATURE: u8 = 0;

/// One row of the scenario table: what the simulated car is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScenarioPreset {
    /// Vehicle speed in km/h.
    pub speed: u16,
    /// Engine speed in revolutions per minute.
    pub rpm: u16,
    /// Fuel level in percent (0-100).
    pub fuel: u8,
}

impl ScenarioPreset {
    pub const fn new(speed: u16, rpm: u16, fuel: u8) -> Self {
        Self { speed, rpm, fuel }
    }
}

/// Mutable state of the car emulated in cluster test mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimulatedVehicleState {
    /// Vehicle speed in km/h.
    pub speed: u16,
    /// Engine speed in RPM.
    pub rpm: u16,
    /// Fuel level in percent.
    pub fuel: u8,
    /// Odometer in km, never above [`MAX_ODOMETER_KM`].
    pub odometer: u32,
    /// Ignition on/off.
    pub ignition: bool,
    /// Raw oil temperature byte as displayed by the cluster.
    pub oil_temperature: u8,
    /// Step to the next scenario at the start of every cycle.
    pub auto_increment: bool,
    /// Current scenario index (0-15).
    pub scenario: u8,
}

impl Default for SimulatedVehicleState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedVehicleState {
    /// Parked car: ignition on, everything else at rest.
    pub const fn new() -> Self {
        Self {
            speed: 0,
            rpm: 0,
            fuel: 0,
            odometer: 0,
            ignition: true,
            oil_temperature: DEFAULT_OIL_TEMPERATURE,
            auto_increment: false,
            scenario: 0,
        }
    }

    /// Copy speed, RPM and fuel from a scenario row.
    pub fn apply_preset(&mut self, preset: ScenarioPreset) {
        self.speed = preset.speed;
        self.rpm = preset.rpm;
        self.fuel = preset.fuel;
    }

    /// Advance the scenario index, wrapping 15 → 0, and return the new index.
    pub fn next_scenario(&mut self) -> u8 {
        let next = self.scenario.wrapping_add(1);
        self.scenario = if next >= SCENARIO_COUNT { 0 } else { next };
        self.scenario
    }

    /// Add one km when the car is actually moving. Wraps to zero past the last
    /// displayable value.
    pub fn advance_odometer(&mut self) {
        if !self.ignition || self.speed == 0 {
            return;
        }
        self.odometer = self.odometer.saturating_add(1);
        if self.odometer > MAX_ODOMETER_KM {
            self.odometer = 0;
        }
    }
}
