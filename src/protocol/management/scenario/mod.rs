//! Preset driving scenarios for the cluster test generator.
//!
//! Each row sweeps the gauges a bit further: the speedometer from standstill up
//! to its 657 km/h stop, the tachometer to 6000 RPM and the fuel gauge from empty
//! to full.
use crate::core::ScenarioPreset;

/// Scenario table, indexed 0-15.
pub const SCENARIOS: [ScenarioPreset; 16] = [
    ScenarioPreset::new(0, 0, 0),
    ScenarioPreset::new(10, 0, 0),
    ScenarioPreset::new(30, 500, 0),
    ScenarioPreset::new(50, 1000, 25),
    ScenarioPreset::new(70, 1500, 13),
    ScenarioPreset::new(90, 2000, 26),
    ScenarioPreset::new(110, 2500, 38),
    ScenarioPreset::new(130, 3000, 50),
    ScenarioPreset::new(150, 3500, 63),
    ScenarioPreset::new(170, 4000, 74),
    ScenarioPreset::new(190, 4500, 87),
    ScenarioPreset::new(210, 5000, 100),
    ScenarioPreset::new(230, 5500, 100),
    ScenarioPreset::new(250, 6000, 100),
    ScenarioPreset::new(260, 6000, 100),
    ScenarioPreset::new(657, 6000, 100),
];

/// Look a scenario up. Unknown indices read as a stopped, empty car.
pub fn apply(scenario: u8) -> ScenarioPreset {
    SCENARIOS
        .get(usize::from(scenario))
        .copied()
        .unwrap_or_default()
}
