//! Fixed-point and BCD encoders for the cluster telemetry frames.
//!
//! The reference device expects `value / resolution` truncated toward zero. The
//! resolutions are expressed here as exact rationals (`num / den`) so the division
//! happens on integers and yields the same bytes on every target.
use crate::core::MAX_ODOMETER_KM;

/// Engine speed resolution: 0.125 RPM per bit.
const RPM_RESOLUTION: (u32, u32) = (125, 1000);
/// Vehicle speed resolution: 0.01 km/h per bit.
const SPEED_RESOLUTION: (u32, u32) = (1, 100);

/// Divide `value` by the `(num, den)` resolution, truncating toward zero.
#[inline]
fn to_raw(value: u16, resolution: (u32, u32)) -> u32 {
    let (num, den) = resolution;
    u32::from(value) * den / num
}

/// Big-endian bytes of the low 16 bits of `raw`.
#[inline]
fn high_low(raw: u32) -> [u8; 2] {
    [((raw >> 8) & 0xFF) as u8, (raw & 0xFF) as u8]
}

/// Encode an engine speed in RPM (0.125 RPM units, big-endian).
pub fn encode_rpm(rpm: u16) -> [u8; 2] {
    high_low(to_raw(rpm, RPM_RESOLUTION))
}

/// Encode a vehicle speed in km/h (0.01 km/h units, big-endian).
///
/// Only the low 16 bits reach the wire: speeds above 655 km/h wrap.
pub fn encode_speed(speed: u16) -> [u8; 2] {
    high_low(to_raw(speed, SPEED_RESOLUTION))
}

/// Encode an odometer reading (km) as six packed BCD digits, most significant first.
/// Values above 999999 are clamped.
pub fn encode_odometer_bcd(odometer: u32) -> [u8; 3] {
    let odo = odometer.min(MAX_ODOMETER_KM);
    let digit = |divisor: u32| ((odo / divisor) % 10) as u8;

    [
        (digit(100_000) << 4) | digit(10_000),
        (digit(1_000) << 4) | digit(100),
        (digit(10) << 4) | digit(1),
    ]
}
