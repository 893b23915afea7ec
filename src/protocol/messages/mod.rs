//! Catalogue of the CAN frames the bridge emits towards the CAN2010 side.
//!
//! Every builder is pure: it turns typed values into a [`CanFrame`] and leaves the
//! sending to the caller. Fixed bytes are the values the cluster expects and have
//! no meaning beyond that.
use crate::infra::codec::telemetry::{encode_odometer_bcd, encode_rpm, encode_speed};
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================IDENTIFIERS
/// Popup show/close command.
pub const POPUP_FRAME_ID: u16 = 0x1A1;
/// Engine RPM and vehicle speed.
pub const ENGINE_SPEED_FRAME_ID: u16 = 0xB6;
/// Ignition state and odometer.
pub const ODOMETER_FRAME_ID: u16 = 0xF6;
/// Oil temperature and fuel level.
pub const OIL_FUEL_FRAME_ID: u16 = 0x161;
/// Ignition and dashboard brightness.
pub const BRIGHTNESS_FRAME_ID: u16 = 0x36;
/// First group of dashboard telltales.
pub const DASH_LIGHTS_1_FRAME_ID: u16 = 0x128;
/// Second group of dashboard telltales.
pub const DASH_LIGHTS_2_FRAME_ID: u16 = 0x168;
/// Frame family protected by the rolling checksum (checksum in byte 7).
pub const CHECKSUM_FRAME_ID: u16 = 0x0E6;

//==================================================================================POPUP
/// Highest popup priority the device accepts; larger values are clamped.
pub const MAX_POPUP_PRIORITY: u8 = 14;

/// Routing flags always set in the priority byte (bit 7: NAC/EMF/MATT, bit 6: cluster).
const POPUP_DESTINATION_FLAGS: u8 = 0xC0;

/// "New message" marker set on the identifier's top bit.
const POPUP_NEW_MESSAGE: u8 = 0x80;

/// What a popup frame asks the device to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PopupCommand {
    /// Display the alert with this identifier.
    Show(u16),
    /// Close whatever popup is currently displayed. The device does not take an
    /// identifier for this.
    Close,
}

/// Build the `0x1A1` popup frame.
pub fn popup_frame(command: PopupCommand, priority: u8, parameters: u8) -> CanFrame {
    let [id_high, id_low] = match command {
        PopupCommand::Show(id) => {
            let [high, low] = id.to_be_bytes();
            [high | POPUP_NEW_MESSAGE, low]
        }
        PopupCommand::Close => [0x7F, 0xFF],
    };
    let priority = priority.min(MAX_POPUP_PRIORITY) | POPUP_DESTINATION_FLAGS;

    CanFrame::fixed(
        POPUP_FRAME_ID,
        [id_high, id_low, priority, parameters, 0x00, 0x00, 0x00, 0x00],
        8,
    )
}

//==================================================================================CLUSTER
/// Default backlight level carried by the `0x36` frame.
pub const DEFAULT_BRIGHTNESS: u8 = 0x3F;

/// `0xB6`: RPM in bytes 0-1, speed in bytes 2-3.
pub fn engine_speed_frame(rpm: u16, speed: u16) -> CanFrame {
    let [rpm_high, rpm_low] = encode_rpm(rpm);
    let [speed_high, speed_low] = encode_speed(speed);
    CanFrame::fixed(
        ENGINE_SPEED_FRAME_ID,
        [rpm_high, rpm_low, speed_high, speed_low, 0x00, 0x00, 0x00, 0xD0],
        8,
    )
}

/// `0xF6`: ignition flag in byte 0, BCD odometer in bytes 2-4.
pub fn odometer_frame(ignition: bool, odometer: u32) -> CanFrame {
    let [odo0, odo1, odo2] = encode_odometer_bcd(odometer);
    let status = if ignition { 0x8E } else { 0x0E };
    CanFrame::fixed(
        ODOMETER_FRAME_ID,
        [status, 0x80, odo0, odo1, odo2, 0xB6, 0xFF, 0x10],
        8,
    )
}

/// `0x161` (7 bytes): oil temperature in byte 2, fuel percentage in byte 3.
pub fn oil_fuel_frame(oil_temperature: u8, fuel: u8) -> CanFrame {
    CanFrame::fixed(
        OIL_FUEL_FRAME_ID,
        [0x00, 0x00, oil_temperature, fuel, 0x00, 0x00, 0xFF, 0x00],
        7,
    )
}

/// `0x36`: ignition/brightness, brightness in byte 3.
pub fn brightness_frame(brightness: u8) -> CanFrame {
    CanFrame::fixed(
        BRIGHTNESS_FRAME_ID,
        [0x0E, 0x00, 0x00, brightness, 0x01, 0x00, 0x00, 0xA0],
        8,
    )
}

/// `0x128`: every telltale of the first group lit.
pub fn dash_lights_1_frame() -> CanFrame {
    CanFrame::fixed(
        DASH_LIGHTS_1_FRAME_ID,
        [0xFF, 0xFF, 0x00, 0x00, 0xFE, 0x11, 0x38, 0x00],
        8,
    )
}

/// `0x168`: every telltale of the second group lit.
pub fn dash_lights_2_frame() -> CanFrame {
    CanFrame::fixed(
        DASH_LIGHTS_2_FRAME_ID,
        [0xFF, 0x00, 0x00, 0xF3, 0x03, 0x00, 0xF0, 0x00],
        8,
    )
}
