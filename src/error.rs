//! Error definitions shared across library modules.
//! The bridge core itself never fails: errors only exist at its edges (frame
//! construction, test configuration, calendar conversion, driver adapters).
use thiserror_no_std::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur while building a classic CAN frame.
pub enum FrameBuildError {
    /// Standard identifiers are limited to 11 bits.
    #[error("Invalid standard identifier: {id:#X}")]
    InvalidIdentifier { id: u16 },
    /// Classic CAN carries at most eight payload bytes.
    #[error("Payload too long -> asked: {len}, max: 8")]
    PayloadTooLong { len: usize },
    /// The bridge only speaks 11-bit identifiers.
    #[error("Extended identifier not supported: {id:#X}")]
    ExtendedIdentifier { id: u32 },
    /// Remote frames carry no payload for the bridge to forward.
    #[error("Remote frame not supported")]
    RemoteFrame,
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Rejected cluster test configuration.
pub enum ConfigError {
    /// The scheduler interval must be at least one millisecond.
    #[error("Tick interval must not be zero")]
    ZeroInterval,
    /// Scenario indices run from 0 to 15.
    #[error("Scenario out of range: {scenario}")]
    ScenarioOutOfRange { scenario: u8 },
    /// The odometer only has six BCD digits.
    #[error("Odometer out of range: {odometer}")]
    OdometerOutOfRange { odometer: u32 },
    /// Fuel level is a percentage.
    #[error("Fuel level out of range: {fuel}")]
    FuelOutOfRange { fuel: u8 },
}

//================================================================================CALENDAR_ERROR
#[derive(Error, Debug, PartialEq, Eq)]
/// Invalid calendar date handed to the day-of-year conversion.
pub enum CalendarError {
    /// Month must be in 1..=12.
    #[error("Invalid month: {month}")]
    InvalidMonth { month: u8 },
    /// Day does not exist in the given month.
    #[error("Invalid day {day} for month {month}")]
    InvalidDay { day: u8, month: u8 },
}

//==================================================================================ADAPTER_ERROR
#[derive(Error, Debug)]
/// Errors surfaced by the `embedded-can` driver adapter.
pub enum AdapterError<E: core::fmt::Debug> {
    /// The driver refused or failed to transmit the frame.
    #[error("CAN driver send error: {0:?}")]
    Send(E),
    /// The driver failed while fetching a frame.
    #[error("CAN driver receive error: {0:?}")]
    Receive(E),
    /// Transmit mailboxes are full; the frame was not queued.
    #[error("CAN driver busy")]
    Busy,
    /// A received frame could not be represented (extended id, remote frame...).
    #[error(transparent)]
    Frame(#[from] FrameBuildError),
}
