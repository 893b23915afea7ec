//! Transport layer: CAN frame representation and bus/timer abstraction traits.
//!
//! ## Timing constants
//!
//! These constants define the cadence of the cluster test generator and the bus
//! it is expected to run on.

pub mod can_frame;
pub mod traits;

/// Bit rate of the entertainment CAN bus both sides of the bridge sit on (bit/s).
pub const ENTERTAINMENT_CAN_BITRATE: u32 = 125_000;

/// Minimum spacing between two scheduler ticks (ms).
///
/// This is a floor, not a period: if the driver loop runs late the tick simply
/// happens later, it never fires twice to catch up. At 10 ms one cycle of 601
/// ticks lasts about six seconds.
pub const CYCLE_TICK_INTERVAL_MS: u64 = 10;

/// Delay inserted by the driver loop between two scheduler polls (ms).
///
/// Kept well under [`CYCLE_TICK_INTERVAL_MS`] so the tick gate, not the loop,
/// sets the cadence.
pub const RUNNER_POLL_DELAY_MS: u32 = 1;
