//! Timer abstraction providing the clock and delay primitives the driver loop
//! needs.
use embassy_time::{Instant, Timer};
use futures_util::Future;

/// Monotonic clock plus asynchronous delay.
pub trait BridgeTimer {
    /// Current monotonic time.
    fn now(&self) -> Instant;
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a;
}

/// [`BridgeTimer`] backed by the `embassy-time` driver of the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTimer;

impl BridgeTimer for EmbassyTimer {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a {
        Timer::after_millis(u64::from(millis))
    }
}
