//! Minimal abstraction for a synchronous CAN controller. The bridge core only
//! needs "send this frame now" and "give me the next frame if there is one".
use crate::error::AdapterError;
use crate::protocol::transport::can_frame::CanFrame;

/// Contract to send and poll CAN frames without blocking.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Hand one frame to the controller. Best effort: callers in the core log
    /// failures and carry on.
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error>;
    /// Next received frame, or `None` when the receive buffers are empty.
    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error>;
}

impl<T: CanBus + ?Sized> CanBus for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        (**self).transmit(frame)
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error> {
        (**self).receive()
    }
}

/// Send a frame and swallow the error after logging it. Every emission in the
/// core goes through here.
pub(crate) fn transmit_best_effort<C: CanBus + ?Sized>(can_bus: &mut C, frame: &CanFrame) {
    if let Err(_err) = can_bus.transmit(frame) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Transmit failed for frame {:#X}", frame.id);
    }
}

//==================================================================================NB_ADAPTER
/// Adapter turning any `embedded_can::nb::Can` driver (MCP2515, bxCAN, TWAI...)
/// into a [`CanBus`].
pub struct NbCan<T> {
    driver: T,
}

impl<T> NbCan<T> {
    pub fn new(driver: T) -> Self {
        Self { driver }
    }

    /// Give the driver back.
    pub fn into_inner(self) -> T {
        self.driver
    }

    pub fn driver_mut(&mut self) -> &mut T {
        &mut self.driver
    }
}

impl<T: embedded_can::nb::Can> CanBus for NbCan<T> {
    type Error = AdapterError<T::Error>;

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        let frame = frame.to_embedded::<T::Frame>()?;
        match self.driver.transmit(&frame) {
            Ok(None) => Ok(()),
            Ok(Some(_replaced)) => {
                // The controller dropped a lower-priority pending frame to make room.
                #[cfg(feature = "defmt")]
                defmt::debug!("Pending frame replaced in TX mailbox");
                Ok(())
            }
            Err(nb::Error::WouldBlock) => Err(AdapterError::Busy),
            Err(nb::Error::Other(err)) => Err(AdapterError::Send(err)),
        }
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error> {
        match self.driver.receive() {
            Ok(frame) => Ok(Some(CanFrame::from_embedded(&frame)?)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(err)) => Err(AdapterError::Receive(err)),
        }
    }
}
