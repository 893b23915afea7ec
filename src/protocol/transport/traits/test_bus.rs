//! In-memory bus recording transmitted frames, for unit tests.
use super::can_bus::CanBus;
use crate::protocol::transport::can_frame::CanFrame;
use heapless::Vec;

#[derive(Default)]
pub(crate) struct RecordingBus {
    pub sent: Vec<CanFrame, 256>,
    /// Reject every transmission when set.
    pub fail: bool,
}

impl RecordingBus {
    pub fn ids(&self) -> Vec<u16, 256> {
        self.sent.iter().map(|frame| frame.id).collect()
    }
}

impl CanBus for RecordingBus {
    type Error = ();

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.sent.push(*frame).map_err(|_| ())
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error> {
        Ok(None)
    }
}
