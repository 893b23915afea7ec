//! In-memory representation of a classic CAN frame with an 11-bit identifier,
//! the only kind of frame CAN2004 and CAN2010 exchange.
use crate::error::FrameBuildError;
use embedded_can::{Frame, Id, StandardId};

/// Highest 11-bit identifier.
pub const MAX_STANDARD_ID: u16 = 0x7FF;

/// Maximum payload length of a classic CAN frame.
pub const MAX_PAYLOAD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw frame as handed to or received from the CAN controller.
pub struct CanFrame {
    /// Standard identifier (11 bits).
    pub id: u16,
    /// Payload buffer; bytes past `len` are zero.
    pub data: [u8; MAX_PAYLOAD_LEN],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Build a frame from an identifier and a payload of at most eight bytes.
    pub fn new(id: u16, payload: &[u8]) -> Result<Self, FrameBuildError> {
        if id > MAX_STANDARD_ID {
            return Err(FrameBuildError::InvalidIdentifier { id });
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FrameBuildError::PayloadTooLong { len: payload.len() });
        }
        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Frame whose identifier and length are known to be valid at compile time.
    pub(crate) const fn fixed(id: u16, data: [u8; MAX_PAYLOAD_LEN], len: usize) -> Self {
        Self { id, data, len }
    }

    /// Populated part of the payload.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Convert into the frame type of an `embedded-can` driver.
    pub fn to_embedded<F: Frame>(&self) -> Result<F, FrameBuildError> {
        let id = StandardId::new(self.id).ok_or(FrameBuildError::InvalidIdentifier { id: self.id })?;
        F::new(id, self.payload()).ok_or(FrameBuildError::PayloadTooLong { len: self.len })
    }

    /// Convert a frame received from an `embedded-can` driver.
    pub fn from_embedded<F: Frame>(frame: &F) -> Result<Self, FrameBuildError> {
        if frame.is_remote_frame() {
            return Err(FrameBuildError::RemoteFrame);
        }
        match frame.id() {
            Id::Standard(id) => Self::new(id.as_raw(), frame.data()),
            Id::Extended(id) => Err(FrameBuildError::ExtendedIdentifier { id: id.as_raw() }),
        }
    }
}
