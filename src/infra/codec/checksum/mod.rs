//! Rolling checksum of the CAN2010 `0x0E6` frame family.
//!
//! The destination device rejects a frame whose checksum does not follow the
//! rolling counter, even when the payload did not change. The counter lives in the
//! engine, so one engine must serve every frame of the family.

/// Counter period: the checksum phase repeats every 16 computations.
pub const CHECKSUM_PERIOD: u8 = 16;

/// Stateful checksum generator owning the rolling counter.
#[derive(Debug, Clone, Default)]
pub struct ChecksumEngine {
    iter: u8,
}

impl ChecksumEngine {
    /// Start at counter phase 0.
    pub const fn new() -> Self {
        Self { iter: 0 }
    }

    /// Counter value the next [`compute`](Self::compute) call will mix in.
    pub fn counter(&self) -> u8 {
        self.iter
    }

    /// Checksum of the first seven bytes of a frame; advances the counter.
    ///
    /// The high nibble of the result is the counter XORed in after the nibble
    /// arithmetic, so every byte value can come out.
    pub fn compute(&mut self, frame: &[u8; 7]) -> u8 {
        let mut sum = frame
            .iter()
            .fold(0u8, |acc, byte| acc.wrapping_add((byte >> 4) + (byte & 0x0F)));
        sum = sum.wrapping_add(self.iter);

        let low = (sum ^ 0xFF).wrapping_sub(3) & 0x0F;
        let checksum = low ^ (self.iter << 4);

        self.iter += 1;
        if self.iter >= CHECKSUM_PERIOD {
            self.iter = 0;
        }
        checksum
    }

    /// Compute the checksum of bytes 0-6 and store it in byte 7.
    pub fn seal(&mut self, payload: &mut [u8; 8]) -> u8 {
        let mut head = [0u8; 7];
        head.copy_from_slice(&payload[..7]);
        let checksum = self.compute(&head);
        payload[7] = checksum;
        checksum
    }
}
