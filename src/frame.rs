/// Number of bits in one transmission.
const FRAME_BITS: u8 = 40;

/// The 40-bit frame a DHT sensor transmits: humidity high/low, temperature
/// high/low, checksum.
///
/// Bits arrive most-significant first within each byte; the trailing byte
/// must equal the low 8 bits of the payload sum for the frame to be accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; 5],
    len: u8,
}

impl RawFrame {
    /// An empty frame, ready to accumulate bits.
    pub fn new() -> Self {
        RawFrame {
            bytes: [0; 5],
            len: 0,
        }
    }

    /// A complete frame built from raw bytes, checksum included.
    pub fn from_bytes(bytes: [u8; 5]) -> Self {
        RawFrame {
            bytes,
            len: FRAME_BITS,
        }
    }

    /// Appends one bit, MSB first within each byte.
    pub fn push_bit(&mut self, bit: bool) {
        debug_assert!(self.len < FRAME_BITS);
        if bit {
            self.bytes[(self.len / 8) as usize] |= 1 << (7 - self.len % 8);
        }
        self.len += 1;
    }

    /// True once all 40 bits have been received.
    pub fn is_complete(&self) -> bool {
        self.len == FRAME_BITS
    }

    /// Validates the trailing checksum byte against the payload sum mod 256.
    pub fn checksum_matches(&self) -> bool {
        let [b0, b1, b2, b3, checksum] = self.bytes;
        b0.wrapping_add(b1).wrapping_add(b2).wrapping_add(b3) == checksum
    }

    /// The four payload bytes: humidity high/low, temperature high/low.
    pub fn payload(&self) -> [u8; 4] {
        let [b0, b1, b2, b3, _] = self.bytes;
        [b0, b1, b2, b3]
    }
}

impl Default for RawFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_byte(frame: &mut RawFrame, byte: u8) {
        for i in 0..8 {
            frame.push_bit(byte & (1 << (7 - i)) != 0);
        }
    }

    #[test]
    fn accumulates_bits_msb_first() {
        let mut frame = RawFrame::new();
        for byte in [0xB2, 0x01, 0x5A, 0x00, 0x0D] {
            push_byte(&mut frame, byte);
        }

        assert!(frame.is_complete());
        assert_eq!(frame.payload(), [0xB2, 0x01, 0x5A, 0x00]);
        assert!(frame.checksum_matches());
    }

    #[test]
    fn partial_frame_is_not_complete() {
        let mut frame = RawFrame::new();
        frame.push_bit(true);
        frame.push_bit(false);

        assert!(!frame.is_complete());
        assert_eq!(frame.payload()[0], 0b1000_0000);
    }

    #[test]
    fn detects_checksum_mismatch() {
        let frame = RawFrame::from_bytes([0x02, 0x14, 0x01, 0x05, 0x1A]);
        assert!(!frame.checksum_matches());

        let frame = RawFrame::from_bytes([0x02, 0x14, 0x01, 0x05, 0x1C]);
        assert!(frame.checksum_matches());
    }

    #[test]
    fn checksum_sum_wraps_modulo_256() {
        // 4 * 0xFF = 0x3FC, so the expected checksum is 0xFC.
        let frame = RawFrame::from_bytes([0xFF, 0xFF, 0xFF, 0xFF, 0xFC]);
        assert!(frame.checksum_matches());
    }
}
