//! Inputs frame decoding and checksum validation.
//!
//! Frame layout (16 bytes, the MCU's native struct layout):
//! - TOUCH (2 bytes): grid cell x, y
//! - ROTARIES (4 bytes): free-running signed encoder counters
//! - POTENTIOMETERS (6 bytes): raw 8-bit analog samples
//! - CHECKSUM (4 bytes): little-endian u32 over the 12 payload bytes
//!
//! The checksum is computed on the raw byte layout, three little-endian
//! words at offsets 0, 4 and 8, never on the parsed fields.

/// Register offset the host writes before reading a frame
pub const REGISTER_START: u8 = 0x00;

/// Number of rotary encoder channels
pub const NUM_ROTARIES: usize = 4;

/// Number of potentiometer channels
pub const NUM_POTENTIOMETERS: usize = 6;

/// Payload bytes covered by the checksum
pub const PAYLOAD_LEN: usize = 2 + NUM_ROTARIES + NUM_POTENTIOMETERS;

/// Complete frame size (payload + u32 checksum)
pub const FRAME_LEN: usize = PAYLOAD_LEN + 4;

/// Starting value of the checksum sum
pub const CHECKSUM_SEED: u32 = 0xAA55_AA55;

const TOUCH_OFFSET: usize = 0;
const ROTARY_OFFSET: usize = TOUCH_OFFSET + 2;
const POT_OFFSET: usize = ROTARY_OFFSET + NUM_ROTARIES;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Record length does not match [`FRAME_LEN`]
    Length {
        /// Required length
        expected: usize,
        /// Length received
        actual: usize,
    },
    /// Checksum field does not match the payload
    ChecksumMismatch {
        /// Checksum computed from the payload
        expected: u32,
        /// Checksum carried in the frame
        actual: u32,
    },
}

/// Compute the checksum of a 12-byte payload
///
/// `0xAA55AA55 + w0 + w1 + w2 (mod 2^32)`, where `wN` are the payload's
/// little-endian words. Modular addition means distinct payloads can
/// collide; a single corrupted byte always changes the sum.
pub fn checksum(payload: &[u8; PAYLOAD_LEN]) -> u32 {
    payload
        .chunks_exact(4)
        .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .fold(CHECKSUM_SEED, u32::wrapping_add)
}

/// One decoded snapshot of the panel inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputsFrame {
    /// Touch grid cell (x, y); out-of-grid values mean "not touched"
    pub touch: [u8; 2],
    /// Free-running rotary counters
    pub rotaries: [i8; NUM_ROTARIES],
    /// Raw potentiometer samples
    pub potentiometers: [u8; NUM_POTENTIOMETERS],
    /// Checksum as carried on the wire
    pub checksum: u32,
}

impl InputsFrame {
    /// Build a frame with a correct checksum
    pub fn new(
        touch: [u8; 2],
        rotaries: [i8; NUM_ROTARIES],
        potentiometers: [u8; NUM_POTENTIOMETERS],
    ) -> Self {
        let mut frame = Self {
            touch,
            rotaries,
            potentiometers,
            checksum: 0,
        };
        frame.checksum = checksum(&frame.payload());
        frame
    }

    /// Replace the checksum field (used to model corrupted frames)
    pub fn with_checksum(mut self, checksum: u32) -> Self {
        self.checksum = checksum;
        self
    }

    /// Serialize the 12 payload bytes
    pub fn payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[TOUCH_OFFSET..ROTARY_OFFSET].copy_from_slice(&self.touch);
        for (dst, &rotary) in payload[ROTARY_OFFSET..POT_OFFSET]
            .iter_mut()
            .zip(self.rotaries.iter())
        {
            *dst = rotary as u8;
        }
        payload[POT_OFFSET..PAYLOAD_LEN].copy_from_slice(&self.potentiometers);
        payload
    }

    /// Serialize the whole frame as it appears on the wire
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut buffer = [0u8; FRAME_LEN];
        buffer[..PAYLOAD_LEN].copy_from_slice(&self.payload());
        buffer[PAYLOAD_LEN..].copy_from_slice(&self.checksum.to_le_bytes());
        buffer
    }

    /// Decode and validate one raw record
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != FRAME_LEN {
            return Err(FrameError::Length {
                expected: FRAME_LEN,
                actual: bytes.len(),
            });
        }

        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&bytes[..PAYLOAD_LEN]);

        let carried = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        let expected = checksum(&payload);
        if carried != expected {
            return Err(FrameError::ChecksumMismatch {
                expected,
                actual: carried,
            });
        }

        let mut touch = [0u8; 2];
        touch.copy_from_slice(&payload[TOUCH_OFFSET..ROTARY_OFFSET]);

        let mut rotaries = [0i8; NUM_ROTARIES];
        for (dst, &byte) in rotaries.iter_mut().zip(&payload[ROTARY_OFFSET..POT_OFFSET]) {
            *dst = byte as i8;
        }

        let mut potentiometers = [0u8; NUM_POTENTIOMETERS];
        potentiometers.copy_from_slice(&payload[POT_OFFSET..PAYLOAD_LEN]);

        Ok(Self {
            touch,
            rotaries,
            potentiometers,
            checksum: carried,
        })
    }
}
