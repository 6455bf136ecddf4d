//! Input MCU driver
//!
//! The MCU samples the touch grid, rotary encoders and potentiometers and
//! serves the latest snapshot over I2C. Polling is request/response: write
//! the register offset, then read one whole frame.

use xsynth_hal::I2cBus;
use xsynth_protocol::{FrameError, InputsFrame, FRAME_LEN, REGISTER_START};

/// Polling errors
///
/// Every variant means the same thing to the caller: no new frame this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McuError<E> {
    /// Bus transaction failed (device unavailable, address select, I/O)
    Bus(E),
    /// Register offset was not accepted
    ShortWrite {
        /// Bytes accepted
        written: usize,
    },
    /// Fewer bytes than one frame were returned
    ShortRead {
        /// Bytes received
        read: usize,
    },
    /// Frame failed validation
    Frame(FrameError),
}

impl<E> McuError<E> {
    /// Returns true if the frame arrived but failed its checksum
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, McuError::Frame(FrameError::ChecksumMismatch { .. }))
    }
}

/// Input MCU driver
pub struct McuInputs<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> McuInputs<B> {
    /// Create a new driver bound to `address` on `bus`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Bus address of the MCU
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Fetch and validate one frame
    ///
    /// No state is kept here; a failed poll has no effect beyond the bus
    /// traffic it caused.
    pub fn poll(&mut self) -> Result<InputsFrame, McuError<B::Error>> {
        let written = self
            .bus
            .write(self.address, &[REGISTER_START])
            .map_err(McuError::Bus)?;
        if written != 1 {
            return Err(McuError::ShortWrite { written });
        }

        let mut buf = [0u8; FRAME_LEN];
        let read = self
            .bus
            .read(self.address, &mut buf)
            .map_err(McuError::Bus)?;
        if read != FRAME_LEN {
            return Err(McuError::ShortRead { read });
        }

        InputsFrame::decode(&buf).map_err(McuError::Frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus that serves one canned record
    struct Canned {
        record: [u8; FRAME_LEN],
        read_len: usize,
        primed: bool,
    }

    impl I2cBus for Canned {
        type Error = ();

        fn select(&mut self, _address: u8) -> Result<(), ()> {
            Ok(())
        }

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<usize, ()> {
            self.primed = data == [REGISTER_START];
            Ok(data.len())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<usize, ()> {
            if !self.primed {
                return Err(());
            }
            let n = self.read_len.min(buf.len());
            buf[..n].copy_from_slice(&self.record[..n]);
            Ok(n)
        }
    }

    #[test]
    fn test_poll_decodes_frame() {
        let frame = InputsFrame::new([3, 4], [1, 2, 3, 4], [10, 20, 30, 40, 50, 60]);
        let mut mcu = McuInputs::new(
            Canned {
                record: frame.encode(),
                read_len: FRAME_LEN,
                primed: false,
            },
            0x47,
        );
        assert_eq!(mcu.poll(), Ok(frame));
    }

    #[test]
    fn test_short_read_rejected() {
        let frame = InputsFrame::new([3, 4], [0; 4], [0; 6]);
        let mut mcu = McuInputs::new(
            Canned {
                record: frame.encode(),
                read_len: 13,
                primed: false,
            },
            0x47,
        );
        assert_eq!(mcu.poll(), Err(McuError::ShortRead { read: 13 }));
    }

    #[test]
    fn test_checksum_mismatch_classified() {
        let frame = InputsFrame::new([3, 4], [0; 4], [0; 6]).with_checksum(0);
        let mut mcu = McuInputs::new(
            Canned {
                record: frame.encode(),
                read_len: FRAME_LEN,
                primed: false,
            },
            0x47,
        );
        let err = mcu.poll().unwrap_err();
        assert!(err.is_checksum_mismatch());
    }
}
