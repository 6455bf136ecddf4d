//! GPIO reset pulse
//!
//! Register layout of the BCM283x GPIO block as seen through the
//! `/dev/gpiomem` window (32-bit word offsets):
//!
//! - `GPFSELn` at `n` for `n = pin / 10`: 3-bit function field per pin at
//!   bit `(pin % 10) * 3`
//! - `GPSETn` at `7 + n` for `n = pin / 32`: writing a 1 drives the pin high
//! - `GPCLRn` at `10 + n`: writing a 1 drives the pin low
//!
//! SET/CLR are write-one registers, so they are written, never modified.

use embedded_hal::delay::DelayNs;
use log::debug;
use xsynth_hal::{GpioMemory, RegisterWindow};

use super::Reset;

/// Size of the GPIO register window in bytes
pub const WINDOW_SIZE: usize = 0xB4;

/// Size of the GPIO register window in 32-bit words
pub const WINDOW_WORDS: usize = WINDOW_SIZE / 4;

/// Word offset of the first output-set register
pub const SET_OFFSET: usize = 7;

/// Word offset of the first output-clear register
pub const CLEAR_OFFSET: usize = 10;

/// Highest GPIO line in the block
pub const MAX_PIN: u8 = 53;

/// Low pulse width required by the display's reset input
pub const PULSE_MS: u32 = 1;

/// Settle time before the display accepts commands
pub const SETTLE_MS: u32 = 1;

const FSEL_MASK: u32 = 0b111;

/// GPIO function select
///
/// Codes are the BCM283x GPFSEL values. Input must stay `0b000`; reusing the
/// output code would leave the reset line driven after the pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

impl PinMode {
    /// Function-select field value
    pub const fn bits(self) -> u32 {
        match self {
            PinMode::Input => 0b000,
            PinMode::Output => 0b001,
        }
    }
}

/// Reset errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetError<E> {
    /// Pin is beyond the GPIO block
    InvalidPin(i32),
    /// GPIO device could not be opened or mapped
    Open(E),
    /// Mapped window is smaller than the register layout needs
    WindowTooSmall(usize),
}

/// Typed access to the GPIO registers of one mapped window
pub struct GpioBank<W> {
    window: W,
}

impl<W: RegisterWindow> GpioBank<W> {
    /// Wrap a mapped window
    pub fn new(window: W) -> Self {
        Self { window }
    }

    /// Set the function of `pin`
    ///
    /// Read-modify-write of the pin's `GPFSEL` field; other pins sharing
    /// the register keep their mode.
    pub fn set_mode(&mut self, pin: u8, mode: PinMode) {
        let (reg, shift) = fsel(pin);
        self.window
            .modify(reg, |v| (v & !(FSEL_MASK << shift)) | (mode.bits() << shift));
    }

    /// Current function-select field of `pin`
    pub fn mode_bits(&self, pin: u8) -> u32 {
        let (reg, shift) = fsel(pin);
        (self.window.read(reg) >> shift) & FSEL_MASK
    }

    /// Drive `pin` high (write to its `GPSET` register)
    pub fn set_high(&mut self, pin: u8) {
        let (bank, mask) = level(pin);
        self.window.write(SET_OFFSET + bank, mask);
    }

    /// Drive `pin` low (write to its `GPCLR` register)
    pub fn set_low(&mut self, pin: u8) {
        let (bank, mask) = level(pin);
        self.window.write(CLEAR_OFFSET + bank, mask);
    }

    /// Give the window back (dropping it unmaps)
    pub fn into_inner(self) -> W {
        self.window
    }
}

/// Function-select register index and bit shift for `pin`
const fn fsel(pin: u8) -> (usize, u32) {
    ((pin / 10) as usize, (pin % 10) as u32 * 3)
}

/// Level register bank and bit mask for `pin`
const fn level(pin: u8) -> (usize, u32) {
    ((pin >> 5) as usize, 1 << (pin & 0x1F))
}

/// Display reset through a GPIO line
///
/// Each reset opens a fresh register window and drops it before returning,
/// so no mapping is held between calls.
pub struct GpioReset<M, D> {
    memory: M,
    delay: D,
    pin: i32,
}

impl<M: GpioMemory, D: DelayNs> GpioReset<M, D> {
    /// Create a reset controller for `pin` (negative = no reset line)
    pub fn new(memory: M, delay: D, pin: i32) -> Self {
        Self { memory, delay, pin }
    }

    /// Configured pin
    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Run the reset pulse
    ///
    /// Sequence: mode OUTPUT, drive low, wait [`PULSE_MS`], drive high,
    /// mode INPUT, wait [`SETTLE_MS`]. The delays are the display's minimum
    /// pulse width and settle time and must not be shortened. A negative
    /// pin is a successful no-op.
    pub fn pulse(&mut self) -> Result<(), ResetError<M::Error>> {
        if self.pin < 0 {
            return Ok(());
        }
        let pin = u8::try_from(self.pin)
            .ok()
            .filter(|&p| p <= MAX_PIN)
            .ok_or(ResetError::InvalidPin(self.pin))?;

        let window = self.memory.open().map_err(ResetError::Open)?;
        if window.len() < WINDOW_WORDS {
            return Err(ResetError::WindowTooSmall(window.len()));
        }
        let mut gpio = GpioBank::new(window);

        debug!(
            "pulsing reset on GPIO{} (function {:#05b})",
            pin,
            gpio.mode_bits(pin)
        );

        gpio.set_mode(pin, PinMode::Output);
        gpio.set_low(pin);
        self.delay.delay_ms(PULSE_MS);
        gpio.set_high(pin);

        // Release the line and let the display come up
        gpio.set_mode(pin, PinMode::Input);
        self.delay.delay_ms(SETTLE_MS);

        Ok(())
    }
}

impl<M: GpioMemory, D: DelayNs> Reset for GpioReset<M, D> {
    type Error = ResetError<M::Error>;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.pulse()
    }
}
