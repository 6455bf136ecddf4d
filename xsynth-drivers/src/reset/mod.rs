//! Display reset
//!
//! The OLED's reset input is wired to a SoC GPIO line that is driven by
//! writing the GPIO controller's registers directly.

pub mod gpio;

pub use gpio::{GpioBank, GpioReset, PinMode, ResetError};

/// Something that can hardware-reset a device
pub trait Reset {
    /// Error type for reset failures
    type Error: core::fmt::Debug;

    /// Run the reset sequence, blocking until the device may be addressed
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Reset stand-in for boards without a wired reset line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReset;

impl Reset for NoReset {
    type Error = core::convert::Infallible;

    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
