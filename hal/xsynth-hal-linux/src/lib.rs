//! Linux userspace HAL for the front panel
//!
//! This crate provides Linux implementations of the `xsynth-hal` traits:
//!
//! - I2C master over an `i2c-dev` character device
//! - Shared bus handle for several drivers on one adapter
//! - GPIO register window mapped from `/dev/gpiomem`

pub mod gpio;
pub mod i2c;
pub mod shared;

pub use gpio::{GpioError, GpioMem, MappedWindow, DEFAULT_GPIO_DEVICE, GPIO_WINDOW_SIZE};
pub use i2c::{I2cError, LinuxI2cBus, DEFAULT_I2C_DEVICE};
pub use shared::SharedBus;

// Re-export shared traits from xsynth-hal for convenience
pub use xsynth_hal::{GpioMemory, I2cBus, RegisterWindow};
