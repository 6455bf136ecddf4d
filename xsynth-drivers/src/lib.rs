//! Hardware driver implementations
//!
//! This crate provides the panel's device drivers, written against the
//! traits in `xsynth-hal`:
//!
//! - OLED display (SSD1306-compatible, 128x64, I2C)
//! - Display reset pulse through mapped GPIO registers
//! - Input MCU frame polling (touch, rotaries, potentiometers)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod mcu;
pub mod reset;

pub use display::{DisplayError, Framebuffer, PixelSource, RgbaFrame, Ssd1306};
pub use mcu::{McuError, McuInputs};
pub use reset::{GpioBank, GpioReset, NoReset, PinMode, Reset, ResetError};
