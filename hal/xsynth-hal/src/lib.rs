//! xsynth Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the panel drivers are written
//! against. Platform crates (currently `xsynth-hal-linux`) implement them on
//! top of real device nodes, and the driver tests implement them with
//! recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (xsynth-panel)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  xsynth-drivers (OLED, MCU, reset)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  xsynth-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  xsynth-hal-linux (/dev/i2c, gpiomem)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Addressed two-wire bus transactions
//! - [`gpio::RegisterWindow`], [`gpio::GpioMemory`] - Mapped GPIO registers
//! - [`DelayNs`] - Blocking delays (re-exported from `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use gpio::{GpioMemory, RegisterWindow};
pub use i2c::I2cBus;
