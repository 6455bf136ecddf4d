//! Input MCU Wire Format
//!
//! This crate defines the binary record the panel's input MCU returns over
//! I2C. The host writes a single zero byte (register offset 0) and then
//! reads one fixed-size record:
//!
//! ```text
//! ┌──────────┬─────────────┬───────────────────┬──────────┐
//! │ TOUCH    │ ROTARIES    │ POTENTIOMETERS    │ CHECKSUM │
//! │ 2 × u8   │ 4 × i8      │ 6 × u8            │ u32 LE   │
//! └──────────┴─────────────┴───────────────────┴──────────┘
//!   0..2       2..6          6..12               12..16
//! ```
//!
//! The checksum is `0xAA55AA55` plus the first three little-endian words
//! of the record, with wraparound.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;

pub use frame::{
    checksum, FrameError, InputsFrame, CHECKSUM_SEED, FRAME_LEN, NUM_POTENTIOMETERS,
    NUM_ROTARIES, PAYLOAD_LEN, REGISTER_START,
};
