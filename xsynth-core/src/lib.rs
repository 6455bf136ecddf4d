//! Board-agnostic core logic for the xsynth front panel
//!
//! This crate contains everything that turns validated MCU frames into
//! panel events without touching hardware:
//!
//! - Analog channel filtering (normalization + hysteresis)
//! - Rotary encoder delta tracking
//! - Touch grid selection tracking
//! - Explicit per-process input state and the events it emits
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod state;

pub use config::{ConfigError, PanelConfig};
pub use input::{AnalogChannelFilter, AnalogReading, RotaryTracker, TouchGrid};
pub use state::{FrameReport, InputEvent, InputState};
