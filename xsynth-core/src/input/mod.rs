//! Per-channel input filters
//!
//! Each filter consumes raw fields from a validated [`xsynth_protocol::InputsFrame`]
//! and keeps only the state it needs for the next frame.

pub mod analog;
pub mod rotary;
pub mod touch;

pub use analog::{normalize, AnalogChannelFilter, AnalogReading, DEFAULT_THRESHOLD};
pub use rotary::{delta, RotaryTracker};
pub use touch::{TouchGrid, TouchUpdate, DEFAULT_GRID_SIZE};
