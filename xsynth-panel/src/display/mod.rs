//! OLED status screen
//!
//! The panel has no UI of its own; the OLED shows the live input state so
//! the hardware can be checked without the synth engine attached.

pub mod status;

pub use status::render_status;
