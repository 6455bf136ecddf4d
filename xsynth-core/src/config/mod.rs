//! Configuration types
//!
//! Board-agnostic configuration structures. The panel binary loads them
//! from TOML; every field has a default matching the production board.

pub mod panel;

pub use panel::*;
