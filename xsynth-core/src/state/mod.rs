//! Panel input state
//!
//! [`InputState`] owns every piece of per-process filter state and turns
//! validated frames into [`InputEvent`]s.

pub mod events;
pub mod tracker;

pub use events::InputEvent;
pub use tracker::{FrameReport, InputState, MAX_EVENTS_PER_FRAME};
