//! Frame-to-event tracking
//!
//! Only validated frames reach [`InputState::apply`]; a frame rejected by
//! the decoder leaves the state exactly as it was.

use heapless::Vec;
use xsynth_protocol::{InputsFrame, NUM_POTENTIOMETERS, NUM_ROTARIES};

use super::events::InputEvent;
use crate::config::InputConfig;
use crate::input::{AnalogChannelFilter, AnalogReading, RotaryTracker, TouchGrid};

/// Upper bound on events produced by one frame
/// (every analog + every rotary + touch + select)
pub const MAX_EVENTS_PER_FRAME: usize = 16;

/// Outcome of applying one frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// True if this frame seeded the state
    pub seeded: bool,
    /// Per-channel analog readings
    pub analog: [AnalogReading; NUM_POTENTIOMETERS],
    /// Per-channel rotary deltas (all zero on the seeding frame)
    pub rotary_deltas: [i8; NUM_ROTARIES],
    /// Touch grid state after this frame
    pub touched: bool,
    /// Selected grid cell after this frame
    pub selection: (u8, u8),
    /// Events in emission order
    pub events: Vec<InputEvent, MAX_EVENTS_PER_FRAME>,
}

/// All input state that lives for the process
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    analog: [AnalogChannelFilter; NUM_POTENTIOMETERS],
    rotary: RotaryTracker,
    grid: TouchGrid,
    seeded: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputState {
    /// Create unseeded state
    pub fn new(config: &InputConfig) -> Self {
        Self {
            analog: core::array::from_fn(|_| AnalogChannelFilter::new(config.analog_threshold)),
            rotary: RotaryTracker::new(),
            grid: TouchGrid::new(config.grid_size),
            seeded: false,
        }
    }

    /// Fold one validated frame into the state
    ///
    /// The first frame seeds the analog filters and rotary history without
    /// reporting changes. Later frames report analog changes and non-zero
    /// rotary deltas. Touch tracking runs on every frame.
    pub fn apply(&mut self, frame: &InputsFrame) -> FrameReport {
        let mut events = Vec::new();
        let mut analog = [AnalogReading::default(); NUM_POTENTIOMETERS];
        let mut rotary_deltas = [0i8; NUM_ROTARIES];
        let seeding = !self.seeded;

        if seeding {
            for (channel, (filter, &raw)) in self
                .analog
                .iter_mut()
                .zip(&frame.potentiometers)
                .enumerate()
            {
                analog[channel] = filter.seed(raw);
                push(
                    &mut events,
                    InputEvent::AnalogInitial {
                        channel: channel as u8,
                        value: analog[channel].value,
                    },
                );
            }
            self.rotary.seed(&frame.rotaries);
            self.seeded = true;
        } else {
            for (channel, (filter, &raw)) in self
                .analog
                .iter_mut()
                .zip(&frame.potentiometers)
                .enumerate()
            {
                analog[channel] = filter.update(raw);
                if analog[channel].changed {
                    push(
                        &mut events,
                        InputEvent::AnalogChanged {
                            channel: channel as u8,
                            value: analog[channel].value,
                        },
                    );
                }
            }

            rotary_deltas = self.rotary.update(&frame.rotaries);
            for (channel, &delta) in rotary_deltas.iter().enumerate() {
                if delta != 0 {
                    push(
                        &mut events,
                        InputEvent::Rotary {
                            channel: channel as u8,
                            delta,
                        },
                    );
                }
            }
        }

        let touch = self.grid.update(frame.touch);
        if let Some(touched) = touch.touch_changed {
            push(&mut events, InputEvent::GridTouch { touched });
        }
        if let Some((x, y)) = touch.selected {
            push(&mut events, InputEvent::GridSelect { x, y });
        }

        FrameReport {
            seeded: seeding,
            analog,
            rotary_deltas,
            touched: self.grid.is_touched(),
            selection: self.grid.selection(),
            events,
        }
    }

    /// Check if a frame has been applied yet
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Filter for one analog channel
    pub fn analog(&self, channel: usize) -> Option<&AnalogChannelFilter> {
        self.analog.get(channel)
    }

    /// Normalized values of all analog channels
    pub fn analog_values(&self) -> [f32; NUM_POTENTIOMETERS] {
        core::array::from_fn(|i| self.analog[i].normalized())
    }

    /// Rotary history
    pub fn rotary(&self) -> &RotaryTracker {
        &self.rotary
    }

    /// Touch grid state
    pub fn grid(&self) -> &TouchGrid {
        &self.grid
    }
}

fn push(events: &mut Vec<InputEvent, MAX_EVENTS_PER_FRAME>, event: InputEvent) {
    // Capacity covers the worst case, see MAX_EVENTS_PER_FRAME
    let _ = events.push(event);
}
