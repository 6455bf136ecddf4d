//! Events emitted from decoded frames

/// Input events for the outward notification layer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Baseline value of an analog channel (first frame only)
    AnalogInitial {
        /// Channel index (0-5)
        channel: u8,
        /// Normalized value
        value: f32,
    },
    /// Analog channel moved past its dead-zone
    AnalogChanged {
        /// Channel index (0-5)
        channel: u8,
        /// Normalized value
        value: f32,
    },
    /// Rotary encoder turned
    Rotary {
        /// Channel index (0-3)
        channel: u8,
        /// Ticks since the previous valid frame
        delta: i8,
    },
    /// Finger landed on or left the touch grid
    GridTouch {
        /// New touch state
        touched: bool,
    },
    /// Selected grid cell moved
    GridSelect {
        /// Column
        x: u8,
        /// Row
        y: u8,
    },
}

impl InputEvent {
    /// Returns true if this event reports an analog channel
    pub fn is_analog(&self) -> bool {
        matches!(
            self,
            InputEvent::AnalogInitial { .. } | InputEvent::AnalogChanged { .. }
        )
    }
}
