//! Rotary encoder delta tracking
//!
//! The MCU reports each encoder as a free-running signed 8-bit counter.
//! The host turns consecutive counters into tick deltas.

use xsynth_protocol::NUM_ROTARIES;

/// Encoder ticks between two counter readings
///
/// 8-bit wraparound subtraction, so a counter that rolls over from 127 to
/// -128 still yields a small delta.
pub fn delta(previous: i8, current: i8) -> i8 {
    current.wrapping_sub(previous)
}

/// Last counter value of every rotary channel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryTracker {
    last: [i8; NUM_ROTARIES],
}

impl RotaryTracker {
    /// Create a tracker with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record counters without computing deltas
    pub fn seed(&mut self, counters: &[i8; NUM_ROTARIES]) {
        self.last = *counters;
    }

    /// Compute deltas against the previous counters, then store `counters`
    pub fn update(&mut self, counters: &[i8; NUM_ROTARIES]) -> [i8; NUM_ROTARIES] {
        let mut deltas = [0i8; NUM_ROTARIES];
        for ((d, &previous), &current) in deltas.iter_mut().zip(&self.last).zip(counters) {
            *d = delta(previous, current);
        }
        self.last = *counters;
        deltas
    }

    /// Previous counters
    pub fn last(&self) -> &[i8; NUM_ROTARIES] {
        &self.last
    }
}
