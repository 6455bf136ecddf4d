//! Potentiometer channel filter
//!
//! Normalizes raw 8-bit samples to 0.0..=1.0 and suppresses jitter with a
//! dead-zone around the last reported value.

/// Default minimum reportable change, in raw counts
pub const DEFAULT_THRESHOLD: u8 = 2;

const RAW_MAX: u8 = u8::MAX;

/// Map a raw sample linearly onto 0.0..=1.0
///
/// `normalize(0) == 0.0` and `normalize(255) == 1.0` exactly.
pub fn normalize(raw: u8) -> f32 {
    raw as f32 / RAW_MAX as f32
}

/// Result of feeding one sample to a filter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogReading {
    /// Normalized value of the last reported sample
    pub value: f32,
    /// Whether this sample moved the reported value
    pub changed: bool,
}

/// Hysteresis filter for one analog channel
///
/// The filter reports a change when the raw sample moves at least
/// `threshold` counts away from the last reported sample, or when it lands
/// on an end stop (0 or 255) that has not been reported yet. End stops are
/// always reachable even if the knob only moves by a single count into them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogChannelFilter {
    threshold: u8,
    /// Last sample seen
    raw: u8,
    /// Last sample reported as a change (or the seed)
    reported: u8,
    initialized: bool,
}

impl Default for AnalogChannelFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl AnalogChannelFilter {
    /// Create an unseeded filter
    ///
    /// A threshold of 0 is treated as 1 so identical samples never report.
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.max(1),
            raw: 0,
            reported: 0,
            initialized: false,
        }
    }

    /// Establish the baseline from the first valid frame
    ///
    /// Never reports a change.
    pub fn seed(&mut self, raw: u8) -> AnalogReading {
        self.raw = raw;
        self.reported = raw;
        self.initialized = true;
        AnalogReading {
            value: normalize(raw),
            changed: false,
        }
    }

    /// Feed a sample from a subsequent valid frame
    ///
    /// An unseeded filter seeds itself instead of reporting.
    pub fn update(&mut self, raw: u8) -> AnalogReading {
        if !self.initialized {
            return self.seed(raw);
        }

        self.raw = raw;

        let distance = raw.abs_diff(self.reported);
        let at_end_stop = raw == 0 || raw == RAW_MAX;
        let changed = distance != 0 && (distance >= self.threshold || at_end_stop);

        if changed {
            self.reported = raw;
        }

        AnalogReading {
            value: normalize(self.reported),
            changed,
        }
    }

    /// Normalized value of the last reported sample
    pub fn normalized(&self) -> f32 {
        normalize(self.reported)
    }

    /// Last raw sample seen
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Check if the filter has been seeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Dead-zone width in raw counts
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}
