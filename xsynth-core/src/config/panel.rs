//! Panel hardware and input configuration
//!
//! These types describe which device nodes and bus addresses the panel
//! uses, and how raw inputs are filtered.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::input::{DEFAULT_GRID_SIZE, DEFAULT_THRESHOLD};

/// Maximum length of a device path
pub const MAX_PATH_LEN: usize = 64;

/// Highest BCM GPIO line the reset pulse can drive
pub const MAX_GPIO_PIN: i32 = 53;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bus address does not fit in 7 bits
    InvalidAddress(u8),
    /// Display and MCU share an address
    AddressConflict(u8),
    /// Reset pin outside the GPIO controller's range
    InvalidResetPin(i32),
    /// Frame rate must be non-zero
    ZeroFrameRate,
    /// Grid must have at least one cell
    ZeroGridSize,
    /// Device path is empty
    EmptyPath,
}

fn path(s: &str) -> String<MAX_PATH_LEN> {
    let mut out = String::new();
    // Defaults are short literals well under MAX_PATH_LEN
    let _ = out.push_str(s);
    out
}

/// I2C bus configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    /// I2C character device
    pub device: String<MAX_PATH_LEN>,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            device: path("/dev/i2c-1"),
        }
    }
}

/// OLED display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// BCM GPIO line wired to the display reset input (-1 = not wired)
    pub reset_pin: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: 0x3D,
            reset_pin: 4,
        }
    }
}

/// Input MCU configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct McuConfig {
    /// 7-bit I2C address
    pub address: u8,
}

impl Default for McuConfig {
    fn default() -> Self {
        Self { address: 0x47 }
    }
}

/// GPIO register access configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GpioConfig {
    /// GPIO memory character device
    pub device: String<MAX_PATH_LEN>,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            device: path("/dev/gpiomem"),
        }
    }
}

/// Input filtering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Analog dead-zone in raw counts
    pub analog_threshold: u8,
    /// Touch grid cells per side
    pub grid_size: u8,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            analog_threshold: DEFAULT_THRESHOLD,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Ticks per second
    pub frame_rate: u32,
    /// I2C bus
    pub bus: BusConfig,
    /// OLED display
    pub display: DisplayConfig,
    /// Input MCU
    pub mcu: McuConfig,
    /// GPIO register access
    pub gpio: GpioConfig,
    /// Input filtering
    pub input: InputConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            bus: BusConfig::default(),
            display: DisplayConfig::default(),
            mcu: McuConfig::default(),
            gpio: GpioConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Check values that would otherwise fail at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        for address in [self.display.address, self.mcu.address] {
            if address > 0x7F {
                return Err(ConfigError::InvalidAddress(address));
            }
        }
        if self.display.address == self.mcu.address {
            return Err(ConfigError::AddressConflict(self.mcu.address));
        }
        if self.display.reset_pin > MAX_GPIO_PIN {
            return Err(ConfigError::InvalidResetPin(self.display.reset_pin));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.input.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.bus.device.is_empty() || self.gpio.device.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        Ok(())
    }

    /// Reset pin, if one is wired
    pub fn reset_pin(&self) -> Option<u8> {
        u8::try_from(self.display.reset_pin).ok()
    }

    /// Tick period in microseconds
    pub fn tick_period_us(&self) -> u64 {
        1_000_000 / self.frame_rate.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_board() {
        let config = PanelConfig::default();
        assert_eq!(config.bus.device.as_str(), "/dev/i2c-1");
        assert_eq!(config.display.address, 0x3D);
        assert_eq!(config.display.reset_pin, 4);
        assert_eq!(config.mcu.address, 0x47);
        assert_eq!(config.gpio.device.as_str(), "/dev/gpiomem");
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.reset_pin(), Some(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_reset_pin_disables_reset() {
        let mut config = PanelConfig::default();
        config.display.reset_pin = -1;
        assert!(config.validate().is_ok());
        assert_eq!(config.reset_pin(), None);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = PanelConfig::default();
        config.mcu.address = 0x80;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x80)));

        let mut config = PanelConfig::default();
        config.mcu.address = 0x3D;
        assert_eq!(config.validate(), Err(ConfigError::AddressConflict(0x3D)));

        let mut config = PanelConfig::default();
        config.display.reset_pin = 54;
        assert_eq!(config.validate(), Err(ConfigError::InvalidResetPin(54)));

        let mut config = PanelConfig::default();
        config.frame_rate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameRate));

        let mut config = PanelConfig::default();
        config.input.grid_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroGridSize));
    }

    #[test]
    fn test_tick_period() {
        let config = PanelConfig::default();
        assert_eq!(config.tick_period_us(), 33_333);
    }
}
