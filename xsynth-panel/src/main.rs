//! xsynth front panel service
//!
//! Drives the panel's OLED and polls the input MCU on the shared I2C bus:
//!
//! 1. Load configuration (TOML, defaults when absent)
//! 2. Open the I2C adapter and share it between display and MCU
//! 3. Reset and initialize the display
//! 4. Tick at the configured frame rate: poll inputs, log events, redraw

mod config;
mod controller;
mod display;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use linux_embedded_hal::Delay;
use log::info;
use xsynth_core::PanelConfig;
use xsynth_drivers::{GpioReset, McuInputs, Ssd1306};
use xsynth_hal_linux::{GpioMem, LinuxI2cBus, SharedBus};

use crate::controller::Controller;

#[derive(Parser)]
#[command(name = "xsynth-panel")]
#[command(about = "xsynth front panel: OLED status screen and input events", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Stop after this many ticks (0 = run forever)
    #[arg(long, default_value = "0")]
    ticks: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("xsynth-panel v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load(&cli.config)?;

    let bus = LinuxI2cBus::open(config.bus.device.as_str())
        .with_context(|| format!("opening I2C bus {}", config.bus.device))?;
    let bus = SharedBus::new(bus);

    let display = Ssd1306::new(bus.clone(), config.display.address);
    let mcu = McuInputs::new(bus, config.mcu.address);
    let mut reset = display_reset(&config);

    let mut panel = Controller::new(display, mcu, &config.input);
    panel.start(&mut reset);

    let period = Duration::from_micros(config.tick_period_us());
    info!("running at {} Hz", config.frame_rate);

    let mut count: u64 = 0;
    loop {
        let started = Instant::now();
        panel.tick();
        count += 1;

        if cli.ticks != 0 && count >= cli.ticks {
            break;
        }
        if let Some(rest) = period.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    info!("stopped after {} ticks", count);
    Ok(())
}

/// Reset line for the display, pulsed through `/dev/gpiomem`
fn display_reset(config: &PanelConfig) -> GpioReset<GpioMem, Delay> {
    match config.reset_pin() {
        Some(pin) => info!("display reset on GPIO{} via {}", pin, config.gpio.device),
        None => info!("display reset line not wired"),
    }
    GpioReset::new(
        GpioMem::new(config.gpio.device.as_str()),
        Delay,
        config.display.reset_pin,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_display_reset_follows_config() {
        let config = PanelConfig::default();
        assert_eq!(display_reset(&config).pin(), 4);

        let mut config = PanelConfig::default();
        config.display.reset_pin = -1;
        let mut reset = display_reset(&config);
        assert_eq!(config.reset_pin(), None);
        // Unwired line never touches the GPIO device
        assert!(reset.pulse().is_ok());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["xsynth-panel"]);
        assert_eq!(cli.config, PathBuf::from(config::DEFAULT_CONFIG_PATH));
        assert_eq!(cli.ticks, 0);

        let cli = Cli::parse_from(["xsynth-panel", "-c", "panel.toml", "--ticks", "5"]);
        assert_eq!(cli.config, PathBuf::from("panel.toml"));
        assert_eq!(cli.ticks, 5);
    }
}
