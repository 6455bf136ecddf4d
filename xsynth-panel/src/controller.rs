//! Panel controller
//!
//! Owns the display, the input MCU and the input state, and runs one
//! poll/apply/render/draw cycle per tick. Faults are logged and the tick
//! moves on; nothing is retried within a tick.

use log::{debug, info, log, warn, Level};
use xsynth_core::config::InputConfig;
use xsynth_core::{FrameReport, InputEvent, InputState};
use xsynth_drivers::display::PAGES;
use xsynth_drivers::{Framebuffer, McuInputs, Reset, Ssd1306};
use xsynth_hal::I2cBus;

use crate::display::render_status;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// State changes from this tick's frame, `None` if no valid frame arrived
    pub report: Option<FrameReport>,
    /// Pages pushed to the display, `None` if the draw failed outright
    pub pages: Option<usize>,
}

/// Display + inputs for one panel
pub struct Controller<B> {
    display: Ssd1306<B>,
    mcu: McuInputs<B>,
    state: InputState,
    frame: Framebuffer,
}

impl<B: I2cBus> Controller<B> {
    /// Create a controller with unseeded input state
    pub fn new(display: Ssd1306<B>, mcu: McuInputs<B>, config: &InputConfig) -> Self {
        Self {
            display,
            mcu,
            state: InputState::new(config),
            frame: Framebuffer::new(),
        }
    }

    /// Bring up the display and announce the initial grid state
    ///
    /// Returns whether the display initialized. A failed display does not
    /// stop the panel; inputs are still polled and reported.
    pub fn start<R: Reset>(&mut self, reset: &mut R) -> bool {
        let ready = match self.display.init(reset) {
            Ok(()) => {
                info!("display ready at {:#04x}", self.display.address());
                true
            }
            Err(e) => {
                warn!("display init failed: {:?}", e);
                false
            }
        };

        for event in self.startup_events() {
            log_event(&event);
        }
        ready
    }

    /// Grid events describing the state before any frame arrives
    pub fn startup_events(&self) -> [InputEvent; 2] {
        let grid = self.state.grid();
        let (x, y) = grid.selection();
        [
            InputEvent::GridTouch {
                touched: grid.is_touched(),
            },
            InputEvent::GridSelect { x, y },
        ]
    }

    /// Run one cycle
    pub fn tick(&mut self) -> TickOutcome {
        let report = match self.mcu.poll() {
            Ok(frame) => {
                let report = self.state.apply(&frame);
                if report.seeded {
                    debug!("input state seeded");
                }
                for event in &report.events {
                    log_event(event);
                }
                Some(report)
            }
            Err(e) if e.is_checksum_mismatch() => {
                debug!("dropped corrupt input frame: {:?}", e);
                None
            }
            Err(e) => {
                warn!("input poll failed: {:?}", e);
                None
            }
        };

        render_status(&mut self.frame, &self.state);
        let pages = match self.display.draw(&self.frame) {
            Ok(pages) => {
                if pages < PAGES {
                    debug!("partial frame: {}/{} pages", pages, PAGES);
                }
                Some(pages)
            }
            Err(e) => {
                warn!("display draw failed: {:?}", e);
                None
            }
        };

        TickOutcome { report, pages }
    }

    /// Current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }
}

/// Analog channels stream continuously while a knob moves
fn event_level(event: &InputEvent) -> Level {
    if event.is_analog() {
        Level::Debug
    } else {
        Level::Info
    }
}

fn log_event(event: &InputEvent) {
    let level = event_level(event);
    match event {
        InputEvent::AnalogInitial { channel, value } => {
            log!(level, "analog {} initial {:.3}", channel, value)
        }
        InputEvent::AnalogChanged { channel, value } => {
            log!(level, "analog {} -> {:.3}", channel, value)
        }
        InputEvent::Rotary { channel, delta } => log!(level, "rotary {} {:+}", channel, delta),
        InputEvent::GridTouch { touched } => log!(level, "grid touch {}", touched),
        InputEvent::GridSelect { x, y } => log!(level, "grid select ({}, {})", x, y),
    }
}
