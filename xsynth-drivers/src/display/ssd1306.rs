//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-compatible OLED displays via I2C.
//! The display RAM is addressed as 8 pages of 128 column bytes; bit `n` of a
//! column byte is row `page * 8 + n`.

use log::{debug, warn};
use xsynth_hal::I2cBus;

use super::{DisplayError, PixelSource};
use crate::reset::Reset;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / 8;

/// Luminance at or above this lights a pixel
pub const THRESHOLD: u8 = 127;

/// Control byte: the rest of the block is commands
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: the rest of the block is display RAM data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// Power-up configuration, display left off
pub const SETUP_DISPLAY: [u8; 23] = [
    CONTROL_COMMAND,
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE | 0x00,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_MEMORY_MODE,
    0x00,                  // Horizontal addressing
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_RESUME,
    cmd::SET_NORMAL,
];

/// High contrast
pub const SETUP_CONTRAST: [u8; 3] = [CONTROL_COMMAND, cmd::SET_CONTRAST, 0xCF];

/// Full-screen column/page window
pub const SETUP_WINDOW: [u8; 7] = [
    CONTROL_COMMAND,
    cmd::SET_COLUMN_ADDR,
    0x00,
    (WIDTH - 1) as u8,
    cmd::SET_PAGE_ADDR,
    0x00,
    (PAGES - 1) as u8,
];

/// Turn the panel output on, showing display RAM
pub const FLUSH: [u8; 2] = [CONTROL_COMMAND, cmd::DISPLAY_ON];

/// One page transfer: control byte + 128 column bytes
pub type PageBuffer = [u8; WIDTH + 1];

/// SSD1306 OLED driver
pub struct Ssd1306<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Ssd1306<B> {
    /// Create a new driver bound to `address` on `bus`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Bus address of the display
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Initialize the display
    ///
    /// Fails before touching the reset line if the address cannot be
    /// selected. A failed reset is logged and initialization continues, the
    /// controller may then simply start from an unreset state. Every setup
    /// block must be accepted in full.
    pub fn init<R: Reset>(&mut self, reset: &mut R) -> Result<(), DisplayError<B::Error>> {
        self.bus.select(self.address).map_err(DisplayError::Bus)?;

        if let Err(e) = reset.reset() {
            warn!("display reset failed, continuing without it: {:?}", e);
        }

        self.write_block(&SETUP_DISPLAY)?;
        self.write_block(&SETUP_CONTRAST)?;
        self.write_block(&SETUP_WINDOW)?;

        debug!("display at {:#04x} initialized", self.address);
        Ok(())
    }

    /// Send a frame to the display
    ///
    /// Pages are written top to bottom, one bus transaction each. The first
    /// failed or short page write stops the page loop, but the output-enable
    /// command is still sent. Returns the number of pages written, which is
    /// less than [`PAGES`] when the loop stopped early.
    pub fn draw<F: PixelSource + ?Sized>(
        &mut self,
        frame: &F,
    ) -> Result<usize, DisplayError<B::Error>> {
        // The bus may have been used by another device since the last frame
        self.bus.select(self.address).map_err(DisplayError::Bus)?;

        let mut buf: PageBuffer = [0; WIDTH + 1];
        let mut written = 0;

        for page in 0..PAGES {
            render_page(frame, page, &mut buf);

            match self.bus.write(self.address, &buf) {
                Ok(n) if n == buf.len() => written += 1,
                Ok(n) => {
                    warn!("page {} short write ({}/{} bytes), skipping rest", page, n, buf.len());
                    break;
                }
                Err(e) => {
                    warn!("page {} write failed: {:?}, skipping rest", page, e);
                    break;
                }
            }
        }

        self.write_block(&FLUSH)?;
        Ok(written)
    }

    fn write_block(&mut self, block: &[u8]) -> Result<(), DisplayError<B::Error>> {
        let written = self
            .bus
            .write(self.address, block)
            .map_err(DisplayError::Bus)?;

        if written != block.len() {
            return Err(DisplayError::ShortWrite {
                expected: block.len(),
                written,
            });
        }
        Ok(())
    }
}

/// Threshold one 128x8 band of `frame` into a page transfer buffer
///
/// Rows are scanned in the outer loop and columns in the inner loop, each
/// lit pixel ORing its row bit into the column byte.
pub fn render_page<F: PixelSource + ?Sized>(frame: &F, page: usize, buf: &mut PageBuffer) {
    buf[0] = CONTROL_DATA;
    buf[1..].fill(0);

    for row in 0..8 {
        let y = page * 8 + row;
        for x in 0..WIDTH {
            let lit = frame.luminance(x, y) >= THRESHOLD;
            buf[x + 1] |= (lit as u8) << row;
        }
    }
}
