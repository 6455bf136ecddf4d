//! OLED display driver and luminance sources

pub mod framebuffer;
pub mod ssd1306;

pub use framebuffer::{Framebuffer, RgbaFrame};
pub use ssd1306::{Ssd1306, HEIGHT, PAGES, WIDTH};

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Bus transaction failed (device unavailable, address select, I/O)
    Bus(E),
    /// Controller accepted fewer bytes than the block holds
    ShortWrite {
        /// Block length
        expected: usize,
        /// Bytes accepted
        written: usize,
    },
}

/// Anything that can be sampled as an 8-bit luminance grid
///
/// Coordinates outside the source read as black.
pub trait PixelSource {
    /// Intensity of pixel (x, y), 0 = black, 255 = white
    fn luminance(&self, x: usize, y: usize) -> u8;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn luminance(&self, x: usize, y: usize) -> u8 {
        T::luminance(self, x, y)
    }
}
