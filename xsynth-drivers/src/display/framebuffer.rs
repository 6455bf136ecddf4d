//! Luminance sources for the display driver
//!
//! [`Framebuffer`] is an owned grayscale grid sized to the panel, with just
//! enough drawing helpers for status screens. [`RgbaFrame`] borrows the
//! RGBA8 readback of an offscreen render target.

use super::ssd1306::{HEIGHT, WIDTH};
use super::PixelSource;

/// 128x64 grayscale frame buffer
#[derive(Clone)]
pub struct Framebuffer {
    pixels: [u8; WIDTH * HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a black frame buffer
    pub const fn new() -> Self {
        Self {
            pixels: [0; WIDTH * HEIGHT],
        }
    }

    /// Frame width in pixels
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// Frame height in pixels
    pub const fn height(&self) -> usize {
        HEIGHT
    }

    /// Fill the whole frame with one intensity
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    /// Clear to black
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Set one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        if x < WIDTH && y < HEIGHT {
            self.pixels[y * WIDTH + x] = value;
        }
    }

    /// Read one pixel; out-of-range coordinates read as black
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        if x < WIDTH && y < HEIGHT {
            self.pixels[y * WIDTH + x]
        } else {
            0
        }
    }

    /// Fill a rectangle, clipped to the frame
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
        let x_end = x.saturating_add(width).min(WIDTH);
        let y_end = y.saturating_add(height).min(HEIGHT);

        for row in y.min(HEIGHT)..y_end {
            let start = row * WIDTH;
            self.pixels[start + x.min(x_end)..start + x_end].fill(value);
        }
    }

    /// Draw a one-pixel rectangle outline, clipped to the frame
    pub fn draw_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);

        self.fill_rect(x, y, width, 1, value);
        self.fill_rect(x, bottom, width, 1, value);
        self.fill_rect(x, y, 1, height, value);
        self.fill_rect(right, y, 1, height, value);
    }

    /// Raw row-major pixel data
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl PixelSource for Framebuffer {
    fn luminance(&self, x: usize, y: usize) -> u8 {
        self.pixel(x, y)
    }
}

/// Borrowed RGBA8 image, sampled on the red channel
///
/// Matches what a GPU render target reads back as: rows of `width`
/// 4-byte pixels. Monochrome content is drawn white, so any one channel
/// carries the intensity.
#[derive(Debug, Clone, Copy)]
pub struct RgbaFrame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbaFrame<'a> {
    /// Bytes per pixel
    pub const STRIDE: usize = 4;

    /// Wrap `data`, which must hold exactly `width * height` RGBA pixels
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Option<Self> {
        let len = width.checked_mul(height)?.checked_mul(Self::STRIDE)?;
        if data.len() != len {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }
}

impl PixelSource for RgbaFrame<'_> {
    fn luminance(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) * Self::STRIDE]
        } else {
            0
        }
    }
}
