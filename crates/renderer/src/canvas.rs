//! Fixed-size output canvas.

use image::{Rgba, RgbaImage};

/// Output canvas dimensions and background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Opaque RGB background the fitted image is flattened onto.
    pub background: [u8; 3],
}

impl Canvas {
    /// The 400x160 white canvas every conversion targets.
    pub const STANDARD: Canvas = Canvas {
        width: 400,
        height: 160,
        background: [255, 255, 255],
    };

    /// Background as an opaque RGBA pixel.
    pub fn background_pixel(&self) -> Rgba<u8> {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 255])
    }

    /// Allocate a fresh, fully opaque canvas raster.
    ///
    /// Every call returns a new buffer; canvases are never shared between
    /// conversions.
    pub fn blank(&self) -> RgbaImage {
        RgbaImage::from_pixel(self.width, self.height, self.background_pixel())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STANDARD
    }
}
