//! GIF encoding for the composited canvas.
//!
//! GIF stores at most 256 colours per frame. Rasters with more colours are
//! quantized with NeuQuant at a fixed sampling speed, so the output is
//! byte-identical for identical input.

use gifbox_common::{ConvertError, ConvertResult};
use image::codecs::gif::GifEncoder;
use image::{Frame, RgbaImage};

/// NeuQuant sampling factor (1 = best quality, 30 = fastest).
pub const QUANTIZE_SPEED: i32 = 10;

/// Encode an opaque raster as a single-frame GIF.
///
/// The raster is fully opaque, so the GIF carries no transparent index.
pub fn encode_gif(raster: &RgbaImage) -> ConvertResult<Vec<u8>> {
    encode_gif_with_speed(raster, QUANTIZE_SPEED)
}

/// Encode with an explicit NeuQuant speed, clamped to `1..=30`.
pub fn encode_gif_with_speed(raster: &RgbaImage, speed: i32) -> ConvertResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(ConvertError::Encode(format!(
            "{}x{} exceeds GIF dimension limits",
            width, height
        )));
    }
    if let Some((x, y, _)) = raster.enumerate_pixels().find(|(_, _, p)| p[3] != 255) {
        return Err(ConvertError::Encode(format!(
            "pixel ({}, {}) is not opaque",
            x, y
        )));
    }

    let mut gif_data = Vec::new();
    {
        // `encode_frame` honours the encoder's speed; `encode` with raw
        // RGB bytes always quantizes at speed 1.
        let mut encoder = GifEncoder::new_with_speed(&mut gif_data, speed.clamp(1, 30));
        encoder
            .encode_frame(Frame::new(raster.clone()))
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
    }

    Ok(gif_data)
}
