//! Letterbox compositing onto the opaque canvas.

use gifbox_common::{ConvertError, ConvertResult};
use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;

/// Offsets that center a `width` x `height` image on the canvas.
pub fn placement(width: u32, height: u32, canvas: &Canvas) -> ConvertResult<(u32, u32)> {
    if width > canvas.width || height > canvas.height {
        return Err(ConvertError::Composite(format!(
            "fitted image {}x{} exceeds canvas {}x{}",
            width, height, canvas.width, canvas.height
        )));
    }

    Ok(((canvas.width - width) / 2, (canvas.height - height) / 2))
}

/// Alpha-over a straight-alpha pixel onto an opaque background colour.
///
/// `out = src * a + bg * (1 - a)`, rounded; the result is always opaque.
#[inline]
pub fn blend_over(src: Rgba<u8>, background: [u8; 3]) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = src;
    let a = a as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;

    Rgba([
        mix(r, background[0]),
        mix(g, background[1]),
        mix(b, background[2]),
        255,
    ])
}

/// Center `fitted` on a fresh canvas, flattening all transparency.
pub fn composite_onto(fitted: &RgbaImage, canvas: &Canvas) -> ConvertResult<RgbaImage> {
    let (offset_x, offset_y) = placement(fitted.width(), fitted.height(), canvas)?;
    let mut output = canvas.blank();

    for (x, y, src) in fitted.enumerate_pixels() {
        output.put_pixel(offset_x + x, offset_y + y, blend_over(*src, canvas.background));
    }

    Ok(output)
}
