//! Contain-fit scaling.
//!
//! Sources are scaled by `min(box_w / src_w, box_h / src_h)`, upscaling when
//! the source is smaller than the box. The result never exceeds the box and
//! is never cropped.

use gifbox_common::{ConvertError, ConvertResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Compute the contain-fit size of an integer source inside the box.
pub fn fit_dimensions(
    src_width: u32,
    src_height: u32,
    box_width: u32,
    box_height: u32,
) -> ConvertResult<(u32, u32)> {
    fit_extent(src_width as f64, src_height as f64, box_width, box_height)
}

/// Compute the contain-fit size of a (possibly fractional) source extent.
///
/// Each dimension is rounded to the nearest pixel and clamped to
/// `[1, bound]`, so rounding can never push the result past the box.
pub fn fit_extent(
    src_width: f64,
    src_height: f64,
    box_width: u32,
    box_height: u32,
) -> ConvertResult<(u32, u32)> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(src_width) || !valid(src_height) {
        return Err(ConvertError::Resize(format!(
            "invalid source dimensions {}x{}",
            src_width, src_height
        )));
    }
    if box_width == 0 || box_height == 0 {
        return Err(ConvertError::Resize(format!(
            "invalid target box {}x{}",
            box_width, box_height
        )));
    }

    let scale = (box_width as f64 / src_width).min(box_height as f64 / src_height);
    let width = ((src_width * scale).round() as u32).clamp(1, box_width);
    let height = ((src_height * scale).round() as u32).clamp(1, box_height);

    Ok((width, height))
}

/// Scale `image` to its contain-fit size inside the box.
///
/// Resampling happens in premultiplied alpha so fully transparent pixels do
/// not bleed their (meaningless) colour into visible edges.
pub fn fit_to_box(image: RgbaImage, box_width: u32, box_height: u32) -> ConvertResult<RgbaImage> {
    let (width, height) = fit_dimensions(image.width(), image.height(), box_width, box_height)?;
    if (width, height) == image.dimensions() {
        return Ok(image);
    }

    let mut premultiplied = image;
    premultiply(&mut premultiplied);

    let mut resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);
    demultiply(&mut resized);

    Ok(resized)
}

fn premultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        if alpha == 255 {
            continue;
        }
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u32 * alpha + 127) / 255) as u8;
        }
    }
}

fn demultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        match alpha {
            255 => {}
            0 => pixel.0 = [0, 0, 0, 0],
            _ => {
                // Lanczos ringing can leave a channel above its alpha.
                for c in 0..3 {
                    pixel[c] = ((pixel[c] as u32 * 255 + alpha / 2) / alpha).min(255) as u8;
                }
            }
        }
    }
}
