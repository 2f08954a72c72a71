//! Source decoding: turns uploaded bytes into a straight-alpha RGBA raster.

use std::io::Cursor;

use gifbox_common::{ConvertError, ConvertResult, SourceFormat, SourceImage};
use image::{ImageFormat, RgbaImage};

use crate::limits::SourceLimits;
use crate::svg;

/// Decode a source image into an RGBA raster.
///
/// PNG sources are decoded at their native resolution. SVG sources are
/// rasterized directly at the size that fits `target`, so vector input is
/// never resampled from a smaller bitmap.
pub fn decode(
    source: &SourceImage,
    target: (u32, u32),
    limits: &SourceLimits,
) -> ConvertResult<RgbaImage> {
    if source.is_empty() {
        return Err(ConvertError::Decode("empty input".to_string()));
    }

    match source.format() {
        SourceFormat::Png => decode_png(source.bytes(), limits),
        SourceFormat::Svg => svg::rasterize_svg(source.bytes(), target, limits),
    }
}

/// Decode a PNG, checking its header dimensions against `limits` first.
pub fn decode_png(bytes: &[u8], limits: &SourceLimits) -> ConvertResult<RgbaImage> {
    let (width, height) = image::io::Reader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .into_dimensions()
        .map_err(|e| ConvertError::Decode(format!("invalid PNG: {}", e)))?;

    limits.check_dimensions(width, height)?;

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| ConvertError::Decode(format!("invalid PNG: {}", e)))?;

    Ok(decoded.to_rgba8())
}
