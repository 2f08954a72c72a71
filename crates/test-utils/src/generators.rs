//! Generators for synthetic source images.
//!
//! These create predictable, verifiable inputs (solid fills, a red disc on a
//! transparent background, gradients) encoded the same way a browser upload
//! would deliver them.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};

/// Opaque red used by the disc generators.
pub const RED: [u8; 4] = [255, 0, 0, 255];

/// Encode an RGBA raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut data = Vec::new();
    PngEncoder::new(&mut data)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .expect("PNG encoding of an in-memory raster cannot fail");
    data
}

/// A raster filled with a single colour.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// PNG bytes of a raster filled with a single colour.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode_png(&solid_image(width, height, rgba))
}

/// A fully transparent raster with an opaque red disc in the middle.
///
/// The disc radius is 40% of the shorter side, so the raster's corners are
/// always transparent.
pub fn red_disc_image(width: u32, height: u32) -> RgbaImage {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = width.min(height) as f64 * 0.4;

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        if dx * dx + dy * dy <= radius * radius {
            Rgba(RED)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// PNG bytes of [`red_disc_image`].
pub fn red_disc_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&red_disc_image(width, height))
}

/// A horizontal opaque gradient from black to blue.
///
/// Useful for checking that resampling preserves ordering of colours.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let t = if width > 1 {
            (x as f64 / (width - 1) as f64 * 255.0).round() as u8
        } else {
            0
        };
        Rgba([0, 0, t, 255])
    })
}

/// An SVG document with the given intrinsic size and a single filled rect.
pub fn svg_rect(width: u32, height: u32, fill: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/></svg>"#,
        w = width,
        h = height,
        fill = fill
    )
}

/// Gzip-compress a document, producing `.svgz` bytes.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .expect("writing to an in-memory gzip stream cannot fail");
    encoder
        .finish()
        .expect("finishing an in-memory gzip stream cannot fail")
}
