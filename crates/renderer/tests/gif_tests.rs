//! Tests for GIF encoding.

use gifbox_common::ConvertError;
use image::ImageFormat;
use image::{Rgba, RgbaImage};
use renderer::gif::{encode_gif, encode_gif_with_speed, QUANTIZE_SPEED};
use renderer::Canvas;
use test_utils::{assert_pixel_approx_eq, gradient_image, solid_image, RED};

#[test]
fn test_encode_gif_signature() {
    let gif = encode_gif(&Canvas::STANDARD.blank()).unwrap();
    assert_eq!(&gif[0..6], b"GIF89a");
    assert_eq!(gif.last(), Some(&0x3B)); // trailer
}

#[test]
fn test_encode_gif_decodes_to_canvas_size() {
    let gif = encode_gif(&solid_image(400, 160, RED)).unwrap();
    let decoded = image::load_from_memory_with_format(&gif, ImageFormat::Gif)
        .unwrap()
        .to_rgba8();

    assert_eq!(decoded.dimensions(), (400, 160));
    assert!(decoded.pixels().all(|p| p[3] == 255));
    assert_pixel_approx_eq!(decoded.get_pixel(10, 10).0, RED, 8);
}

#[test]
fn test_encode_gif_is_deterministic() {
    let raster = gradient_image(400, 160);
    assert_eq!(encode_gif(&raster).unwrap(), encode_gif(&raster).unwrap());
}

#[test]
fn test_encode_gif_rejects_transparency() {
    let err = encode_gif(&solid_image(4, 4, [0, 0, 0, 0])).unwrap_err();
    assert!(matches!(err, ConvertError::Encode(_)));
}

#[test]
fn test_encode_gif_rejects_oversized_raster() {
    let err = encode_gif(&solid_image(70_000, 1, RED)).unwrap_err();
    assert!(matches!(err, ConvertError::Encode(_)));
}

/// More than 256 distinct colours, so the encoder has to quantize.
fn many_colours(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8, 255])
    })
}

#[test]
fn test_encode_gif_speed_changes_quantization() {
    let raster = many_colours(400, 160);
    let fast = encode_gif_with_speed(&raster, 30).unwrap();
    let default = encode_gif_with_speed(&raster, QUANTIZE_SPEED).unwrap();
    assert_ne!(fast, default);
    assert_eq!(encode_gif(&raster).unwrap(), default);
}

#[test]
fn test_encode_gif_out_of_range_speed_is_clamped() {
    let raster = solid_image(8, 8, RED);
    assert_eq!(
        encode_gif_with_speed(&raster, 0).unwrap(),
        encode_gif_with_speed(&raster, 1).unwrap()
    );
    assert!(encode_gif_with_speed(&raster, 99).is_ok());
}
