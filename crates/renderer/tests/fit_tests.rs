//! Tests for contain-fit sizing and resampling.

use gifbox_common::ConvertError;
use renderer::fit::{fit_dimensions, fit_extent, fit_to_box};
use test_utils::{assert_approx_eq, assert_pixel_approx_eq, gradient_image, red_disc_image, solid_image, RED};

const BOX_W: u32 = 400;
const BOX_H: u32 = 160;

// ============================================================================
// Size computation
// ============================================================================

#[test]
fn test_fit_same_aspect_fills_box() {
    assert_eq!(fit_dimensions(800, 320, BOX_W, BOX_H).unwrap(), (400, 160));
}

#[test]
fn test_fit_square_is_height_bound() {
    assert_eq!(fit_dimensions(400, 400, BOX_W, BOX_H).unwrap(), (160, 160));
}

#[test]
fn test_fit_tall_source() {
    assert_eq!(fit_dimensions(100, 1000, BOX_W, BOX_H).unwrap(), (16, 160));
}

#[test]
fn test_fit_upscales_small_source() {
    assert_eq!(fit_dimensions(100, 40, BOX_W, BOX_H).unwrap(), (400, 160));
    assert_eq!(fit_dimensions(1, 1, BOX_W, BOX_H).unwrap(), (160, 160));
}

#[test]
fn test_fit_exact_size_is_identity() {
    assert_eq!(fit_dimensions(400, 160, BOX_W, BOX_H).unwrap(), (400, 160));
}

#[test]
fn test_fit_extreme_aspect_keeps_one_pixel() {
    assert_eq!(fit_dimensions(100_000, 1, BOX_W, BOX_H).unwrap(), (400, 1));
    assert_eq!(fit_dimensions(1, 100_000, BOX_W, BOX_H).unwrap(), (1, 160));
}

#[test]
fn test_fit_within_box_and_touches_a_bound() {
    for (w, h) in [(37, 13), (13, 37), (401, 161), (1920, 1080), (3, 2), (640, 257)] {
        let (fw, fh) = fit_dimensions(w, h, BOX_W, BOX_H).unwrap();
        assert!(fw <= BOX_W && fh <= BOX_H, "{}x{} -> {}x{}", w, h, fw, fh);
        assert!(fw == BOX_W || fh == BOX_H, "{}x{} -> {}x{}", w, h, fw, fh);
    }
}

#[test]
fn test_fit_preserves_aspect_within_a_pixel() {
    for (w, h) in [(37, 13), (13, 37), (1920, 1080), (3, 2), (640, 257), (999, 1)] {
        let (fw, fh) = fit_dimensions(w, h, BOX_W, BOX_H).unwrap();
        let expected_h = fw as f64 * h as f64 / w as f64;
        let expected_w = fh as f64 * w as f64 / h as f64;
        assert!(
            (fh as f64 - expected_h).abs() <= 1.0 || (fw as f64 - expected_w).abs() <= 1.0,
            "{}x{} -> {}x{}",
            w,
            h,
            fw,
            fh
        );
    }
}

#[test]
fn test_fit_zero_dimension_is_resize_error() {
    assert!(matches!(
        fit_dimensions(0, 10, BOX_W, BOX_H),
        Err(ConvertError::Resize(_))
    ));
    assert!(matches!(
        fit_dimensions(10, 0, BOX_W, BOX_H),
        Err(ConvertError::Resize(_))
    ));
}

#[test]
fn test_fit_non_finite_is_resize_error() {
    assert!(matches!(
        fit_extent(f64::NAN, 10.0, BOX_W, BOX_H),
        Err(ConvertError::Resize(_))
    ));
    assert!(matches!(
        fit_extent(10.0, f64::INFINITY, BOX_W, BOX_H),
        Err(ConvertError::Resize(_))
    ));
}

#[test]
fn test_fit_fractional_extent() {
    let (w, h) = fit_extent(250.5, 50.2, BOX_W, BOX_H).unwrap();
    assert_eq!(w, 400);
    assert_approx_eq!(h, 50.2 * 400.0 / 250.5, 1.0);
}

// ============================================================================
// Resampling
// ============================================================================

#[test]
fn test_fit_to_box_downscale() {
    let fitted = fit_to_box(solid_image(800, 320, RED), BOX_W, BOX_H).unwrap();
    assert_eq!(fitted.dimensions(), (400, 160));
    assert_pixel_approx_eq!(fitted.get_pixel(200, 80).0, RED, 1);
}

#[test]
fn test_fit_to_box_upscale() {
    let fitted = fit_to_box(solid_image(10, 10, RED), BOX_W, BOX_H).unwrap();
    assert_eq!(fitted.dimensions(), (160, 160));
    assert_pixel_approx_eq!(fitted.get_pixel(80, 80).0, RED, 1);
}

#[test]
fn test_fit_to_box_exact_size_is_untouched() {
    let source = gradient_image(400, 160);
    let fitted = fit_to_box(source.clone(), BOX_W, BOX_H).unwrap();
    assert_eq!(fitted, source);
}

#[test]
fn test_fit_to_box_no_dark_fringe() {
    // Transparent pixels are stored as (0,0,0,0); resampling them with
    // straight alpha would darken the disc edge.
    let fitted = fit_to_box(red_disc_image(1000, 400), BOX_W, BOX_H).unwrap();
    for pixel in fitted.pixels() {
        if pixel[3] > 16 {
            assert!(pixel[0] >= 240, "dark fringe pixel {:?}", pixel);
        }
    }
}

#[test]
fn test_fit_to_box_zero_size_source() {
    let err = fit_to_box(solid_image(0, 0, RED), BOX_W, BOX_H).unwrap_err();
    assert!(matches!(err, ConvertError::Resize(_)));
}
