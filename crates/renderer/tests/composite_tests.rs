//! Tests for letterbox compositing.

use gifbox_common::ConvertError;
use renderer::composite::{composite_onto, placement};
use renderer::Canvas;
use test_utils::{red_disc_image, solid_image, RED};

const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn test_placement_full_canvas() {
    assert_eq!(placement(400, 160, &Canvas::STANDARD).unwrap(), (0, 0));
}

#[test]
fn test_placement_square_is_centered() {
    assert_eq!(placement(160, 160, &Canvas::STANDARD).unwrap(), (120, 0));
}

#[test]
fn test_placement_odd_remainder_floors() {
    assert_eq!(placement(399, 133, &Canvas::STANDARD).unwrap(), (0, 13));
}

#[test]
fn test_placement_oversized_is_composite_error() {
    assert!(matches!(
        placement(401, 160, &Canvas::STANDARD),
        Err(ConvertError::Composite(_))
    ));
    assert!(matches!(
        composite_onto(&solid_image(400, 161, RED), &Canvas::STANDARD),
        Err(ConvertError::Composite(_))
    ));
}

#[test]
fn test_composite_square_has_symmetric_bars() {
    let output = composite_onto(&solid_image(160, 160, RED), &Canvas::STANDARD).unwrap();
    assert_eq!(output.dimensions(), (400, 160));

    assert_eq!(output.get_pixel(119, 80).0, WHITE);
    assert_eq!(output.get_pixel(120, 80).0, RED);
    assert_eq!(output.get_pixel(279, 80).0, RED);
    assert_eq!(output.get_pixel(280, 80).0, WHITE);

    let left = (0..120).filter(|&x| output.get_pixel(x, 0).0 == WHITE).count();
    let right = (280..400).filter(|&x| output.get_pixel(x, 0).0 == WHITE).count();
    assert_eq!(left, right);
}

#[test]
fn test_composite_flattens_transparency() {
    let output = composite_onto(&red_disc_image(400, 160), &Canvas::STANDARD).unwrap();
    assert!(output.pixels().all(|p| p[3] == 255));
    assert_eq!(output.get_pixel(0, 0).0, WHITE);
    assert_eq!(output.get_pixel(399, 159).0, WHITE);
    assert_eq!(output.get_pixel(200, 80).0, RED);
}

#[test]
fn test_composite_custom_background() {
    let canvas = Canvas {
        width: 10,
        height: 10,
        background: [0, 0, 0],
    };
    let output = composite_onto(&solid_image(2, 2, [255, 255, 255, 0]), &canvas).unwrap();
    assert!(output.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn test_composite_uses_fresh_canvas() {
    let first = composite_onto(&solid_image(400, 160, RED), &Canvas::STANDARD).unwrap();
    let second = composite_onto(&solid_image(1, 1, RED), &Canvas::STANDARD).unwrap();
    assert_eq!(first.get_pixel(0, 0).0, RED);
    assert_eq!(second.get_pixel(0, 0).0, WHITE);
}
