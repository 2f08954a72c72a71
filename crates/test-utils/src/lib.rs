//! Shared test utilities for the gifbox workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic PNG/SVG generators
//! - Common test fixtures (documents, corrupt buffers)
//! - Approximate comparison macros for pixels and ratios
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, solid_png};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting that two RGBA pixels match channel-wise within a tolerance.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_approx_eq;
///
/// assert_pixel_approx_eq!([254, 0, 1, 255], [255, 0, 0, 255], 2);
/// ```
#[macro_export]
macro_rules! assert_pixel_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: [u8; 4] = $left;
        let right: [u8; 4] = $right;
        let tolerance: i32 = $tolerance as i32;
        let within = left
            .iter()
            .zip(right.iter())
            .all(|(l, r)| (*l as i32 - *r as i32).abs() <= tolerance);
        if !within {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  tolerance: `{}`",
                left, right, tolerance
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_pixel_approx_eq_passes() {
        assert_pixel_approx_eq!([254, 0, 1, 255], [255, 0, 0, 255], 1);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_pixel_approx_eq_fails() {
        assert_pixel_approx_eq!([200, 0, 0, 255], [255, 0, 0, 255], 5);
    }
}
