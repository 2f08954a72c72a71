//! Resource ceilings applied to untrusted uploads before full decoding.

use gifbox_common::{ConvertError, ConvertResult};

/// Default ceiling on decoded source pixels (4096 x 4096).
pub const DEFAULT_MAX_PIXELS: u64 = 4096 * 4096;

/// Default ceiling on SVG document size after gzip inflation (8 MiB).
pub const DEFAULT_MAX_SVG_BYTES: usize = 8 * 1024 * 1024;

/// Limits on what a single conversion may allocate for its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLimits {
    /// Maximum width * height of a raster source.
    pub max_pixels: u64,
    /// Maximum SVG document size in bytes, after decompression.
    pub max_svg_bytes: usize,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            max_svg_bytes: DEFAULT_MAX_SVG_BYTES,
        }
    }
}

impl SourceLimits {
    /// Reject a raster source whose declared dimensions exceed the ceiling.
    pub fn check_dimensions(&self, width: u32, height: u32) -> ConvertResult<()> {
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            return Err(ConvertError::Decode(format!(
                "source is {}x{} ({} pixels), exceeds limit of {} pixels",
                width, height, pixels, self.max_pixels
            )));
        }
        Ok(())
    }

    /// Reject an SVG document larger than the ceiling.
    pub fn check_svg_len(&self, len: usize) -> ConvertResult<()> {
        if len > self.max_svg_bytes {
            return Err(ConvertError::Decode(format!(
                "SVG document exceeds limit of {} bytes",
                self.max_svg_bytes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_within_limit() {
        let limits = SourceLimits::default();
        assert!(limits.check_dimensions(4096, 4096).is_ok());
    }

    #[test]
    fn test_dimensions_over_limit() {
        let limits = SourceLimits {
            max_pixels: 100,
            ..Default::default()
        };
        let err = limits.check_dimensions(11, 10).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_dimensions_do_not_overflow() {
        let limits = SourceLimits::default();
        assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_err());
    }
}
