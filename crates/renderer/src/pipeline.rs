//! The normalization pipeline: decode -> fit -> composite -> encode.
//!
//! A [`Pipeline`] holds only immutable configuration, so one instance can be
//! shared across threads. Every call allocates its own rasters and either
//! returns the finished GIF or the first stage error; there is no partial
//! output and nothing is logged here.

use std::time::{Duration, Instant};

use gifbox_common::{ConvertResult, OutputImage, SourceImage};
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::composite::composite_onto;
use crate::decode::decode;
use crate::fit::fit_to_box;
use crate::gif::encode_gif;
use crate::limits::SourceLimits;

/// Wall-clock time spent in each stage of one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub decode: Duration,
    pub fit: Duration,
    pub composite: Duration,
    pub encode: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.decode + self.fit + self.composite + self.encode
    }
}

/// Converts uploaded PNG/SVG images into letterboxed GIFs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    canvas: Canvas,
    limits: SourceLimits,
}

impl Pipeline {
    pub fn new(canvas: Canvas, limits: SourceLimits) -> Self {
        Self { canvas, limits }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn limits(&self) -> &SourceLimits {
        &self.limits
    }

    /// Run decode, fit and composite, returning the opaque canvas raster.
    pub fn render(&self, source: &SourceImage) -> ConvertResult<RgbaImage> {
        self.render_with_timings(source, &mut StageTimings::default())
    }

    /// Run the full pipeline and return the encoded GIF.
    pub fn run(&self, source: &SourceImage) -> ConvertResult<OutputImage> {
        self.run_timed(source).map(|(output, _)| output)
    }

    /// Run the full pipeline, also reporting per-stage timings.
    pub fn run_timed(&self, source: &SourceImage) -> ConvertResult<(OutputImage, StageTimings)> {
        let mut timings = StageTimings::default();
        let composited = self.render_with_timings(source, &mut timings)?;

        let start = Instant::now();
        let gif = encode_gif(&composited)?;
        timings.encode = start.elapsed();

        Ok((OutputImage::new(gif), timings))
    }

    fn render_with_timings(
        &self,
        source: &SourceImage,
        timings: &mut StageTimings,
    ) -> ConvertResult<RgbaImage> {
        let (box_width, box_height) = self.canvas.dimensions();

        let start = Instant::now();
        let decoded = decode(source, (box_width, box_height), &self.limits)?;
        timings.decode = start.elapsed();

        let start = Instant::now();
        let fitted = fit_to_box(decoded, box_width, box_height)?;
        timings.fit = start.elapsed();

        let start = Instant::now();
        let composited = composite_onto(&fitted, &self.canvas)?;
        timings.composite = start.elapsed();

        Ok(composited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pipeline_is_shareable() {
        assert_send_sync::<Pipeline>();
    }

    #[test]
    fn test_timings_total() {
        let timings = StageTimings {
            decode: Duration::from_millis(1),
            fit: Duration::from_millis(2),
            composite: Duration::from_millis(3),
            encode: Duration::from_millis(4),
        };
        assert_eq!(timings.total(), Duration::from_millis(10));
    }
}
