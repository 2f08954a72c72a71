//! Image normalization for uploaded PNG and SVG files.
//!
//! Stages, in order:
//! - Decode / rasterize ([`decode`], [`svg`])
//! - Contain-fit resize ([`fit`])
//! - Letterbox onto an opaque canvas ([`composite`])
//! - GIF encoding ([`gif`])
//!
//! [`Pipeline`] chains them for a single upload.

pub mod canvas;
pub mod composite;
pub mod decode;
pub mod fit;
pub mod gif;
pub mod limits;
pub mod pipeline;
pub mod svg;

pub use canvas::Canvas;
pub use limits::SourceLimits;
pub use pipeline::{Pipeline, StageTimings};
