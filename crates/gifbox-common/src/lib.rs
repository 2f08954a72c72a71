//! Common types shared across the gifbox crates and services.

pub mod error;
pub mod format;

pub use error::{ConvertError, ConvertResult};
pub use format::{OutputImage, SourceFormat, SourceImage};
