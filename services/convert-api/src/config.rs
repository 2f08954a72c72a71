//! Service configuration: conversion limits taken from the command line or
//! the environment.

use clap::Args;
use renderer::limits::{DEFAULT_MAX_PIXELS, DEFAULT_MAX_SVG_BYTES};
use renderer::SourceLimits;

/// Default ceiling on the whole multipart request body (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Runtime configuration for the conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// Ceilings applied to each decoded source.
    pub limits: SourceLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            limits: SourceLimits::default(),
        }
    }
}

/// Upload and decode limits, flattened into the server's `Args`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LimitArgs {
    /// Maximum request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "GIFBOX_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    /// Maximum width * height of a PNG source
    #[arg(long, default_value_t = DEFAULT_MAX_PIXELS, env = "GIFBOX_MAX_SOURCE_PIXELS")]
    pub max_source_pixels: u64,

    /// Maximum SVG document size in bytes, after gzip inflation
    #[arg(long, default_value_t = DEFAULT_MAX_SVG_BYTES, env = "GIFBOX_MAX_SVG_BYTES")]
    pub max_svg_bytes: usize,
}

impl From<LimitArgs> for ServiceConfig {
    fn from(args: LimitArgs) -> Self {
        Self {
            max_upload_bytes: args.max_upload_bytes,
            limits: SourceLimits {
                max_pixels: args.max_source_pixels,
                max_svg_bytes: args.max_svg_bytes,
            },
        }
    }
}
