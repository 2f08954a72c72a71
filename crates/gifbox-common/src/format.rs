//! Source and output image wrappers.
//!
//! The hosting layer hands the pipeline a [`SourceImage`] (raw bytes plus a
//! resolved [`SourceFormat`]) and receives an [`OutputImage`] holding the
//! encoded GIF.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// gzip magic, used by compressed SVG (`.svgz`).
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// UTF-8 byte order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How far into a text document we look for the `<svg` tag.
const SVG_SNIFF_WINDOW: usize = 4096;

/// Input formats accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Png,
    Svg,
}

impl SourceFormat {
    /// All accepted formats, in the order advertised to clients.
    pub const ALL: [SourceFormat; 2] = [SourceFormat::Png, SourceFormat::Svg];

    /// MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            SourceFormat::Png => "image/png",
            SourceFormat::Svg => "image/svg+xml",
        }
    }

    /// Parse a MIME type such as `image/svg+xml; charset=utf-8`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case("image/png") {
            Some(SourceFormat::Png)
        } else if essence.eq_ignore_ascii_case("image/svg+xml") {
            Some(SourceFormat::Svg)
        } else {
            None
        }
    }

    /// Detect the format from the leading bytes of the buffer.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            return Some(SourceFormat::Png);
        }
        if bytes.starts_with(&GZIP_MAGIC) {
            return Some(SourceFormat::Svg);
        }

        let text = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        let start = text.iter().position(|b| !b.is_ascii_whitespace())?;
        let text = &text[start..];
        if text.first() != Some(&b'<') {
            return None;
        }

        let window = &text[..text.len().min(SVG_SNIFF_WINDOW)];
        window
            .windows(4)
            .any(|w| w == b"<svg")
            .then_some(SourceFormat::Svg)
    }

    /// Resolve the format of an upload.
    ///
    /// The content decides; the declared MIME hint is only consulted when the
    /// bytes are inconclusive.
    pub fn resolve(hint: Option<&str>, bytes: &[u8]) -> ConvertResult<Self> {
        if bytes.is_empty() {
            return Err(ConvertError::Decode("empty input".to_string()));
        }

        Self::sniff(bytes)
            .or_else(|| hint.and_then(Self::from_mime))
            .ok_or_else(|| ConvertError::Decode("unrecognized image format".to_string()))
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Png => write!(f, "png"),
            SourceFormat::Svg => write!(f, "svg"),
        }
    }
}

/// An uploaded image awaiting conversion. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Bytes,
    format: SourceFormat,
}

impl SourceImage {
    /// Wrap raw upload bytes, resolving their format.
    pub fn new(bytes: impl Into<Bytes>, hint: Option<&str>) -> ConvertResult<Self> {
        let bytes = bytes.into();
        let format = SourceFormat::resolve(hint, &bytes)?;
        Ok(Self { bytes, format })
    }

    /// Wrap bytes with a known format, skipping detection.
    pub fn with_format(bytes: impl Into<Bytes>, format: SourceFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The encoded GIF produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    pub bytes: Vec<u8>,
}

impl OutputImage {
    pub const CONTENT_TYPE: &'static str = "image/gif";
    pub const FILENAME: &'static str = "converted.gif";

    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition() -> String {
        format!("attachment; filename=\"{}\"", Self::FILENAME)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
