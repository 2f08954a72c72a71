//! Common test fixtures for conversion tests.
//!
//! This module provides pre-defined inputs that represent common (and
//! commonly broken) uploads.

/// SVG documents.
pub mod svg {
    /// Wide logo: 300x100 intrinsic size, blue bar on transparent background.
    pub const WIDE_LOGO: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="300" height="100" viewBox="0 0 300 100">
  <rect x="0" y="25" width="300" height="50" fill="#0000ff"/>
</svg>"##;

    /// Only a viewBox; the intrinsic size comes from it (20x10).
    pub const VIEWBOX_ONLY: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10">
  <rect width="20" height="10" fill="#00ff00"/>
</svg>"##;

    /// Square document fully covered by opaque black.
    pub const BLACK_SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="50">
  <rect width="50" height="50" fill="black"/>
</svg>"#;

    /// No width, height or viewBox.
    pub const NO_DIMENSIONS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <circle cx="10" cy="10" r="5" fill="red"/>
</svg>"#;

    /// References a file on the server's disk.
    pub const EXTERNAL_IMAGE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="100" height="100">
  <image xlink:href="file:///etc/passwd" width="100" height="100"/>
</svg>"#;

    /// A banner that is nothing but text.
    pub const TEXT_BANNER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="80">
  <text x="10" y="60" font-family="sans-serif" font-size="60" fill="black">Hello</text>
</svg>"#;

    /// Unclosed tags.
    pub const MALFORMED: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"></svg>"#;
}

/// Byte buffers that must never decode.
pub mod corrupt {
    /// PNG signature followed by garbage.
    pub const PNG_SIGNATURE_ONLY: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// Random-looking bytes with no recognizable header.
    pub const NOISE: &[u8] = &[0x13, 0x37, 0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0xFF, 0x42];

    /// Truncate a valid buffer to `len` bytes.
    pub fn truncated(data: &[u8], len: usize) -> Vec<u8> {
        data[..len.min(data.len())].to_vec()
    }
}
