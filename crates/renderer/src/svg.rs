//! SVG rasterization.
//!
//! Documents are validated with a streaming XML pass before `usvg` sees them:
//! - the root element must be `<svg>`
//! - the root must declare at least one of `width`, `height` or `viewBox`
//! - `<image>`, `<feImage>` and `<use>` may only reference inline `data:`
//!   URIs or fragments of the same document
//! - `<text>` needs at least one font in the shared font database
//!
//! The parsed tree is then rendered with `resvg` straight to the fitted size.
//! `usvg` never resolves non-`data:` hrefs itself, so nothing is read from
//! disk even if the scan misses a reference.

use std::borrow::Cow;
use std::io::Read;
use std::sync::Arc;

use flate2::read::GzDecoder;
use gifbox_common::{ConvertError, ConvertResult};
use image::{Rgba, RgbaImage};
use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use usvg::fontdb;

use crate::fit::fit_extent;
use crate::limits::SourceLimits;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// System fonts, loaded once per process and shared by every conversion.
static SYSTEM_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Facts gathered by the structural scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DocumentInfo {
    has_text: bool,
}

/// Rasterize an SVG (or gzip-compressed SVG) to fit inside `target`.
pub fn rasterize_svg(
    bytes: &[u8],
    target: (u32, u32),
    limits: &SourceLimits,
) -> ConvertResult<RgbaImage> {
    let document = inflate_if_compressed(bytes, limits)?;
    limits.check_svg_len(document.len())?;
    let info = probe_document(&document)?;

    let fonts = font_database();
    if info.has_text && fonts.faces().next().is_none() {
        return Err(ConvertError::Decode(
            "SVG contains text but no fonts are available".to_string(),
        ));
    }

    let mut opt = usvg::Options {
        fontdb: fonts,
        ..Default::default()
    };
    opt.image_href_resolver.resolve_string = Box::new(resolve_no_external);

    let tree = usvg::Tree::from_data(&document, &opt)
        .map_err(|e| ConvertError::Decode(format!("invalid SVG: {}", e)))?;

    let size = tree.size();
    let (width, height) = fit_extent(
        size.width() as f64,
        size.height() as f64,
        target.0,
        target.1,
    )?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ConvertError::Decode(format!("cannot allocate {}x{} pixmap", width, height))
    })?;

    // Scale each axis independently so the document covers the whole pixmap;
    // rounding keeps the distortion below one pixel.
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba(&pixmap))
}

/// Shared font database used for `<text>` rendering.
pub fn font_database() -> Arc<fontdb::Database> {
    Arc::clone(&SYSTEM_FONTS)
}

/// `usvg` hook for hrefs that are not `data:` URIs: never load them.
fn resolve_no_external(_href: &str, _opt: &usvg::Options) -> Option<usvg::ImageKind> {
    None
}

/// Convert a premultiplied pixmap into a straight-alpha raster.
fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut raster = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in raster.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    raster
}

/// Inflate `.svgz` input, bounded by the SVG size limit.
fn inflate_if_compressed<'a>(
    bytes: &'a [u8],
    limits: &SourceLimits,
) -> ConvertResult<Cow<'a, [u8]>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut inflated = Vec::new();
    GzDecoder::new(bytes)
        .take(limits.max_svg_bytes as u64 + 1)
        .read_to_end(&mut inflated)
        .map_err(|e| ConvertError::Decode(format!("invalid gzip stream: {}", e)))?;

    limits.check_svg_len(inflated.len())?;
    Ok(Cow::Owned(inflated))
}

/// Validate document structure without building a tree.
fn probe_document(document: &[u8]) -> ConvertResult<DocumentInfo> {
    let mut reader = Reader::from_reader(document);
    let mut buf = Vec::new();
    let mut seen_root = false;
    let mut info = DocumentInfo::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if !seen_root {
                    if element.local_name().as_ref() != b"svg" {
                        return Err(ConvertError::Decode(
                            "root element is not <svg>".to_string(),
                        ));
                    }
                    check_root_dimensions(&element)?;
                    seen_root = true;
                } else {
                    match element.local_name().as_ref() {
                        b"image" => check_href(&element, false)?,
                        b"feImage" | b"use" => check_href(&element, true)?,
                        b"text" => info.has_text = true,
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ConvertError::Decode(format!(
                    "malformed SVG at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
        buf.clear();
    }

    if !seen_root {
        return Err(ConvertError::Decode(
            "document contains no <svg> element".to_string(),
        ));
    }
    Ok(info)
}

/// Require an explicit size or coordinate system on the root element.
fn check_root_dimensions(root: &BytesStart<'_>) -> ConvertResult<()> {
    for attr in root.attributes() {
        let attr = attr.map_err(|e| ConvertError::Decode(format!("malformed SVG: {}", e)))?;
        if matches!(
            attr.key.local_name().as_ref(),
            b"width" | b"height" | b"viewBox"
        ) {
            return Ok(());
        }
    }

    Err(ConvertError::Decode(
        "SVG declares none of width, height or viewBox".to_string(),
    ))
}

/// Reject references to anything other than inline data.
///
/// `allow_fragment` permits same-document references such as `#logo`.
fn check_href(element: &BytesStart<'_>, allow_fragment: bool) -> ConvertResult<()> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ConvertError::Decode(format!("malformed SVG: {}", e)))?;
        if attr.key.local_name().as_ref() != b"href" {
            continue;
        }

        let value = attr.value.as_ref();
        let start = value
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(value.len());
        let href = &value[start..];
        if href.is_empty() || (allow_fragment && href.starts_with(b"#")) {
            continue;
        }
        let is_inline = href.len() >= 5 && href[..5].eq_ignore_ascii_case(b"data:");
        if !is_inline {
            return Err(ConvertError::Decode(format!(
                "SVG references external resource '{}'",
                String::from_utf8_lossy(href)
            )));
        }
    }
    Ok(())
}
