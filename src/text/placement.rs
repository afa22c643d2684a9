use std::path::{Path, PathBuf};

use image::RgbaImage;
use rusttype::{Font, Scale, point};

use crate::config::model::HAlign;
use crate::foundation::error::{CertigenError, CertigenResult};

/// Ink color for certificate text.
const TEXT_COLOR: [u8; 3] = [0, 0, 0];

/// A TrueType font loaded at a fixed pixel size.
///
/// Loaded once per batch; a missing or unparseable font file is fatal for the
/// whole batch since every row shares the same font set.
#[derive(Debug)]
pub struct LoadedFont {
    font: Font<'static>,
    scale: Scale,
}

impl LoadedFont {
    /// Read and parse a TrueType font file at the given pixel size.
    pub fn from_file(path: impl AsRef<Path>, size: u32) -> CertigenResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CertigenError::font(format!("read '{}': {e}", path.display())))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| CertigenError::font(format!("parse '{}'", path.display())))?;
        Ok(Self {
            font,
            scale: Scale::uniform(size as f32),
        })
    }

    /// Measured pixel width of `text` at this font's size.
    ///
    /// Width is the rightmost rasterized pixel of the laid-out glyph run, so
    /// an empty or whitespace-only string measures zero.
    pub fn text_width(&self, text: &str) -> u32 {
        let v_metrics = self.font.v_metrics(self.scale);
        let mut width = 0i32;
        for glyph in self.font.layout(text, self.scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                width = width.max(bb.max.x);
            }
        }
        width.max(0) as u32
    }
}

/// Compute the top-left draw origin for a string placed against an anchor.
///
/// `Center` reproduces the manual half-width mode: `x = anchor.x - width / 2`
/// (integer division), `y = anchor.y`. `Left` uses the anchor as-is.
pub fn placement_origin(anchor: (i32, i32), align: HAlign, text_width: u32) -> (i32, i32) {
    match align {
        HAlign::Center => (anchor.0 - (text_width as i32) / 2, anchor.1),
        HAlign::Left => anchor,
    }
}

/// Rasterize `text` onto `img` in black, with `origin` as the top-left corner
/// of the glyph run.
///
/// Glyph coverage is alpha-blended over the existing pixels; anything falling
/// outside the image bounds is clipped.
pub fn draw_text(img: &mut RgbaImage, font: &LoadedFont, origin: (i32, i32), text: &str) {
    let v_metrics = font.font.v_metrics(font.scale);
    let start = point(origin.0 as f32, origin.1 as f32 + v_metrics.ascent);

    for glyph in font.font.layout(text, font.scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 {
                return;
            }
            let (px, py) = (px as u32, py as u32);
            if px >= img.width() || py >= img.height() {
                return;
            }
            let alpha = coverage.clamp(0.0, 1.0);
            if alpha <= 0.0 {
                return;
            }
            let dst = img.get_pixel_mut(px, py);
            let inv = 1.0 - alpha;
            for c in 0..3 {
                dst.0[c] = (TEXT_COLOR[c] as f32 * alpha + dst.0[c] as f32 * inv) as u8;
            }
            dst.0[3] = 255;
        });
    }
}

/// Locate a TrueType font on the host system, if any.
///
/// Scans the conventional font directories and returns the first file that
/// parses as a TrueType font. Tests that need a real font probe this and skip
/// when the host has none.
pub fn system_font_path() -> Option<PathBuf> {
    const ROOTS: &[&str] = &[
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "/Library/Fonts",
        "C:\\Windows\\Fonts",
    ];
    ROOTS.iter().find_map(|root| scan_fonts(Path::new(root)))
}

fn scan_fonts(dir: &Path) -> Option<PathBuf> {
    let mut entries: Vec<_> = std::fs::read_dir(dir).ok()?.flatten().collect();
    entries.sort_by_key(|e| e.path());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = scan_fonts(&path) {
                return Some(found);
            }
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
            && std::fs::read(&path).ok().and_then(Font::try_from_vec).is_some()
        {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/text/placement.rs"]
mod tests;
