use image::{Rgba, RgbaImage, imageops};
use qrcode::{Color, EcLevel, QrCode};

use crate::foundation::error::{CertigenError, CertigenResult};
use crate::roster::model::RosterRow;

/// Final edge length of the embedded QR image, in pixels.
pub const QR_SIZE_PX: u32 = 150;

/// Margin between the QR image and the template's right edge.
const MARGIN_RIGHT_PX: u32 = 60;
/// Margin between the QR image and the template's bottom edge.
const MARGIN_BOTTOM_PX: u32 = 70;

/// Serialize a row's identity fields into the scannable payload.
///
/// Pure function of the row data; the roll-number line is present only when
/// the roster carries one.
pub fn qr_payload(row: &RosterRow) -> String {
    let mut payload = format!("Name: {}", row.name);
    if let Some(roll) = &row.roll_number {
        payload.push_str(&format!("\nRoll No: {roll}"));
    }
    payload.push_str(&format!("\nCollege: {}", row.institution));
    payload
}

/// Encode a payload string into a black-on-white QR image of exactly
/// [`QR_SIZE_PX`] × [`QR_SIZE_PX`].
///
/// Error correction level H tolerates print reproduction. Modules are scaled
/// to the largest integer multiple that fits, then nearest-neighbor resized to
/// the exact target so module edges stay crisp.
pub fn encode_qr(payload: &str) -> CertigenResult<RgbaImage> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| CertigenError::render(format!("qr encode: {e}")))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = (QR_SIZE_PX / module_count).max(1);
    let scaled = module_count * scale;

    let mut img = RgbaImage::from_pixel(scaled, scaled, Rgba([255, 255, 255, 255]));
    for (i, color) in modules.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x * scale + dx, y * scale + dy, Rgba([0, 0, 0, 255]));
            }
        }
    }

    if scaled != QR_SIZE_PX {
        img = imageops::resize(&img, QR_SIZE_PX, QR_SIZE_PX, imageops::FilterType::Nearest);
    }
    Ok(img)
}

/// Top-left paste position for the QR image on a template of the given
/// dimensions: bottom-right corner, fixed margins, clamped to the canvas.
pub fn qr_origin(template_w: u32, template_h: u32) -> (i64, i64) {
    let x = template_w.saturating_sub(QR_SIZE_PX + MARGIN_RIGHT_PX);
    let y = template_h.saturating_sub(QR_SIZE_PX + MARGIN_BOTTOM_PX);
    (i64::from(x), i64::from(y))
}

#[cfg(test)]
#[path = "../../tests/unit/qr/encode.rs"]
mod tests;
