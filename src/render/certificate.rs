use std::path::{Path, PathBuf};

use image::{RgbaImage, imageops};

use crate::config::model::{FontSpec, RenderConfig};
use crate::foundation::error::{CertigenError, CertigenResult};
use crate::qr::encode::{encode_qr, qr_origin, qr_payload};
use crate::roster::model::RosterRow;
use crate::text::placement::{LoadedFont, draw_text, placement_origin};

/// Render seam: turn one roster row into one artifact on disk.
///
/// The orchestrator drives the batch through this trait so tests can swap in
/// a fake renderer.
pub trait RenderRow {
    /// Render the certificate for `row`, returning the artifact path.
    fn render(&self, row: &RosterRow) -> CertigenResult<PathBuf>;
}

/// Output filename for a row: `{Roll_No}_{Name}.png` when a roll number is
/// present (keeps filenames distinct even for identical names), `{Name}.png`
/// otherwise.
pub fn artifact_file_name(row: &RosterRow) -> String {
    match &row.roll_number {
        Some(roll) => format!("{roll}_{}.png", row.name),
        None => format!("{}.png", row.name),
    }
}

/// Composites certificates for one batch.
///
/// All batch-constant IO happens at construction: the template is decoded,
/// both fonts are parsed, and the output directory is created. Per-row
/// rendering then only clones the template, draws, and writes one PNG.
/// Re-rendering the same row overwrites the artifact at the same derived path.
#[derive(Debug)]
pub struct CertificateRenderer {
    template: RgbaImage,
    name_font: LoadedFont,
    institution_font: LoadedFont,
    name_spec: FontSpec,
    institution_spec: FontSpec,
    qr: bool,
    out_dir: PathBuf,
}

impl CertificateRenderer {
    /// Load the template and fonts for a batch and prepare the output
    /// directory. Any failure here aborts the batch before the first row.
    pub fn new(config: &RenderConfig, out_dir: impl Into<PathBuf>) -> CertigenResult<Self> {
        let template = image::open(&config.template)
            .map_err(|e| {
                CertigenError::render(format!(
                    "open template '{}': {e}",
                    config.template.display()
                ))
            })?
            .to_rgba8();

        let name_font = LoadedFont::from_file(&config.name.font, config.name.size)?;
        let institution_font =
            LoadedFont::from_file(&config.institution.font, config.institution.size)?;

        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir).map_err(|e| {
            CertigenError::render(format!("create output dir '{}': {e}", out_dir.display()))
        })?;

        Ok(Self {
            template,
            name_font,
            institution_font,
            name_spec: config.name.clone(),
            institution_spec: config.institution.clone(),
            qr: config.qr,
            out_dir,
        })
    }

    /// Path the artifact for `row` will be written to.
    pub fn output_path(&self, row: &RosterRow) -> PathBuf {
        self.out_dir.join(artifact_file_name(row))
    }

    /// Directory artifacts are written into.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn draw_field(&self, img: &mut RgbaImage, spec: &FontSpec, font: &LoadedFont, text: &str) {
        let width = font.text_width(text);
        let origin = placement_origin(spec.anchor, spec.align, width);
        draw_text(img, font, origin, text);
    }
}

impl RenderRow for CertificateRenderer {
    fn render(&self, row: &RosterRow) -> CertigenResult<PathBuf> {
        let mut img = self.template.clone();

        self.draw_field(&mut img, &self.name_spec, &self.name_font, &row.name);
        self.draw_field(
            &mut img,
            &self.institution_spec,
            &self.institution_font,
            &row.institution,
        );

        if self.qr {
            let code = encode_qr(&qr_payload(row))?;
            let (x, y) = qr_origin(img.width(), img.height());
            imageops::overlay(&mut img, &code, x, y);
        }

        let path = self.output_path(row);
        img.save(&path)
            .map_err(|e| CertigenError::render(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/certificate.rs"]
mod tests;
