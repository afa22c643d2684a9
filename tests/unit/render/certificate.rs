use super::*;

use crate::config::model::HAlign;
use crate::text::placement::system_font_path;

fn row(name: &str, roll: Option<&str>) -> RosterRow {
    RosterRow {
        name: name.into(),
        institution: "ABC".into(),
        email: "a@x.com".into(),
        roll_number: roll.map(str::to_owned),
    }
}

#[test]
fn filename_includes_roll_number_when_present() {
    assert_eq!(artifact_file_name(&row("Asha", None)), "Asha.png");
    assert_eq!(artifact_file_name(&row("Asha", Some("101"))), "101_Asha.png");
}

#[test]
fn filenames_stay_distinct_for_identical_names() {
    let a = artifact_file_name(&row("A Kumar", Some("101")));
    let b = artifact_file_name(&row("A Kumar", Some("102")));
    assert_eq!(a, "101_A Kumar.png");
    assert_eq!(b, "102_A Kumar.png");
    assert_ne!(a, b);
}

fn test_config(dir: &std::path::Path, font: &std::path::Path, qr: bool) -> RenderConfig {
    let template = dir.join("template.png");
    image::RgbaImage::from_pixel(500, 400, image::Rgba([255, 255, 255, 255]))
        .save(&template)
        .unwrap();
    let spec = |anchor| FontSpec {
        font: font.to_path_buf(),
        size: 24,
        anchor,
        align: HAlign::Center,
    };
    RenderConfig {
        template,
        name: spec((250, 150)),
        institution: spec((250, 200)),
        qr,
    }
}

#[test]
fn missing_template_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig {
        template: dir.path().join("absent.png"),
        name: FontSpec {
            font: dir.path().join("absent.ttf"),
            size: 24,
            anchor: (0, 0),
            align: HAlign::Center,
        },
        institution: FontSpec {
            font: dir.path().join("absent.ttf"),
            size: 24,
            anchor: (0, 0),
            align: HAlign::Center,
        },
        qr: false,
    };
    let err = CertificateRenderer::new(&config, dir.path().join("out")).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn render_writes_one_artifact_per_row_and_is_deterministic() {
    let Some(font) = system_font_path() else {
        eprintln!("skipping: no system TrueType font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &font, false);
    let out_dir = dir.path().join("certificates");
    let renderer = CertificateRenderer::new(&config, &out_dir).unwrap();

    let path = renderer.render(&row("Asha", None)).unwrap();
    assert_eq!(path, out_dir.join("Asha.png"));
    assert!(path.exists());
    let first = std::fs::read(&path).unwrap();

    // Same row, same config: byte-identical artifact (overwritten in place).
    renderer.render(&row("Asha", None)).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), first);
}

#[test]
fn render_marks_the_template() {
    let Some(font) = system_font_path() else {
        eprintln!("skipping: no system TrueType font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &font, false);
    let renderer = CertificateRenderer::new(&config, dir.path().join("out")).unwrap();

    let path = renderer.render(&row("Asha", None)).unwrap();
    let rendered = image::open(&path).unwrap().to_rgba8();
    let blank = image::open(&config.template).unwrap().to_rgba8();
    assert_ne!(rendered.as_raw(), blank.as_raw());
}

#[test]
fn qr_variant_pastes_code_bottom_right() {
    let Some(font) = system_font_path() else {
        eprintln!("skipping: no system TrueType font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &font, true);
    let renderer = CertificateRenderer::new(&config, dir.path().join("out")).unwrap();

    let path = renderer.render(&row("Asha", Some("101"))).unwrap();
    let rendered = image::open(&path).unwrap().to_rgba8();

    // Template is 500x400; the code occupies [290, 440) x [180, 330).
    let region_has_dark = (290..440)
        .flat_map(|x| (180..330).map(move |y| (x, y)))
        .any(|(x, y)| rendered.get_pixel(x, y).0 == [0, 0, 0, 255]);
    assert!(region_has_dark);
}
