//! End-to-end: real files in, real files out, through the public API only.

use image::{ImageFormat, Rgb, RgbImage};
use passport_photo::config::{EditorConfig, load_config};
use passport_photo::imaging::{AdjustmentParams, Dimension, ExportFormat, enhance};
use passport_photo::presets::Preset;
use passport_photo::session::{Session, SessionError, SessionState};
use std::path::Path;
use tempfile::TempDir;

fn portrait(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (90 + (x * 120) / width) as u8,
            (70 + (y * 110) / height) as u8,
            (60 + ((x + y) % 50)) as u8,
        ])
    })
}

fn write(path: &Path, image: &RgbImage, format: ImageFormat) {
    image.save_with_format(path, format).unwrap();
}

#[test]
fn png_in_png_out_matches_pipeline_exactly() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("me.png");
    let src = portrait(60, 80);
    write(&input, &src, ImageFormat::Png);

    let mut session = Session::new(EditorConfig::default());
    session.load(&input).unwrap();
    session.apply_preset("visa").unwrap();
    session.set_param(Dimension::Sharpness, 1.5).unwrap();

    let output = tmp.path().join("out.png");
    assert_eq!(session.export(&output).unwrap().format, ExportFormat::Png);

    let saved = image::open(&output).unwrap().into_rgb8();
    let expected = enhance::apply(&src, &Preset::Visa.params().with(Dimension::Sharpness, 1.5));
    assert_eq!(saved, expected);
}

#[test]
fn jpeg_in_default_name_out() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("IMG_0042.jpg");
    write(&input, &portrait(120, 160), ImageFormat::Jpeg);

    let mut session = Session::default();
    session.load(&input).unwrap();
    assert_eq!(session.params(), Some(AdjustmentParams::default()));

    let saved_path = session.export_default().unwrap();
    assert_eq!(saved_path, tmp.path().join("IMG_0042_whitened.jpg"));

    let saved = image::open(&saved_path).unwrap();
    assert_eq!((saved.width(), saved.height()), (120, 160));
}

#[test]
fn export_overwrites_existing_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("me.bmp");
    write(&input, &portrait(10, 10), ImageFormat::Bmp);
    let output = tmp.path().join("out.bmp");
    std::fs::write(&output, b"stale").unwrap();

    let mut session = Session::default();
    session.load(&input).unwrap();
    session.export(&output).unwrap();

    let saved = image::open(&output).unwrap();
    assert_eq!((saved.width(), saved.height()), (10, 10));
}

#[test]
fn corrupt_file_keeps_previous_photo() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.png");
    write(&good, &portrait(20, 20), ImageFormat::Png);
    let bad = tmp.path().join("bad.jpg");
    std::fs::write(&bad, b"not a photo").unwrap();

    let mut session = Session::default();
    session.load(&good).unwrap();
    let err = session.load(&bad).unwrap_err();

    assert!(matches!(err, SessionError::Decode { .. }));
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.source_path(), Some(good.as_path()));
}

#[test]
fn bare_output_name_saves_as_jpeg() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("me.png");
    write(&input, &portrait(30, 40), ImageFormat::Png);

    let mut session = Session::default();
    session.load(&input).unwrap();
    let exported = session.export(tmp.path().join("passport")).unwrap();

    assert_eq!(exported.path, tmp.path().join("passport.jpg"));
    let bytes = std::fs::read(&exported.path).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    let saved = image::open(&exported.path).unwrap();
    assert_eq!((saved.width(), saved.height()), (30, 40));
}

#[test]
fn failed_export_keeps_previous_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("me.png");
    write(&input, &portrait(8, 8), ImageFormat::Png);
    let output = tmp.path().join("out.webp");
    std::fs::write(&output, b"earlier").unwrap();

    let mut session = Session::default();
    session.load(&input).unwrap();
    assert!(session.export(&output).is_err());
    assert_eq!(std::fs::read(&output).unwrap(), b"earlier");
}

#[test]
fn export_into_missing_directory_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("me.png");
    write(&input, &portrait(8, 8), ImageFormat::Png);

    let mut session = Session::default();
    session.load(&input).unwrap();
    let err = session
        .export(tmp.path().join("nope").join("out.jpg"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Encode { .. }));
}

#[test]
fn config_file_drives_suggested_name_and_preview() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        r#"
[export]
format = "png"
suffix = "_id"

[preview]
max_width = 40
max_height = 40
"#,
    )
    .unwrap();
    let input = tmp.path().join("me.jpg");
    write(&input, &portrait(100, 200), ImageFormat::Jpeg);

    let config = load_config(tmp.path()).unwrap();
    let mut session = Session::new(config);
    session.load(&input).unwrap();

    assert_eq!(
        session.suggested_export_path(),
        Some(tmp.path().join("me_id.png"))
    );
    assert_eq!(session.preview().unwrap().dimensions(), (20, 40));
}
