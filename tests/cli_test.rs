use hide_npng::cli::{capacity_command, extract_command, hide_command};
use hide_npng::processing::image_io::{load_image, save_image};
use hide_npng::CodecConfig;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    });
    let path = dir.join(name);
    save_image(&image, &path).unwrap();
    path
}

#[test]
fn test_hide_extract_document() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.png", 200, 200);

    let doc_path = dir.path().join("notes.txt");
    fs::write(&doc_path, b"This is a secret document.\nLine two.").unwrap();

    let hidden = hide_command(&config, &image_path, &doc_path, None).unwrap();
    assert_eq!(hidden.output_path, dir.path().join("cover_hidden.png"));
    assert_eq!(hidden.capacity, 14_996);
    assert_eq!(hidden.extension.as_deref(), Some("txt"));
    assert!(hidden.output_path.exists());

    let extracted = extract_command(&config, &hidden.output_path, None).unwrap();
    assert_eq!(
        extracted.output_path,
        dir.path().join("cover_hidden_extracted.txt")
    );
    assert_eq!(extracted.extension.as_deref(), Some("txt"));
    assert_eq!(
        fs::read(&extracted.output_path).unwrap(),
        b"This is a secret document.\nLine two.".to_vec()
    );
}

#[test]
fn test_hide_extract_png_and_bmp_outputs() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.bmp", 64, 64);

    let doc_path = dir.path().join("blob.bin");
    let payload: Vec<u8> = (0..=255).collect();
    fs::write(&doc_path, &payload).unwrap();

    for output in ["out.png", "out.bmp"] {
        let output_path = dir.path().join(output);
        let report = hide_command(&config, &image_path, &doc_path, Some(&output_path)).unwrap();
        assert_eq!(report.output_path, output_path);

        let restored = dir.path().join(format!("{}.restored", output));
        let extracted = extract_command(&config, &output_path, Some(&restored)).unwrap();
        assert_eq!(extracted.extension.as_deref(), Some("bin"));
        assert_eq!(extracted.document_size, 256);
        assert_eq!(fs::read(&restored).unwrap(), payload);
    }
}

#[test]
fn test_hide_without_extension() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.png", 50, 50);

    let doc_path = dir.path().join("README");
    fs::write(&doc_path, b"plain").unwrap();

    let hidden = hide_command(&config, &image_path, &doc_path, None).unwrap();
    assert_eq!(hidden.extension, None);

    let extracted = extract_command(&config, &hidden.output_path, None).unwrap();
    assert_eq!(extracted.extension, None);
    assert_eq!(
        extracted.output_path,
        dir.path().join("cover_hidden_extracted")
    );
    assert_eq!(fs::read(&extracted.output_path).unwrap(), b"plain".to_vec());
}

#[test]
fn test_hide_rejects_document_too_large() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "small.png", 10, 10);

    let doc_path = dir.path().join("big.txt");
    fs::write(&doc_path, vec![b'X'; 100]).unwrap();

    let err = hide_command(&config, &image_path, &doc_path, None).unwrap_err();
    assert!(err.to_string().contains("Document too large for image"));
    assert!(!dir.path().join("small_hidden.png").exists());
}

#[test]
fn test_hide_missing_document() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.png", 20, 20);

    let err = hide_command(&config, &image_path, &dir.path().join("nope.txt"), None).unwrap_err();
    assert!(err.to_string().starts_with("File not found"));
}

#[test]
fn test_unsupported_image_format() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();

    let jpeg_path = dir.path().join("photo.jpg");
    fs::write(&jpeg_path, b"\xFF\xD8\xFF").unwrap();

    let err = capacity_command(&config, &jpeg_path).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported image format. Supported: PNG, BMP");
}

#[test]
fn test_extract_from_clean_image_fails() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();

    let path = dir.path().join("white.png");
    save_image(&RgbImage::from_pixel(200, 200, Rgb([255, 255, 255])), &path).unwrap();

    let err = extract_command(&config, &path, None).unwrap_err();
    assert_eq!(err.to_string(), "Failed to decode message from image");
    assert!(!dir.path().join("white_extracted").exists());
}

#[test]
fn test_capacity_command() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.png", 100, 100);

    let report = capacity_command(&config, &image_path).unwrap();
    assert_eq!((report.width, report.height), (100, 100));
    assert_eq!(report.capacity, 3746);
}

#[test]
fn test_hidden_image_keeps_dimensions() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig::default();
    let image_path = create_test_image(dir.path(), "cover.png", 37, 23);

    let doc_path = dir.path().join("a.md");
    fs::write(&doc_path, b"# title").unwrap();

    let report = hide_command(&config, &image_path, &doc_path, None).unwrap();
    let original = load_image(&image_path).unwrap();
    let hidden = load_image(&report.output_path).unwrap();
    assert_eq!(hidden.dimensions(), original.dimensions());
}
