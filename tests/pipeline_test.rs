//! Config-driven pipeline runs, the way the CLI wires them.

mod common;

use common::*;
use pixel_quant::{PipelineError, Pixelator, Rgb};
use pixelator::error::ConfigError;
use pixelator::models::{pick_color, PixelateConfig};
use pixelator::services::PixelationService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
result_width: 8
result_height: 4
match_aspect: false
colors_count: 4
pixelation_method: average
"#,
    );

    let config = PixelateConfig::load(&path).unwrap();
    let source = gradient(16, 16);
    let size = config.result_size(source.width(), source.height(), None, None);
    assert_eq!(size, Some((8, 4)));

    let output = config.pixelator(size, &[]).unwrap().run(&source).unwrap();
    assert_size(&output.small, 8, 4);
    assert_size(&output.display, 16, 16);

    let palette = output.palette.unwrap();
    assert!(palette.len() <= 4, "got {} colors", palette.len());
    assert_in_palette(&output.small, &palette);
    assert_in_palette(&output.display, &palette);
}

#[test]
fn test_dithered_output_uses_palette_only() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
result_width: 8
colors_count: 4
enable_dithering: true
dith_kern: sierra-lite
dith_delta: 1.0
"#,
    );

    let config = PixelateConfig::load(&path).unwrap();
    let source = gradient(16, 16);
    // Square source, so the height follows the width
    let size = config.result_size(16, 16, None, None);
    assert_eq!(size, Some((8, 8)));

    let output = config.pixelator(size, &[]).unwrap().run(&source).unwrap();
    let palette = output.palette.unwrap();
    assert_in_palette(&output.small, &palette);
}

#[test]
fn test_result_size_matches_source_aspect() {
    let config = PixelateConfig::default();

    assert_eq!(config.result_size(40, 20, None, None), Some((32, 16)));
    assert_eq!(config.result_size(40, 20, Some(10), None), Some((10, 5)));
    assert_eq!(config.result_size(40, 20, None, Some(5)), Some((10, 5)));
    assert_eq!(config.result_size(40, 20, Some(7), Some(9)), Some((7, 9)));

    let keep = PixelateConfig {
        keep_original_size: true,
        ..Default::default()
    };
    assert_eq!(keep.result_size(40, 20, Some(10), None), None);
}

#[test]
fn test_picked_color_survives_quantization() {
    let source = scene_with_highlight(32, 32);
    let config = PixelateConfig {
        keep_original_size: true,
        colors_count: 2,
        ..Default::default()
    };

    let picked = pick_color(&source, 10, 10).unwrap();
    assert_eq!(picked, HIGHLIGHT);

    let pixelator = config.pixelator(None, &[picked]).unwrap();
    let output = pixelator.run(&source).unwrap();

    assert_size(&output.small, 32, 32);
    assert!(output.palette.unwrap().len() <= 2);
    for (x, y) in [(10, 10), (11, 10), (10, 11), (11, 11)] {
        assert_pixel(&output.small, x, y, HIGHLIGHT);
    }
}

#[test]
fn test_forced_colors_from_config_and_pick_are_merged() {
    let config = PixelateConfig {
        forced_colors: vec!["#E61414".to_string(), "#00F".to_string()],
        ..Default::default()
    };
    let pixelator = config
        .pixelator(Some((4, 4)), &[HIGHLIGHT, Rgb::new(0, 255, 0)])
        .unwrap();
    let expected = Pixelator::new()
        .result_size(4, 4)
        .forced_colors(vec![HIGHLIGHT, Rgb::new(0, 0, 255), Rgb::new(0, 255, 0)]);
    assert_eq!(pixelator, expected);
}

#[test]
fn test_pick_outside_source_is_rejected() {
    let source = gradient(4, 4);
    let err = pick_color(&source, 4, 0).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::PickOutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 4
        }
    ));
}

#[test]
fn test_invalid_kernel_name_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "dith_kern: wobbly\n");

    let err = PixelateConfig::load(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { field: "dith_kern", .. }),
        "got {err}"
    );
}

#[test]
fn test_missing_config_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = PixelateConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_palette_lists_colors_in_first_seen_order() {
    let source = checkerboard(8, 8, 1, Rgb::BLACK, Rgb::WHITE);
    let config = PixelateConfig {
        keep_original_size: true,
        ..Default::default()
    };

    let output = config.pixelator(None, &[]).unwrap().run(&source).unwrap();
    assert_eq!(
        output.palette.unwrap().to_hex(),
        vec!["#000000".to_string(), "#FFFFFF".to_string()]
    );
    assert_eq!(output.small, source);
}

#[test]
fn test_service_keeps_last_good_result() {
    let source = gradient(16, 16);
    let mut service = PixelationService::new();

    service
        .apply(&source, &Pixelator::new().result_size(4, 4).colors_count(3))
        .unwrap();
    let before = service.current().cloned().unwrap();

    let err = service
        .apply(&source, &Pixelator::new().display_size(0, 16))
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidDimensions { .. }));
    assert_eq!(service.current(), Some(&before));
}
