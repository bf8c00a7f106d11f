use crate::image_pipeline::common::error::ComparisonError;
use crate::image_pipeline::compare::types::{BLACK, RED, YELLOW};
use crate::image_pipeline::compare::{compare, CompareConfig, PixelClass, Verdict};
use crate::image_pipeline::ppm::{HeaderValue, RasterImage};

fn image(width: u32, height: u32, samples: Vec<u8>) -> RasterImage {
    RasterImage {
        format_tag: "P6".to_string(),
        width: width.into(),
        height: height.into(),
        max_value: 255u32.into(),
        samples,
    }
}

fn config(threshold: f64, allowed: f64) -> CompareConfig {
    CompareConfig::builder()
        .diff_threshold(threshold)
        .allowed_percentage(allowed)
        .build()
}

#[test]
fn test_config_builder() {
    let config = CompareConfig::builder().diff_threshold(4.0).build();

    assert_eq!(config.diff_threshold, 4.0);
    assert_eq!(config.allowed_percentage, 3.0);
}

#[test]
fn test_classify() {
    assert_eq!(PixelClass::classify(0.0, 1.0), PixelClass::Match);
    assert_eq!(PixelClass::classify(1.0, 1.0), PixelClass::BelowThreshold);
    assert_eq!(PixelClass::classify(1.5, 1.0), PixelClass::Exceeds);
    assert_eq!(PixelClass::classify(0.0, 0.0), PixelClass::Match);
    assert_eq!(PixelClass::classify(1.0, 0.0), PixelClass::Exceeds);

    assert_eq!(PixelClass::Match.color(), BLACK);
    assert_eq!(PixelClass::BelowThreshold.color(), YELLOW);
    assert_eq!(PixelClass::Exceeds.color(), RED);
    assert!(!PixelClass::BelowThreshold.is_differing());
}

#[test]
fn test_identical_pixels() {
    let a = image(1, 1, vec![10, 10, 10]);
    let result = compare(&a, &a.clone(), &config(1.0, 3.0)).unwrap();

    assert_eq!(result.diff_percentage, 0.0);
    assert_eq!(result.verdict, Verdict::Equivalent);
    assert_eq!(result.diff_image.samples, BLACK.to_vec());
}

#[test]
fn test_over_threshold_pixel_is_red() {
    let a = image(1, 1, vec![0, 0, 0]);
    let b = image(1, 1, vec![0, 0, 5]);
    let result = compare(&a, &b, &config(1.0, 3.0)).unwrap();

    assert_eq!(result.differing_pixel_count, 1);
    assert_eq!(result.total_pixel_count, 1);
    assert_eq!(result.diff_percentage, 100.0);
    assert_eq!(result.verdict, Verdict::Different);
    assert_eq!(result.diff_image.samples, RED.to_vec());
}

#[test]
fn test_sub_threshold_pixel_is_yellow() {
    let a = image(1, 1, vec![0, 0, 0]);
    let b = image(1, 1, vec![0, 0, 1]);
    let result = compare(&a, &b, &config(2.0, 3.0)).unwrap();

    assert_eq!(result.differing_pixel_count, 0);
    assert_eq!(result.diff_percentage, 0.0);
    assert!(result.is_equivalent());
    assert_eq!(result.diff_image.samples, YELLOW.to_vec());
}

#[test]
fn test_threshold_boundary_is_not_differing() {
    let a = image(1, 1, vec![100, 50, 50]);
    let b = image(1, 1, vec![103, 50, 50]);
    let result = compare(&a, &b, &config(3.0, 0.0)).unwrap();

    assert_eq!(result.differing_pixel_count, 0);
    assert_eq!(result.verdict, Verdict::Equivalent);
    assert_eq!(result.diff_image.samples, YELLOW.to_vec());
}

#[test]
fn test_worst_channel_decides() {
    // Channel differences 1, 200, 1: the green channel alone fails the pixel.
    let a = image(1, 1, vec![10, 0, 10]);
    let b = image(1, 1, vec![11, 200, 9]);
    let result = compare(&a, &b, &config(1.0, 3.0)).unwrap();

    assert_eq!(result.differing_pixel_count, 1);
}

#[test]
fn test_allowed_percentage_is_strict() {
    // 1 of 4 pixels differs: exactly 25%.
    let a = image(2, 2, vec![0; 12]);
    let mut samples = vec![0; 12];
    samples[9] = 255;
    let b = image(2, 2, samples);

    let at_limit = compare(&a, &b, &config(1.0, 25.0)).unwrap();
    assert_eq!(at_limit.diff_percentage, 25.0);
    assert_eq!(at_limit.verdict, Verdict::Equivalent);

    let below_limit = compare(&a, &b, &config(1.0, 24.9)).unwrap();
    assert_eq!(below_limit.verdict, Verdict::Different);
}

#[test]
fn test_matching_pixels_stay_black() {
    let a = image(3, 1, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let b = image(3, 1, vec![1, 2, 3, 40, 5, 6, 7, 8, 10]);
    let result = compare(&a, &b, &config(1.0, 100.0)).unwrap();

    let diff = &result.diff_image.samples;
    assert_eq!(&diff[0..3], &BLACK);
    assert_eq!(&diff[3..6], &RED);
    assert_eq!(&diff[6..9], &YELLOW);
}

#[test]
fn test_diff_header_copied_from_candidate() {
    let mut a = image(1, 1, vec![1, 1, 1]);
    a.max_value = 200u32.into();
    let mut b = a.clone();
    b.samples = vec![2, 2, 2];

    let result = compare(&a, &b, &CompareConfig::default()).unwrap();

    assert_eq!(result.diff_image.format_tag, "P6");
    assert_eq!(result.diff_image.width.get(), 1);
    assert_eq!(result.diff_image.height.get(), 1);
    assert_eq!(result.diff_image.max_value.get(), 200);
}

#[test]
fn test_width_mismatch() {
    let a = image(1, 3, vec![0; 9]);
    let b = image(3, 1, vec![0; 9]);
    let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();

    match err {
        ComparisonError::HeaderMismatch { field, candidate, reference } => {
            assert_eq!(field, "width");
            assert_eq!(candidate, "1");
            assert_eq!(reference, "3");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_width_compared_as_header_text() {
    let mut a = image(1, 1, vec![0; 3]);
    a.width = HeaderValue::new("01", 1);
    let b = image(1, 1, vec![0; 3]);

    let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();

    match err {
        ComparisonError::HeaderMismatch { field, candidate, reference } => {
            assert_eq!(field, "width");
            assert_eq!(candidate, "01");
            assert_eq!(reference, "1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_format_tag_mismatch_reported_first() {
    let a = image(1, 1, vec![0; 3]);
    let mut b = image(2, 1, vec![0; 6]);
    b.format_tag = "P5".to_string();

    let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();
    assert!(matches!(err, ComparisonError::HeaderMismatch { field: "format tag", .. }));
}

#[test]
fn test_payload_size_mismatch() {
    let a = image(2, 1, vec![0; 6]);
    let b = image(2, 1, vec![0; 5]);
    let err = compare(&a, &b, &CompareConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        ComparisonError::SizeMismatch { candidate: 6, reference: 5 }
    ));
}

#[test]
fn test_trailing_partial_pixel_ignored() {
    let a = image(1, 1, vec![0, 0, 0, 9, 9]);
    let b = image(1, 1, vec![0, 0, 0, 0, 0]);
    let result = compare(&a, &b, &CompareConfig::default()).unwrap();

    assert_eq!(result.total_pixel_count, 1);
    assert_eq!(result.differing_pixel_count, 0);
    assert_eq!(result.diff_image.samples.len(), 3);
}

#[test]
fn test_empty_image() {
    let a = image(0, 0, vec![1, 2]);
    let err = compare(&a, &a.clone(), &CompareConfig::default()).unwrap_err();

    assert!(matches!(err, ComparisonError::EmptyImage));
}

#[test]
fn test_max_value_does_not_rescale() {
    let mut a = image(1, 1, vec![0, 0, 0]);
    a.max_value = 65535u32.into();
    let mut b = a.clone();
    b.samples = vec![2, 0, 0];

    let result = compare(&a, &b, &config(1.0, 3.0)).unwrap();
    assert_eq!(result.differing_pixel_count, 1);
}

#[test]
fn test_max_channel_diff_and_pixel_classes() {
    use crate::image_pipeline::compare::comparator::{classify_pixels, max_channel_diff};

    assert_eq!(max_channel_diff(&[10, 0, 10], &[11, 200, 9]), 200.0);
    assert_eq!(max_channel_diff(&[7, 7, 7], &[7, 7, 7]), 0.0);

    let classes: Vec<_> = classify_pixels(&[0, 0, 0, 5, 5, 5, 9, 9], &[0, 0, 0, 6, 5, 5, 0, 0], 1.0)
        .collect();
    assert_eq!(classes, vec![PixelClass::Match, PixelClass::BelowThreshold]);
}
