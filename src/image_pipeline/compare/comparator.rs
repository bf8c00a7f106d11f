use tracing::{debug, info};

use crate::image_pipeline::common::error::{ComparisonError, Result};
use crate::image_pipeline::compare::types::{ComparisonResult, CompareConfig, PixelClass, Verdict};
use crate::image_pipeline::ppm::types::{RasterImage, CHANNELS};

fn mismatch(field: &'static str, candidate: &str, reference: &str) -> ComparisonError {
    ComparisonError::HeaderMismatch {
        field,
        candidate: candidate.to_string(),
        reference: reference.to_string(),
    }
}

fn check_headers(candidate: &RasterImage, reference: &RasterImage) -> Result<()> {
    if candidate.format_tag != reference.format_tag {
        return Err(mismatch("format tag", &candidate.format_tag, &reference.format_tag));
    }
    if candidate.width != reference.width {
        return Err(mismatch("width", candidate.width.as_str(), reference.width.as_str()));
    }
    if candidate.height != reference.height {
        return Err(mismatch("height", candidate.height.as_str(), reference.height.as_str()));
    }
    if candidate.max_value != reference.max_value {
        return Err(mismatch(
            "max value",
            candidate.max_value.as_str(),
            reference.max_value.as_str(),
        ));
    }

    Ok(())
}

/// Worst absolute channel difference between two pixels.
///
/// Samples are compared as stored; the header's max value is not used to rescale them.
pub(crate) fn max_channel_diff(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| x.abs_diff(y) as f64)
        .fold(0.0, f64::max)
}

/// Classifies every complete pixel of two equally sized payloads.
pub(crate) fn classify_pixels<'a>(
    candidate: &'a [u8],
    reference: &'a [u8],
    threshold: f64,
) -> impl Iterator<Item = PixelClass> + 'a {
    candidate
        .chunks_exact(CHANNELS)
        .zip(reference.chunks_exact(CHANNELS))
        .map(move |(a, b)| PixelClass::classify(max_channel_diff(a, b), threshold))
}

/// Compares a candidate raster against a reference raster.
///
/// Preconditions are checked in order and the first failure is returned:
/// header fields must match, payload lengths must match, and at least one complete
/// pixel must be present.
///
/// # Returns
///
/// * `Ok(ComparisonResult)` - Statistics, the painted diff raster and the verdict
/// * `Err(ComparisonError)` - `HeaderMismatch`, `SizeMismatch` or `EmptyImage`
pub fn compare(
    candidate: &RasterImage,
    reference: &RasterImage,
    config: &CompareConfig,
) -> Result<ComparisonResult> {
    check_headers(candidate, reference)?;

    if candidate.samples.len() != reference.samples.len() {
        return Err(ComparisonError::SizeMismatch {
            candidate: candidate.samples.len(),
            reference: reference.samples.len(),
        });
    }

    let total_pixel_count = candidate.pixel_count();
    if total_pixel_count == 0 {
        return Err(ComparisonError::EmptyImage);
    }

    debug!(
        pixels = total_pixel_count,
        threshold = config.diff_threshold,
        "Classifying pixels"
    );

    let mut diff = vec![0u8; total_pixel_count * CHANNELS];
    let mut differing_pixel_count = 0;

    let classes = classify_pixels(&candidate.samples, &reference.samples, config.diff_threshold);
    for (class, out) in classes.zip(diff.chunks_exact_mut(CHANNELS)) {
        if class.is_differing() {
            differing_pixel_count += 1;
        }
        out.copy_from_slice(&class.color());
    }

    let diff_percentage = 100.0 * differing_pixel_count as f64 / total_pixel_count as f64;
    info!("{}% of pixels exceeds diff threshold.", diff_percentage);

    let verdict = if diff_percentage > config.allowed_percentage {
        Verdict::Different
    } else {
        Verdict::Equivalent
    };

    Ok(ComparisonResult {
        differing_pixel_count,
        total_pixel_count,
        diff_percentage,
        diff_image: candidate.with_samples(diff),
        verdict,
    })
}
