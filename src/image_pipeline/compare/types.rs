//! Comparison configuration and result types

use crate::image_pipeline::ppm::types::RasterImage;

/// Diff colour for pixels that exceed the threshold.
pub const RED: [u8; 3] = [255, 0, 0];
/// Diff colour for pixels that differ without exceeding the threshold.
pub const YELLOW: [u8; 3] = [255, 255, 0];
/// Diff colour for identical pixels.
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Per-pixel classification of the worst channel difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// All channels identical
    Match,
    /// Differs, but no channel by more than the threshold
    BelowThreshold,
    /// At least one channel differs by more than the threshold
    Exceeds,
}

impl PixelClass {
    pub fn classify(max_channel_diff: f64, threshold: f64) -> Self {
        if max_channel_diff > threshold {
            PixelClass::Exceeds
        } else if max_channel_diff > 0.0 {
            PixelClass::BelowThreshold
        } else {
            PixelClass::Match
        }
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            PixelClass::Match => BLACK,
            PixelClass::BelowThreshold => YELLOW,
            PixelClass::Exceeds => RED,
        }
    }

    /// Whether the pixel counts towards the failure rate.
    pub fn is_differing(self) -> bool {
        matches!(self, PixelClass::Exceeds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Equivalent,
    Different,
}

/// Outcome of comparing two rasters.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Pixels whose worst channel difference exceeded the threshold
    pub differing_pixel_count: usize,
    /// Complete pixels compared
    pub total_pixel_count: usize,
    /// `100 * differing / total`
    pub diff_percentage: f64,
    /// Visualization raster, header copied from the candidate
    pub diff_image: RasterImage,
    pub verdict: Verdict,
}

impl ComparisonResult {
    pub fn is_equivalent(&self) -> bool {
        self.verdict == Verdict::Equivalent
    }
}

/// Thresholds applied by the comparator
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Largest per-channel difference (out of 255) a pixel may have and still pass
    pub diff_threshold: f64,
    /// Largest percentage of failing pixels tolerated before the images are considered different
    pub allowed_percentage: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            diff_threshold: 1.0,
            allowed_percentage: 3.0,
        }
    }
}

impl CompareConfig {
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }
}

/// Builder for CompareConfig
#[derive(Default)]
pub struct CompareConfigBuilder {
    diff_threshold: Option<f64>,
    allowed_percentage: Option<f64>,
}

impl CompareConfigBuilder {
    pub fn diff_threshold(mut self, threshold: f64) -> Self {
        self.diff_threshold = Some(threshold);
        self
    }

    pub fn allowed_percentage(mut self, percentage: f64) -> Self {
        self.allowed_percentage = Some(percentage);
        self
    }

    pub fn build(self) -> CompareConfig {
        let default = CompareConfig::default();
        CompareConfig {
            diff_threshold: self.diff_threshold.unwrap_or(default.diff_threshold),
            allowed_percentage: self.allowed_percentage.unwrap_or(default.allowed_percentage),
        }
    }
}
