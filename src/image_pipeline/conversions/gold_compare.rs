use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ComparisonError, ImageSide, Result},
    compare::{self, CompareConfig, ComparisonResult, Verdict},
    ppm::{PpmReader, PpmWriter, RasterImage, RasterReader, RasterWriter},
};

/// Percentage and verdict of one candidate/gold comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOutcome {
    pub differing_pixel_percentage: f64,
    pub verdict: Verdict,
}

impl From<&ComparisonResult> for CompareOutcome {
    fn from(result: &ComparisonResult) -> Self {
        Self {
            differing_pixel_percentage: result.diff_percentage,
            verdict: result.verdict,
        }
    }
}

fn input_error(side: ImageSide, path: Option<&Path>, source: ComparisonError) -> ComparisonError {
    ComparisonError::InputError {
        side,
        path: path.map(Path::to_path_buf),
        source: Box::new(source),
    }
}

pub struct GoldComparePipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: CompareConfig,
}

impl GoldComparePipeline<PpmReader, PpmWriter> {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            reader: PpmReader,
            writer: PpmWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> GoldComparePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: CompareConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn decode(&self, side: ImageSide, data: &[u8], path: Option<&Path>) -> Result<RasterImage> {
        self.reader
            .read_raster(data)
            .map_err(|source| input_error(side, path, source))
    }

    fn load(&self, side: ImageSide, path: &Path) -> Result<RasterImage> {
        let data = std::fs::read(path).map_err(|source| {
            input_error(
                side,
                Some(path),
                ComparisonError::InputReadError {
                    path: path.to_path_buf(),
                    source,
                },
            )
        })?;

        self.decode(side, &data, Some(path))
    }

    /// Compares two in-memory encoded rasters and writes the diff raster to `output`.
    ///
    /// Nothing is written to `output` unless every precondition passed.
    #[instrument(skip_all, fields(candidate_size = candidate_data.len(), reference_size = reference_data.len()))]
    pub fn compare(
        &self,
        candidate_data: &[u8],
        reference_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<ComparisonResult> {
        let candidate = self.decode(ImageSide::Candidate, candidate_data, None)?;
        let reference = self.decode(ImageSide::Reference, reference_data, None)?;

        let result = compare::compare(&candidate, &reference, &self.config)?;
        self.writer.write_raster(&result.diff_image, output)?;

        Ok(result)
    }

    #[instrument(skip(self, candidate_path, reference_path, diff_path))]
    pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>, D: AsRef<Path>>(
        &self,
        candidate_path: P,
        reference_path: Q,
        diff_path: D,
    ) -> Result<ComparisonResult> {
        let candidate_path = candidate_path.as_ref();
        let reference_path = reference_path.as_ref();
        let diff_path = diff_path.as_ref();

        info!(
            "Comparing images \"{}\" and \"{}\" with a per-channel difference threshold of {} and {}% of pixels allowed to differ.",
            candidate_path.display(),
            reference_path.display(),
            self.config.diff_threshold,
            self.config.allowed_percentage
        );

        let candidate = {
            let _span = tracing::info_span!("decode_candidate").entered();
            self.load(ImageSide::Candidate, candidate_path)?
        };

        let reference = {
            let _span = tracing::info_span!("decode_reference").entered();
            self.load(ImageSide::Reference, reference_path)?
        };

        let result = {
            let _span = tracing::info_span!(
                "compare",
                width = candidate.width.get(),
                height = candidate.height.get()
            )
            .entered();
            compare::compare(&candidate, &reference, &self.config)?
        };

        {
            let _span = tracing::info_span!("write_diff").entered();
            let mut encoded = Vec::with_capacity(result.diff_image.samples.len() + 32);
            self.writer.write_raster(&result.diff_image, &mut encoded)?;
            std::fs::write(diff_path, &encoded).map_err(|source| {
                ComparisonError::OutputWriteError {
                    path: diff_path.to_path_buf(),
                    source,
                }
            })?;
        }

        match result.verdict {
            Verdict::Different => info!("Images considered different."),
            Verdict::Equivalent => info!("Images considered equivalent."),
        }

        Ok(result)
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CompareConfig) {
        self.config = config;
    }
}

/// Compares the raster at `candidate_path` against the gold raster at `reference_path`,
/// writing the diff visualization to `diff_path`.
pub fn compare_images<P: AsRef<Path>, Q: AsRef<Path>, D: AsRef<Path>>(
    candidate_path: P,
    reference_path: Q,
    diff_path: D,
    diff_threshold: f64,
    allowed_percentage: f64,
) -> Result<CompareOutcome> {
    let config = CompareConfig::builder()
        .diff_threshold(diff_threshold)
        .allowed_percentage(allowed_percentage)
        .build();

    GoldComparePipeline::new(config)
        .compare_files(candidate_path, reference_path, diff_path)
        .map(|result| CompareOutcome::from(&result))
}
