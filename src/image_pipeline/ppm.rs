//! Raster file reading and writing module
//!
//! This module decodes the binary PPM-style rasters produced by the renderers and
//! serializes the synthesized diff rasters.

mod reader;
mod ppm_reader;
mod writer;
mod ppm_writer;
pub mod types;

use std::path::Path;

use crate::image_pipeline::common::error::{ComparisonError, Result};

pub use reader::RasterReader;
pub use ppm_reader::PpmReader;
pub use writer::RasterWriter;
pub use ppm_writer::PpmWriter;
pub use types::{HeaderValue, RasterImage, CHANNELS};

/// Reads and decodes the raster stored at `path`.
///
/// The file is read in one call, so no handle outlives this function on any path.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<RasterImage> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| ComparisonError::InputReadError {
        path: path.to_path_buf(),
        source,
    })?;
    PpmReader.read_raster(&data)
}
