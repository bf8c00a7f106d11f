use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::ppm::types::RasterImage;
use crate::image_pipeline::ppm::writer::RasterWriter;

/// Serializes a raster as `tag\nwidth height\nmax\n` followed by the raw samples.
pub struct PpmWriter;

impl RasterWriter for PpmWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding raster: {}x{}, {} bytes", image.width, image.height, image.samples.len());

        write!(
            output,
            "{}\n{} {}\n{}\n",
            image.format_tag, image.width, image.height, image.max_value
        )?;
        output.write_all(&image.samples)?;

        Ok(())
    }
}
