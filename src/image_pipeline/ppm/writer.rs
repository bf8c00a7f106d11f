use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::ppm::types::RasterImage;

pub trait RasterWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()>;
}
