use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::ppm::types::RasterImage;

pub trait RasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage>;
}
