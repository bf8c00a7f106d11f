//! Image processing pipeline module
//!
//! This module provides a structured approach to gold-image regression checks,
//! with separate modules for raster reading/writing, pixel comparison, and orchestration.

pub mod ppm;
pub mod compare;
pub mod conversions;
pub mod common;

pub use common::{
    ComparisonError,
    ImageSide,
    Result,
};

pub use ppm::{
    decode,
    RasterImage,
    RasterReader,
    RasterWriter,
    PpmReader,
    PpmWriter,
};

pub use compare::{
    CompareConfig,
    CompareConfigBuilder,
    ComparisonResult,
    PixelClass,
    Verdict,
};

pub use conversions::{
    compare_images,
    CompareOutcome,
    GoldComparePipeline,
};
