//! Pipeline conversions module
//!
//! This module contains orchestration logic that turns a rendered raster and its gold
//! reference into a verdict plus a diff raster on disk.

mod gold_compare;


pub use gold_compare::{compare_images, CompareOutcome, GoldComparePipeline};
