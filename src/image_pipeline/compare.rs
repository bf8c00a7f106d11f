//! Image comparison module
//!
//! Per-pixel, per-channel comparison of a candidate raster against a gold reference.

mod comparator;
pub mod types;

#[cfg(test)]
mod tests;

pub use comparator::compare;
pub use types::{
    CompareConfig,
    CompareConfigBuilder,
    ComparisonResult,
    PixelClass,
    Verdict,
};
