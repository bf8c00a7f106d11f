use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two compared inputs an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    /// The freshly rendered image.
    Candidate,
    /// The stored gold image.
    Reference,
}

impl fmt::Display for ImageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSide::Candidate => f.write_str("candidate"),
            ImageSide::Reference => f.write_str("reference"),
        }
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    InputReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write diff file {}: {source}", .path.display())]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid raster file: {0}")]
    FormatError(String),

    #[error("Failed to load {side} image{}: {source}", describe_path(.path))]
    InputError {
        side: ImageSide,
        path: Option<PathBuf>,
        #[source]
        source: Box<ComparisonError>,
    },

    #[error("File headers don't match: {field} is {candidate} vs {reference}")]
    HeaderMismatch {
        field: &'static str,
        candidate: String,
        reference: String,
    },

    #[error("Binary data sizes don't match: {candidate} vs {reference} bytes")]
    SizeMismatch { candidate: usize, reference: usize },

    #[error("Image contains no complete pixels")]
    EmptyImage,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ComparisonError>;
