//! Error types for asset generation

use thiserror::Error;

/// Result type alias for asset operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Width or height of a pixel buffer is zero
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Number of rows does not match the declared height
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    /// A row does not hold width * channels samples
    #[error("row {row}: expected {expected} samples, got {actual}")]
    RowLength { row: usize, expected: usize, actual: usize },

    /// Icon size outside the supported range
    #[error("invalid icon size: {0}")]
    InvalidSize(u32),

    /// Config file could not be read
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem failure while reading or writing assets
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Manifest serialisation failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Source screenshot could not be decoded
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
