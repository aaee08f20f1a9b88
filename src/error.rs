//! Error type shared by import, export, and background loading.

use thiserror::Error;

/// Failures surfaced by file-facing operations.
#[derive(Debug, Error)]
pub enum DotsError {
    /// A document could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A background image could not be decoded
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Exported SVG could not be parsed for rasterization
    #[error("SVG error: {0}")]
    Svg(String),

    /// The raster target could not be created or encoded
    #[error("Rasterization error: {0}")]
    Raster(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DotsError>;
