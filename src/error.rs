use std::io;
use thiserror::Error;

/// Errors produced while validating input or generating an image.
///
/// A dominant emotion missing from the palette table is deliberately absent
/// here: it resolves to the `neutral` palette.
#[derive(Error, Debug)]
pub enum ArtError {
    /// The emotion vector has no entries, so there is no dominant emotion.
    #[error("emotion vector is empty; at least one emotion is required")]
    EmptyEmotions,

    /// An intensity that is NaN, infinite or negative.
    #[error("invalid intensity {value} for emotion '{emotion}'")]
    InvalidIntensity { emotion: String, value: f64 },

    /// A style name matching none of the known styles.
    #[error("unknown style '{0}' (expected Mandala, Abstract, Watercolor or Hybrid)")]
    UnknownStyle(String),

    /// A palette color that is not `#RRGGBB`.
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// Output dimensions outside the supported range.
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Complexity outside the supported range.
    #[error("invalid complexity {0} (expected 0..={max})", max = crate::generator::MAX_COMPLEXITY)]
    InvalidComplexity(u32),

    /// Malformed configuration file.
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Type alias for Result with ArtError
pub type Result<T> = std::result::Result<T, ArtError>;
