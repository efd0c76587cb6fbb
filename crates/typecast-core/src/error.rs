// this_file: crates/typecast-core/src/error.rs

//! Error types for Typecast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypecastError>;

/// Main error type for Typecast
///
/// Only font loading, shaping, and outline failures abort a layout request.
/// Per-glyph conditions (kerning mismatch, missing vertical metrics, missing
/// per-glyph axis data) are resolved locally and never surface here.
#[derive(Debug, Error)]
pub enum TypecastError {
    #[error("{0}")]
    FontUnavailable(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("Outline extraction failed: {0}")]
    Outline(#[from] OutlineError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
///
/// Every variant names the font so the host can show which file failed.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font \"{0}\" does not exist")]
    FileNotFound(String),

    #[error("Font \"{0}\" failed to initialize: invalid font data")]
    InvalidData(String),

    #[error("Font \"{path}\" has no face at index {index}")]
    FaceIndexOutOfRange { path: String, index: u32 },
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Font data could not be read by the shaper")]
    InvalidFont,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Outline errors
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Glyph {0} has no outline in this font")]
    MissingGlyph(u32),

    #[error("Glyph {glyph_id} could not be drawn: {reason}")]
    DrawFailed { glyph_id: u32, reason: String },

    #[error("Path simplification failed: {0}")]
    SimplifyFailed(String),
}
