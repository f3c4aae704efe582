//! Error types for parsing catalog values from text.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when turning user text into catalog values.
///
/// The resolver itself never fails. These errors only surface where a caller
/// (such as the command line) names a preset or resolution explicitly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No preset with this label exists in the catalog.
    #[error("Unknown paper preset: {0}")]
    UnknownPreset(String),

    /// The resolution is not one of the supported print resolutions.
    #[error("Unsupported resolution: {0} DPI")]
    UnsupportedDpi(u32),

    /// The text could not be read as a resolution.
    #[error("Invalid resolution: {0}")]
    InvalidDpi(String),
}
