//! Error types for bridge operations.

use thiserror::Error;

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors that can occur while serving a bridge request.
///
/// None of these reach the UI layer as errors. The bridge logs them and
/// answers `{ "success": false }`.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No window is available to host a file dialog.
    #[error("No focused window for file dialog")]
    NoWindow,

    /// The export payload is a data URI that does not carry base64 image data.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The export payload is not valid base64.
    #[error("Failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The chosen export path has an extension we cannot encode.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The payload could not be decoded or re-encoded as an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The surface refused the zoom factor.
    #[error("Invalid zoom factor: {0}")]
    InvalidZoom(f64),

    /// A request or response could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
