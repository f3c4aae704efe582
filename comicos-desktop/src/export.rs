//! Image export.
//!
//! The UI hands over the flattened canvas either as raw encoded bytes or as a
//! `data:image/<kind>;base64,...` URI. The bytes are written to the chosen
//! path, re-encoded first when their format differs from the path's
//! extension.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};
use crate::file_dialog::{DialogOptions, FileFilter};

/// File name suggested by the export dialog.
pub const UNTITLED_IMAGE: &str = "untitled.png";

/// Image data handed over for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImagePayload {
    /// A data URI, or bare base64 text.
    DataUri(String),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
}

/// Formats the export dialog offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
}

impl ExportFormat {
    /// Pick the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnsupportedFormat`] for any extension other than
    /// `png`, `jpg` or `jpeg`.
    pub fn from_path(path: &Path) -> BridgeResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(BridgeError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Options for the export dialog.
#[must_use]
pub fn export_dialog() -> DialogOptions {
    DialogOptions {
        title: "Export Image".to_string(),
        default_path: Some(UNTITLED_IMAGE.into()),
        filters: vec![
            FileFilter::new("PNG Image", &["png"]),
            FileFilter::new("JPEG Image", &["jpg", "jpeg"]),
        ],
    }
}

/// Decode a payload into encoded image bytes.
///
/// Data URIs must be of the form `data:image/<kind>;base64,<data>`. Text
/// without a `data:` prefix is taken as bare base64.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidDataUri`] for other data URIs and
/// [`BridgeError::Base64`] if the text is not valid base64.
pub fn decode_payload(payload: &ImagePayload) -> BridgeResult<Vec<u8>> {
    match payload {
        ImagePayload::Bytes(bytes) => Ok(bytes.clone()),
        ImagePayload::DataUri(text) => {
            let encoded = match text.strip_prefix("data:") {
                Some(rest) => strip_image_header(rest)?,
                None => text.as_str(),
            };
            Ok(base64::engine::general_purpose::STANDARD.decode(encoded.trim())?)
        }
    }
}

/// Split `image/<kind>;base64,<data>` and return `<data>`.
fn strip_image_header(uri: &str) -> BridgeResult<&str> {
    let comma = uri
        .find(',')
        .ok_or_else(|| BridgeError::InvalidDataUri("missing comma".to_string()))?;
    let (metadata, data) = (&uri[..comma], &uri[comma + 1..]);

    let kind = metadata
        .strip_prefix("image/")
        .and_then(|m| m.strip_suffix(";base64"))
        .ok_or_else(|| BridgeError::InvalidDataUri(format!("unexpected header {metadata:?}")))?;
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(BridgeError::InvalidDataUri(format!(
            "unexpected image kind {kind:?}"
        )));
    }
    Ok(data)
}

/// Bring `bytes` into `format`, re-encoding only if they are in another one.
///
/// # Errors
///
/// Returns [`BridgeError::Image`] if the bytes are not a readable image.
pub fn encode_as(bytes: Vec<u8>, format: ExportFormat) -> BridgeResult<Vec<u8>> {
    let target = format.image_format();
    let source = image::guess_format(&bytes)?;
    if source == target {
        return Ok(bytes);
    }

    tracing::debug!("Re-encoding export from {source:?} to {target:?}");
    let decoded = image::load_from_memory_with_format(&bytes, source)?;
    let mut out = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel.
        ExportFormat::Jpeg => image::DynamicImage::ImageRgb8(decoded.to_rgb8())
            .write_to(&mut out, target)?,
        ExportFormat::Png => decoded.write_to(&mut out, target)?,
    }
    Ok(out.into_inner())
}

/// Decode `payload` and write it to `path` in the format its extension names.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the payload cannot be
/// decoded, or the file cannot be written.
pub async fn write_image(path: &Path, payload: &ImagePayload) -> BridgeResult<()> {
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_as(decode_payload(payload)?, format)?;
    tokio::fs::write(path, &bytes).await?;
    tracing::debug!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
