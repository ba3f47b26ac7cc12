//! Client-side upload constraints.
//!
//! Mirrors what the upload form enforces before anything is sent: PDF
//! only, at most 10 MiB, and the file must be readable. Each rejection
//! class carries its own user message so callers can report "too large"
//! and "wrong type" distinctly.

use std::path::Path;

use crate::api::UploadFile;

use super::error::IntakeError;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// The only content type the service accepts.
pub const ACCEPTED_CONTENT_TYPE: &str = "application/pdf";

/// Validates a local file against the upload constraints and reads it
/// into an [`UploadFile`] ready for the client.
pub async fn prepare_upload(path: impl AsRef<Path>) -> Result<UploadFile, IntakeError> {
    let path = path.as_ref();

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    if content_type != ACCEPTED_CONTENT_TYPE {
        return Err(IntakeError::UnsupportedType { content_type });
    }

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| IntakeError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge {
            size_bytes: metadata.len(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IntakeError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    Ok(UploadFile {
        file_name,
        content_type,
        bytes,
    })
}
