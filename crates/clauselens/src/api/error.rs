//! Error taxonomy for the analysis service client.

use thiserror::Error;

/// Errors surfaced by the remote analysis client and the upload pipeline.
///
/// `Validation` is raised synchronously before any request is sent; the
/// remaining variants describe what came back (or failed to come back)
/// from the server. The pipeline propagates these unmodified, so the
/// first failing step's error is exactly what the caller sees.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-detected precondition violation. Never reaches the network.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The server explicitly reported a failure through the response
    /// envelope. Carries the server-supplied code/message/details.
    #[error("server error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Failure status with a non-JSON body; there is no envelope to read.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request never completed: connect failure, timeout, aborted
    /// transfer.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was JSON but not the envelope shape the API promises.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server claimed success but the payload violates its own
    /// contract (e.g. a document with no identifier).
    #[error("invalid server response: {message}")]
    InvalidResponse { message: String },

    /// Upload reported success without a document identifier.
    #[error("upload failed: {message}")]
    UploadFailed { status: u16, message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// The key used to resolve a user-facing message from the error table.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Api { code, .. } => code,
            ApiError::Http { .. } => "HTTP_ERROR",
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Decode(_) => "UNKNOWN_ERROR",
            ApiError::InvalidResponse { .. } => "INVALID_RESPONSE",
            ApiError::UploadFailed { .. } => "INTERNAL_ERROR",
        }
    }

    /// Server-supplied detail object, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
