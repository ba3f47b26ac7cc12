use std::path::PathBuf;
use thiserror::Error;

/// Rejections from the client-side upload constraints. These never reach
/// the network; the server re-checks size and type authoritatively.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("file is {size_bytes} bytes, over the 10 MiB upload limit")]
    FileTooLarge { size_bytes: u64 },

    #[error("unsupported content type '{content_type}': only application/pdf is accepted")]
    UnsupportedType { content_type: String },

    #[error("failed to read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntakeError {
    /// Localized message for display, one per rejection class.
    pub fn user_message(&self) -> &'static str {
        match self {
            IntakeError::FileTooLarge { .. } => "파일 크기가 10MB를 초과합니다",
            IntakeError::UnsupportedType { .. } => "PDF 파일만 업로드 가능합니다",
            IntakeError::Unreadable { .. } => "파일 업로드에 실패했습니다",
        }
    }
}
