use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClauseLensError {
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Upload rejected: {0}")]
    Intake(#[from] crate::pipeline::IntakeError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No data directory available for local storage")]
    NoDataDirectory,

    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClauseLensError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::pipeline::IntakeError;

    #[test]
    fn module_errors_convert_into_the_crate_error() {
        let err: ClauseLensError = ApiError::validation("bad id").into();
        assert!(matches!(err, ClauseLensError::Api(_)));

        let err: ClauseLensError = ConfigError::Validation {
            message: "empty base_url".into(),
        }
        .into();
        assert!(matches!(err, ClauseLensError::Config(_)));

        let err: ClauseLensError = StorageError::NoDataDirectory.into();
        assert!(matches!(err, ClauseLensError::Storage(_)));

        let err: ClauseLensError = IntakeError::FileTooLarge { size_bytes: 1 }.into();
        assert!(matches!(err, ClauseLensError::Intake(_)));
    }
}
