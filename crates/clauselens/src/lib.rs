pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod view;

pub use api::{
    user_message, Analysis, AnalysisApi, AnalysisClient, ApiError, ClauseItem, ContractType,
    Document, OverallSummary, RiskLabel, UploadFile, UserProfile, DEFAULT_LANGUAGE,
    DEFAULT_PAGE_SIZE,
};
pub use config::{load_config, load_config_from_str, Config};
pub use error::{ClauseLensError, ConfigError, Result, StorageError};
pub use pipeline::{prepare_upload, AnalysisPipeline, IntakeError};
pub use storage::{FileBackend, KeyValueBackend, MemoryBackend, PinStore, PinnedClause};
