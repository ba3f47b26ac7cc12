pub mod client;
pub mod error;
pub mod messages;
pub mod types;

pub use client::{AnalysisApi, AnalysisClient, DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, Result};
pub use messages::user_message;
pub use types::{
    Analysis, ClauseItem, ContractType, Document, DocumentStatus, ExtractionResult,
    OverallSummary, RiskLabel, UploadFile, UserProfile,
};
