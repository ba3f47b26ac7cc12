pub mod error;
pub mod intake;
pub mod runner;

pub use error::IntakeError;
pub use intake::{prepare_upload, ACCEPTED_CONTENT_TYPE, MAX_UPLOAD_BYTES};
pub use runner::AnalysisPipeline;
