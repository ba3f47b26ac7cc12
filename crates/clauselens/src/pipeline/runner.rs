//! The upload → extract → analyze workflow.
//!
//! The three remote calls run as one logical operation: strictly
//! sequential, single attempt, fail fast. There is no rollback and no
//! partial-success state. The first failing step's error is returned
//! verbatim, and a failed run leaves the uploaded document for the
//! server to resolve. The recovery path is the user re-running the
//! workflow.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::api::{Analysis, AnalysisApi, ApiError, ContractType, UploadFile, UserProfile};

pub struct AnalysisPipeline<C: AnalysisApi> {
    api: C,
}

impl<C: AnalysisApi> AnalysisPipeline<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    /// Runs the full workflow for one prepared file and returns the
    /// created analysis unmodified.
    pub async fn run(
        &self,
        file: UploadFile,
        contract_type: ContractType,
        user_profile: UserProfile,
        language: &str,
    ) -> Result<Analysis, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "analysis_pipeline",
            request_id = %request_id,
            filename = %file.file_name,
        );
        self.run_steps(file, contract_type, user_profile, language)
            .instrument(span)
            .await
    }

    async fn run_steps(
        &self,
        file: UploadFile,
        contract_type: ContractType,
        user_profile: UserProfile,
        language: &str,
    ) -> Result<Analysis, ApiError> {
        // Step 1: upload. The server contract promises an identifier on
        // success; don't trust it blindly.
        let document = self.api.upload_document(&file).await?;
        if document.document_id.is_empty() {
            return Err(ApiError::InvalidResponse {
                message: "문서 업로드 후 documentId를 받지 못했습니다.".to_string(),
            });
        }
        info!(document_id = %document.document_id, "document uploaded");

        // Step 2: extract. Any failure aborts the workflow; there is no
        // compensating action for the already-uploaded document.
        let extraction = self.api.extract_document(&document.document_id).await?;
        info!(
            document_id = %extraction.document_id,
            text_length = extraction.text_length,
            "text extracted"
        );

        // Step 3: analyze.
        let analysis = self
            .api
            .create_analysis(&document.document_id, contract_type, user_profile, language)
            .await?;
        info!(
            analysis_id = %analysis.analysis_id,
            items = analysis.items.len(),
            "analysis created"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ClauseItem, Document, DocumentStatus, ExtractionResult, OverallSummary, RiskLabel,
        DEFAULT_LANGUAGE,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    const DOC_ID: &str = "11111111-2222-3333-4444-555555555555";
    const ANALYSIS_ID: &str = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";

    fn test_file() -> UploadFile {
        UploadFile {
            file_name: "contract.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.7".to_vec(),
        }
    }

    fn test_analysis() -> Analysis {
        Analysis {
            analysis_id: ANALYSIS_ID.into(),
            overall_summary: OverallSummary {
                warning_count: 1,
                check_count: 0,
                ok_count: 2,
                key_points: vec![],
            },
            items: vec![
                ClauseItem {
                    clause_id: "c1".into(),
                    title: "위약금".into(),
                    label: RiskLabel::Warning,
                    risk_reason: "과도한 위약금".into(),
                    what_to_confirm: vec![],
                    soft_suggestion: vec![],
                    triggers: vec![],
                },
                ClauseItem {
                    clause_id: "c2".into(),
                    title: "대금 지급".into(),
                    label: RiskLabel::Ok,
                    risk_reason: "문제 없음".into(),
                    what_to_confirm: vec![],
                    soft_suggestion: vec![],
                    triggers: vec![],
                },
                ClauseItem {
                    clause_id: "c3".into(),
                    title: "저작권".into(),
                    label: RiskLabel::Ok,
                    risk_reason: "문제 없음".into(),
                    what_to_confirm: vec![],
                    soft_suggestion: vec![],
                    triggers: vec![],
                },
            ],
            negotiation_suggestions: vec![],
            disclaimer: String::new(),
        }
    }

    /// Scripted stand-in for the remote client. Records the order of
    /// calls and the identifiers each step received.
    struct ScriptedApi {
        calls: Mutex<Vec<String>>,
        uploaded_document_id: String,
        fail_step: Option<&'static str>,
    }

    impl ScriptedApi {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                uploaded_document_id: DOC_ID.into(),
                fail_step: None,
            }
        }

        fn failing_at(step: &'static str) -> Self {
            Self {
                fail_step: Some(step),
                ..Self::new()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn fail(&self, step: &str) -> Result<(), ApiError> {
            if self.fail_step == Some(step) {
                return Err(ApiError::Api {
                    status: 422,
                    code: "EXTRACTION_FAILED".into(),
                    message: "step failed".into(),
                    details: None,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AnalysisApi for ScriptedApi {
        async fn upload_document(&self, file: &UploadFile) -> Result<Document, ApiError> {
            self.calls.lock().unwrap().push(format!("upload:{}", file.file_name));
            self.fail("upload")?;
            Ok(Document {
                document_id: self.uploaded_document_id.clone(),
                original_file_name: file.file_name.clone(),
                content_type: Some(file.content_type.clone()),
                size_bytes: Some(file.size_bytes()),
                created_at: None,
                status: DocumentStatus::Uploaded,
                extracted_text: None,
                text_length: None,
                text_sha256: None,
            })
        }

        async fn extract_document(
            &self,
            document_id: &str,
        ) -> Result<ExtractionResult, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("extract:{}", document_id));
            self.fail("extract")?;
            Ok(ExtractionResult {
                document_id: document_id.into(),
                text_length: 1024,
                text_sha256: "deadbeef".into(),
            })
        }

        async fn create_analysis(
            &self,
            document_id: &str,
            _contract_type: ContractType,
            _user_profile: UserProfile,
            _language: &str,
        ) -> Result<Analysis, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("analyze:{}", document_id));
            self.fail("analyze")?;
            Ok(test_analysis())
        }
    }

    #[tokio::test]
    async fn happy_path_runs_three_steps_in_order() {
        let pipeline = AnalysisPipeline::new(ScriptedApi::new());

        let analysis = pipeline
            .run(
                test_file(),
                ContractType::Freelancer,
                UserProfile::Student,
                DEFAULT_LANGUAGE,
            )
            .await
            .unwrap();

        assert_eq!(analysis, test_analysis());
        assert_eq!(
            pipeline.api().calls(),
            vec![
                "upload:contract.pdf".to_string(),
                format!("extract:{}", DOC_ID),
                format!("analyze:{}", DOC_ID),
            ]
        );
    }

    #[tokio::test]
    async fn extract_failure_skips_analysis() {
        let pipeline = AnalysisPipeline::new(ScriptedApi::failing_at("extract"));

        let err = pipeline
            .run(
                test_file(),
                ContractType::Employment,
                UserProfile::EntryLevel,
                DEFAULT_LANGUAGE,
            )
            .await
            .unwrap_err();

        // The first error propagates verbatim, code intact.
        assert_eq!(err.code(), "EXTRACTION_FAILED");
        let calls = pipeline.api().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].starts_with("extract:"));
    }

    #[tokio::test]
    async fn upload_failure_stops_everything() {
        let pipeline = AnalysisPipeline::new(ScriptedApi::failing_at("upload"));

        let err = pipeline
            .run(
                test_file(),
                ContractType::Lease,
                UserProfile::GeneralConsumer,
                DEFAULT_LANGUAGE,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Api { .. }));
        assert_eq!(pipeline.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_document_id_is_invalid_response() {
        let api = ScriptedApi {
            uploaded_document_id: String::new(),
            ..ScriptedApi::new()
        };
        let pipeline = AnalysisPipeline::new(api);

        let err = pipeline
            .run(
                test_file(),
                ContractType::Nda,
                UserProfile::Freelancer,
                DEFAULT_LANGUAGE,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        // Extraction must never have been attempted.
        assert_eq!(pipeline.api().calls().len(), 1);
    }
}
