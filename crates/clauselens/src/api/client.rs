//! Typed HTTP client for the contract analysis service.
//!
//! Every operation talks to the versioned REST API under `/api/v1` and
//! interprets the uniform `{success, data, error}` envelope in one place
//! (`decode_envelope`). Identifier parameters are checked against the
//! canonical UUID shape before any request is built, so malformed input
//! never reaches the network.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ApiError, Result};
use super::messages::UNKNOWN_ERROR_MESSAGE;
use super::types::{
    Analysis, ContractType, Document, DocumentStatus, ExtractionResult, UploadFile, UserProfile,
};

/// Versioned base path, fixed per deployment.
pub const API_PREFIX: &str = "/api/v1";

/// Language tag sent with analysis requests unless the caller overrides it.
pub const DEFAULT_LANGUAGE: &str = "ko-KR";

/// History page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default overall request timeout (5 minutes). Analysis creation is
/// LLM-bound and can take well over a minute.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

static UUID_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID shape regex is valid")
});

/// Returns true for the canonical 8-4-4-4-12 hex UUID shape, either case.
fn is_canonical_uuid(value: &str) -> bool {
    UUID_SHAPE.is_match(value)
}

/// Rejects empty or non-UUID identifier parameters before any network call.
fn require_uuid(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ApiError::validation(format!("{}가 필요합니다.", field)));
    }
    if !is_canonical_uuid(value) {
        return Err(ApiError::validation(format!(
            "올바른 UUID 형식이 아닙니다: {}",
            value
        )));
    }
    Ok(())
}

/// Response envelope every endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Interprets one response body against the envelope contract.
///
/// Non-JSON failure statuses have no envelope to read and become `Http`.
/// A `success:false` envelope becomes `Api` with the server's code and
/// message (generic fallbacks when absent). A `success:true` envelope
/// without `data` is a contract violation reported as code `NO_DATA`.
fn decode_envelope<T: DeserializeOwned>(status: u16, is_json: bool, body: &[u8]) -> Result<T> {
    if !is_json && !(200..300).contains(&status) {
        return Err(ApiError::Http { status });
    }

    let envelope: Envelope<T> = serde_json::from_slice(body)?;

    if !envelope.success {
        let error = envelope.error.unwrap_or_default();
        return Err(ApiError::Api {
            status,
            code: error.code.unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
            message: error
                .message
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            details: error.details,
        });
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => Err(ApiError::Api {
            status,
            code: "NO_DATA".to_string(),
            message: "응답 데이터가 없습니다.".to_string(),
            details: None,
        }),
    }
}

/// Document payload as the server sends it. Upload responses omit the
/// extraction fields; GET responses may include them. The server never
/// sends a status, so the client stamps `uploaded` on conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DocumentPayload {
    document_id: String,
    original_file_name: String,
    content_type: Option<String>,
    size_bytes: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    extracted_text: Option<String>,
    text_length: Option<u64>,
    text_sha256: Option<String>,
}

impl DocumentPayload {
    fn into_document(self) -> Document {
        Document {
            document_id: self.document_id,
            original_file_name: self.original_file_name,
            content_type: self.content_type,
            size_bytes: self.size_bytes,
            created_at: self.created_at,
            status: DocumentStatus::Uploaded,
            extracted_text: self.extracted_text,
            text_length: self.text_length,
            text_sha256: self.text_sha256,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAnalysisRequest<'a> {
    document_id: &'a str,
    contract_type: ContractType,
    user_profile: UserProfile,
    language: &'a str,
}

/// The subset of client operations the upload pipeline depends on.
/// Kept narrow so the pipeline can be exercised with a scripted double.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn upload_document(&self, file: &UploadFile) -> Result<Document>;
    async fn extract_document(&self, document_id: &str) -> Result<ExtractionResult>;
    async fn create_analysis(
        &self,
        document_id: &str,
        contract_type: ContractType,
        user_profile: UserProfile,
        language: &str,
    ) -> Result<Analysis>;
}

/// HTTP client for the analysis service.
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Creates a client with default timeouts.
    ///
    /// `base_url` is the deployment root, e.g. `https://api.example.com`
    /// (trailing slash tolerated); `/api/v1` is appended per request.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Builds a client from the loaded configuration.
    pub fn from_config(config: &crate::config::ApiConfig) -> Result<Self> {
        Self::with_timeouts(
            config.base_url.clone(),
            config.connect_timeout(),
            config.request_timeout(),
        )
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Sends a request and interprets the envelope. All read/create
    /// operations except upload funnel through here.
    async fn request<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let response = builder
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let is_json = response_is_json(&response);
        let body = response.bytes().await?;
        decode_envelope(status, is_json, &body)
    }

    /// Multipart upload. The server is authoritative on size/type; the
    /// dropzone-style checks live in the pipeline's intake step. One
    /// attempt, no chunking or resume.
    pub async fn upload_document(&self, file: &UploadFile) -> Result<Document> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);

        info!(
            filename = %file.file_name,
            size_bytes = file.size_bytes(),
            "uploading document"
        );

        let response = self
            .http
            .post(self.endpoint("/documents"))
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let is_json = response_is_json(&response);
        let body = response.bytes().await?;

        let document = decode_upload(status, is_json, &body)?;
        debug!(document_id = %document.document_id, "document uploaded");
        Ok(document)
    }

    /// Triggers server-side text extraction for an uploaded document.
    /// Idempotency of repeated calls is whatever the server defines.
    pub async fn extract_document(&self, document_id: &str) -> Result<ExtractionResult> {
        require_uuid("documentId", document_id)?;
        info!(document_id, "requesting text extraction");
        self.request(
            self.http
                .post(self.endpoint(&format!("/documents/{}/extract", document_id))),
        )
        .await
    }

    /// Requests a new analysis of an extracted document.
    pub async fn create_analysis(
        &self,
        document_id: &str,
        contract_type: ContractType,
        user_profile: UserProfile,
        language: &str,
    ) -> Result<Analysis> {
        require_uuid("documentId", document_id)?;
        if language.is_empty() {
            return Err(ApiError::validation("language가 필요합니다."));
        }

        let body = CreateAnalysisRequest {
            document_id,
            contract_type,
            user_profile,
            language,
        };
        info!(
            document_id,
            contract_type = contract_type.as_str(),
            user_profile = user_profile.as_str(),
            language,
            "requesting analysis"
        );
        self.request(self.http.post(self.endpoint("/analyses")).json(&body))
            .await
    }

    /// Fetches a completed analysis by identifier.
    pub async fn get_analysis(&self, analysis_id: &str) -> Result<Analysis> {
        require_uuid("analysisId", analysis_id)?;
        self.request(
            self.http
                .get(self.endpoint(&format!("/analyses/{}", analysis_id))),
        )
        .await
    }

    /// Fetches a document record, optionally with its extracted text.
    pub async fn get_document(&self, document_id: &str, include_text: bool) -> Result<Document> {
        require_uuid("documentId", document_id)?;
        let mut url = self.endpoint(&format!("/documents/{}", document_id));
        if include_text {
            url.push_str("?includeText=true");
        }
        let payload: DocumentPayload = self.request(self.http.get(url)).await?;
        Ok(payload.into_document())
    }

    /// Lists all analyses created for one document.
    pub async fn get_document_analyses(&self, document_id: &str) -> Result<Vec<Analysis>> {
        require_uuid("documentId", document_id)?;
        self.request(
            self.http
                .get(self.endpoint(&format!("/analyses/documents/{}", document_id))),
        )
        .await
    }

    /// Fetches one page of past analyses. Pages are zero-indexed;
    /// pagination is stateless, one request per page.
    pub async fn get_analysis_history(&self, page: u32, size: u32) -> Result<Vec<Analysis>> {
        self.request(
            self.http
                .get(self.endpoint(&format!("/analyses/history?page={}&size={}", page, size))),
        )
        .await
    }
}

/// Envelope interpretation for the upload endpoint. Unlike the shared
/// path, a `success:false` here falls back to the upload-specific
/// code/message, and a success payload without a document id is a
/// contract violation (`UploadFailed`).
fn decode_upload(status: u16, is_json: bool, body: &[u8]) -> Result<Document> {
    if !is_json && !(200..300).contains(&status) {
        return Err(ApiError::Http { status });
    }

    let envelope: Envelope<DocumentPayload> = serde_json::from_slice(body)?;
    if !envelope.success {
        let error = envelope.error.unwrap_or_default();
        return Err(ApiError::Api {
            status,
            code: error.code.unwrap_or_else(|| "INTERNAL_ERROR".to_string()),
            message: error
                .message
                .unwrap_or_else(|| "파일 업로드에 실패했습니다.".to_string()),
            details: error.details,
        });
    }

    match envelope.data {
        Some(payload) if !payload.document_id.is_empty() => Ok(payload.into_document()),
        _ => Err(ApiError::UploadFailed {
            status,
            message: "문서 업로드 후 documentId를 받지 못했습니다.".to_string(),
        }),
    }
}

fn response_is_json(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn upload_document(&self, file: &UploadFile) -> Result<Document> {
        AnalysisClient::upload_document(self, file).await
    }

    async fn extract_document(&self, document_id: &str) -> Result<ExtractionResult> {
        AnalysisClient::extract_document(self, document_id).await
    }

    async fn create_analysis(
        &self,
        document_id: &str,
        contract_type: ContractType,
        user_profile: UserProfile,
        language: &str,
    ) -> Result<Analysis> {
        AnalysisClient::create_analysis(self, document_id, contract_type, user_profile, language)
            .await
    }
}
