//! Wire types for the contract analysis service.
//!
//! All payloads use camelCase field names and SCREAMING_SNAKE_CASE enum
//! values on the wire; lists default to empty so older server responses
//! that omit them still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of contract being analyzed. Closed set defined by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    Freelancer,
    Employment,
    PartTime,
    Lease,
    Nda,
    Other,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Freelancer => "FREELANCER",
            ContractType::Employment => "EMPLOYMENT",
            ContractType::PartTime => "PART_TIME",
            ContractType::Lease => "LEASE",
            ContractType::Nda => "NDA",
            ContractType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "FREELANCER" => Ok(ContractType::Freelancer),
            "EMPLOYMENT" => Ok(ContractType::Employment),
            "PART_TIME" => Ok(ContractType::PartTime),
            "LEASE" => Ok(ContractType::Lease),
            "NDA" => Ok(ContractType::Nda),
            "OTHER" => Ok(ContractType::Other),
            _ => Err(format!(
                "unknown contract type '{}' (expected one of: freelancer, employment, part-time, lease, nda, other)",
                s
            )),
        }
    }
}

/// Who the user is, used by the server to tune the analysis. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserProfile {
    Student,
    EntryLevel,
    Freelancer,
    IndividualBusiness,
    GeneralConsumer,
}

impl UserProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserProfile::Student => "STUDENT",
            UserProfile::EntryLevel => "ENTRY_LEVEL",
            UserProfile::Freelancer => "FREELANCER",
            UserProfile::IndividualBusiness => "INDIVIDUAL_BUSINESS",
            UserProfile::GeneralConsumer => "GENERAL_CONSUMER",
        }
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "STUDENT" => Ok(UserProfile::Student),
            "ENTRY_LEVEL" => Ok(UserProfile::EntryLevel),
            "FREELANCER" => Ok(UserProfile::Freelancer),
            "INDIVIDUAL_BUSINESS" => Ok(UserProfile::IndividualBusiness),
            "GENERAL_CONSUMER" => Ok(UserProfile::GeneralConsumer),
            _ => Err(format!(
                "unknown user profile '{}' (expected one of: student, entry-level, freelancer, individual-business, general-consumer)",
                s
            )),
        }
    }
}

/// Risk label assigned to a clause by the analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    /// Must address before signing.
    Warning,
    /// Should verify with the counterparty.
    Check,
    /// No action needed.
    Ok,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Warning => "WARNING",
            RiskLabel::Check => "CHECK",
            RiskLabel::Ok => "OK",
        }
    }
}

/// Processing state of an uploaded document, as far as the client knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
}

/// An uploaded file known to the remote service. The client only ever
/// holds a transient copy; the server owns the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    pub original_file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub text_length: Option<u64>,
    #[serde(default)]
    pub text_sha256: Option<String>,
}

/// Result of triggering server-side text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub document_id: String,
    pub text_length: u64,
    pub text_sha256: String,
}

/// Per-label clause counts plus headline takeaways, computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub warning_count: u32,
    pub check_count: u32,
    pub ok_count: u32,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// One analyzed clause. Identity is (analysis_id, clause_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseItem {
    pub clause_id: String,
    pub title: String,
    pub label: RiskLabel,
    pub risk_reason: String,
    #[serde(default)]
    pub what_to_confirm: Vec<String>,
    #[serde(default)]
    pub soft_suggestion: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// One completed risk assessment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub analysis_id: String,
    pub overall_summary: OverallSummary,
    #[serde(default)]
    pub items: Vec<ClauseItem>,
    #[serde(default)]
    pub negotiation_suggestions: Vec<String>,
    #[serde(default)]
    pub disclaimer: String,
}

/// A file prepared for upload: name, content type and raw bytes.
/// Produced by the intake validator; consumed by the client.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}
