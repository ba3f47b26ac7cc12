//! Server error code to user-facing message mapping.
//!
//! The table is a pure function of the code and belongs to the client's
//! error-reporting boundary; callers render whatever comes back here and
//! never branch on individual codes themselves.

/// Fallback text for codes the table does not know.
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// Resolves a server error code to its localized user message.
/// Unrecognized codes fall back to the generic unknown-error text.
pub fn user_message(code: &str) -> &'static str {
    match code {
        "NOT_FOUND" => "요청한 리소스를 찾을 수 없습니다.",
        "DOCUMENT_NOT_FOUND" => "문서를 찾을 수 없습니다.",
        "UNSUPPORTED_FILE_TYPE" => "지원하지 않는 파일 형식입니다. PDF 파일만 업로드 가능합니다.",
        "OCR_NOT_IMPLEMENTED" => "이미지 OCR은 아직 지원하지 않습니다. PDF 파일만 업로드 가능합니다.",
        "FILE_TOO_LARGE" => "파일 크기가 너무 큽니다. 10MB 이하의 파일을 업로드해주세요.",
        "EXTRACTION_FAILED" => "텍스트 추출에 실패했습니다. 파일을 확인해주세요.",
        "LLM_UPSTREAM_ERROR" => "분석 엔진 응답이 불안정합니다. 잠시 후 다시 시도해주세요.",
        "JSON_REPAIR_FAILED" => "분석 결과 형식 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        "RATE_LIMITED" => "요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요.",
        "VALIDATION_ERROR" => "요청 값 검증에 실패했습니다.",
        "INTERNAL_ERROR" => "서버 내부 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        "NETWORK_ERROR" => "네트워크 오류가 발생했습니다. 연결을 확인해주세요.",
        _ => UNKNOWN_ERROR_MESSAGE,
    }
}
