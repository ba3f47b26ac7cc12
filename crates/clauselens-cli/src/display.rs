//! Terminal rendering for analyses, documents and history pages.

use clauselens::api::{user_message, Analysis, ApiError, ClauseItem, Document};
use clauselens::storage::{PinStore, PinnedClause};
use clauselens::view;

/// User-facing text for an API failure: field errors from the server's
/// detail object when present, else the server message, else the
/// code-table text.
pub fn api_error_message(err: &ApiError) -> String {
    if let Some(serde_json::Value::Object(map)) = err.details() {
        let joined: Vec<String> = map
            .values()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        if !joined.is_empty() {
            return joined.join(", ");
        }
    }

    match err {
        ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => user_message(err.code()).to_string(),
    }
}

/// Prints a full analysis: summary block, clause cards and the
/// analysis-level negotiation suggestions.
pub fn print_analysis(analysis: &Analysis, pins: &PinStore, pinned_only: bool) {
    println!("=== 분석 결과 {} ===", analysis.analysis_id);

    let counts = view::risk_counts(analysis);
    println!(
        "주의 필요 {}  확인 권장 {}  양호 {}",
        counts.warning, counts.check, counts.ok
    );
    for point in &analysis.overall_summary.key_points {
        println!("  - {}", point);
    }
    println!();

    let items = view::filter_items(analysis, pins, pinned_only);
    if items.is_empty() && pinned_only {
        println!("핀된 조항이 없습니다");
    }
    for (index, item) in items.iter().enumerate() {
        print_clause(
            item,
            index,
            pins.is_pinned(&analysis.analysis_id, &item.clause_id),
        );
    }

    if !analysis.negotiation_suggestions.is_empty() {
        println!("전체 협상 제안");
        for suggestion in &analysis.negotiation_suggestions {
            println!("  {}", suggestion);
        }
        println!();
    }

    if !analysis.disclaimer.is_empty() {
        println!("{}", analysis.disclaimer);
    }
}

fn print_clause(item: &ClauseItem, index: usize, pinned: bool) {
    let pin_marker = if pinned { " [핀]" } else { "" };
    println!(
        "조항 {} [{}]{} {}",
        index + 1,
        view::risk_label_text(item.label),
        pin_marker,
        item.title
    );
    if !item.risk_reason.is_empty() {
        println!("  {}", item.risk_reason);
    }

    if !item.what_to_confirm.is_empty() {
        println!("  확인 사항");
        for point in &item.what_to_confirm {
            println!("    - {}", point);
        }
    }

    if !item.soft_suggestion.is_empty() {
        println!("  협상 제안");
        for text in &item.soft_suggestion {
            println!("    - {}", text);
        }
    }
    println!();
}

/// One history entry: short id, first key point, counts, clause total.
pub fn print_history_card(analysis: &Analysis) {
    let short_id = analysis
        .analysis_id
        .get(..8)
        .unwrap_or(&analysis.analysis_id);
    println!("분석 {}", short_id);
    if let Some(point) = analysis.overall_summary.key_points.first() {
        println!("  {}", point);
    }
    let counts = view::risk_counts(analysis);
    println!(
        "  주의 필요 {}  확인 권장 {}  양호 {}",
        counts.warning, counts.check, counts.ok
    );
    println!("  총 {}개 조항 분석", analysis.items.len());
}

pub fn print_history(history: &[Analysis], page: u32, size: u32) {
    if history.is_empty() {
        if page == 0 {
            println!("분석 히스토리가 없습니다");
        } else {
            println!("페이지 {}에 항목이 없습니다", page + 1);
        }
        return;
    }

    for analysis in history {
        print_history_card(analysis);
        println!();
    }

    println!("페이지 {}", page + 1);
    // The API returns no total; a full page means there may be more.
    if history.len() as u32 == size {
        println!("다음 페이지: --page {}", page + 1);
    }
}

pub fn print_document(document: &Document) {
    println!("=== 문서 {} ===", document.document_id);
    println!("  파일명      {}", document.original_file_name);
    if let Some(content_type) = &document.content_type {
        println!("  형식        {}", content_type);
    }
    if let Some(size) = document.size_bytes {
        println!("  크기        {} bytes", size);
    }
    if let Some(created_at) = document.created_at {
        println!("  업로드 일시 {}", created_at.to_rfc3339());
    }
    if let Some(length) = document.text_length {
        println!("  추출 텍스트 {} chars", length);
    }
    if let Some(sha) = &document.text_sha256 {
        println!("  SHA-256     {}", sha);
    }
    if let Some(text) = &document.extracted_text {
        println!();
        println!("{}", text);
    }
}

pub fn print_pins(pins: &[PinnedClause]) {
    if pins.is_empty() {
        println!("핀된 조항이 없습니다");
        return;
    }
    for pin in pins {
        println!("{}  {}", pin.analysis_id, pin.clause_id);
    }
}
