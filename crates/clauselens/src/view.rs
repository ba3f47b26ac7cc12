//! Pure derivations over a fetched analysis plus the pin store.
//!
//! Nothing here talks to the network; the only side channel is pin
//! membership reads. Display aggregates come from the server-computed
//! summary as given.

use crate::api::{Analysis, ClauseItem, RiskLabel};
use crate::storage::PinStore;

/// Per-label clause counts for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskCounts {
    pub warning: u32,
    pub check: u32,
    pub ok: u32,
}

/// Counts read from `overall_summary` verbatim, never recomputed from
/// the item list. If server and summary disagree, the summary wins on
/// screen and [`summary_matches_items`] reports the discrepancy.
pub fn risk_counts(analysis: &Analysis) -> RiskCounts {
    RiskCounts {
        warning: analysis.overall_summary.warning_count,
        check: analysis.overall_summary.check_count,
        ok: analysis.overall_summary.ok_count,
    }
}

/// Data-quality probe: do the summary counts match the actual item
/// labels? A false result is something to report, not to correct.
pub fn summary_matches_items(analysis: &Analysis) -> bool {
    let mut warning = 0u32;
    let mut check = 0u32;
    let mut ok = 0u32;
    for item in &analysis.items {
        match item.label {
            RiskLabel::Warning => warning += 1,
            RiskLabel::Check => check += 1,
            RiskLabel::Ok => ok += 1,
        }
    }
    let summary = &analysis.overall_summary;
    summary.warning_count == warning && summary.check_count == check && summary.ok_count == ok
}

/// Items the user pinned, in their original order.
pub fn pinned_items<'a>(analysis: &'a Analysis, pins: &PinStore) -> Vec<&'a ClauseItem> {
    analysis
        .items
        .iter()
        .filter(|item| pins.is_pinned(&analysis.analysis_id, &item.clause_id))
        .collect()
}

/// The item list as displayed: everything, or just the pinned subset.
pub fn filter_items<'a>(
    analysis: &'a Analysis,
    pins: &PinStore,
    pinned_only: bool,
) -> Vec<&'a ClauseItem> {
    if pinned_only {
        pinned_items(analysis, pins)
    } else {
        analysis.items.iter().collect()
    }
}

/// Clipboard payload for "copy all" negotiation text: entries separated
/// by a blank line, used verbatim. Works for both one clause's
/// suggestions and the analysis-level list.
pub fn negotiation_clipboard(suggestions: &[String]) -> String {
    suggestions.join("\n\n")
}

/// Clipboard payload for the summary copy: numbered clause titles, each
/// followed by its confirm prompts as `- ` bullets.
pub fn summary_clipboard(analysis: &Analysis) -> String {
    analysis
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let bullets: Vec<String> = item
                .what_to_confirm
                .iter()
                .map(|point| format!("- {}", point))
                .collect();
            format!("조항 {} {}\n{}", index + 1, item.title, bullets.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Localized display name for a risk label.
pub fn risk_label_text(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::Warning => "주의 필요",
        RiskLabel::Check => "확인 권장",
        RiskLabel::Ok => "양호",
    }
}
