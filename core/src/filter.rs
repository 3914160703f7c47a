//! Selection and ranking of parsed candidates.
//!
//! Only the allow-list and the score floor decide inclusion; ties keep the
//! order the feed listed them in.

use relaygen_common::config::FilterConfig;
use relaygen_common::models::CandidateRecord;

/// Keeps candidates from allowed territories whose score reaches the floor,
/// best score first. Equal scores keep their feed order.
pub fn rank(records: &[CandidateRecord], cfg: &FilterConfig) -> Vec<CandidateRecord> {
    let mut ranked: Vec<CandidateRecord> = records
        .iter()
        .filter(|record| qualifies(record, cfg))
        .cloned()
        .collect();
    sort_by_score(&mut ranked);
    ranked
}

pub fn qualifies(record: &CandidateRecord, cfg: &FilterConfig) -> bool {
    cfg.allows(&record.country_code) && record.score >= cfg.min_score
}

/// Stable, descending.
pub fn sort_by_score(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
