//! Turns the VPN Gate CSV text into [`CandidateRecord`]s.
//!
//! The feed is parsed positionally and never fails as a whole. A short row is
//! skipped, an unreadable number becomes 0.

use relaygen_common::models::CandidateRecord;
use relaygen_common::{debug, warn};

pub const MIN_FIELDS: usize = 15;

const HEADER_MARKERS: [&str; 2] = ["#HostName", "*HostName"];

const HOSTNAME: usize = 0;
const IP: usize = 1;
const SCORE: usize = 2;
const PING: usize = 3;
const SPEED: usize = 4;
const COUNTRY_LONG: usize = 5;
const COUNTRY_SHORT: usize = 6;
const VPN_SESSIONS: usize = 7;
const CONFIG_BASE64: usize = 14;

/// Row accounting for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub header_found: bool,
    pub rows_seen: usize,
    pub rows_short: usize,
    pub rows_without_address: usize,
}

pub fn parse_feed(text: &str) -> Vec<CandidateRecord> {
    parse_feed_with_report(text).0
}

pub fn parse_feed_with_report(text: &str) -> (Vec<CandidateRecord>, ParseReport) {
    let mut report: ParseReport = ParseReport::default();
    let mut records: Vec<CandidateRecord> = Vec::new();

    let mut lines = text.lines();
    if !lines.by_ref().any(is_header) {
        warn!("Could not find header line");
        return (records, report);
    }
    report.header_found = true;

    for line in lines {
        let line: &str = line.trim_end_matches('\r');
        if line.starts_with('*') || line.trim().is_empty() {
            continue;
        }

        report.rows_seen += 1;
        match parse_row(line) {
            RowParse::Record(record) => records.push(record),
            RowParse::Short => report.rows_short += 1,
            RowParse::NoAddress => report.rows_without_address += 1,
        }
    }

    debug!(
        "{} rows seen, {} short, {} without address",
        report.rows_seen, report.rows_short, report.rows_without_address
    );
    (records, report)
}

fn is_header(line: &str) -> bool {
    HEADER_MARKERS.iter().any(|marker| line.starts_with(marker))
}

enum RowParse {
    Record(CandidateRecord),
    Short,
    NoAddress,
}

fn parse_row(line: &str) -> RowParse {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < MIN_FIELDS {
        return RowParse::Short;
    }

    let address: &str = parts[IP].trim();
    if address.is_empty() {
        return RowParse::NoAddress;
    }

    RowParse::Record(CandidateRecord {
        display_name: parts[HOSTNAME].trim().to_string(),
        address: address.to_string(),
        score: number_or_zero(parts[SCORE]),
        latency_ms: number_or_zero(parts[PING]),
        throughput_bps: number_or_zero(parts[SPEED]),
        country_long: parts[COUNTRY_LONG].trim().to_string(),
        country_code: parts[COUNTRY_SHORT].trim().to_string(),
        session_count: number_or_zero(parts[VPN_SESSIONS]),
        config_blob: parts[CONFIG_BASE64].trim().to_string(),
    })
}

/// Empty, negative or non-numeric fields all read as 0.
fn number_or_zero(field: &str) -> u64 {
    field.trim().parse::<u64>().unwrap_or(0)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
