//! # Result Assembler
//!
//! Turns reachable probe outcomes into the persisted server document.
//! Ranking is re-derived from the score; probe completion order carries no
//! meaning here.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use relaygen_common::config::{PLACEHOLDER_CREDENTIAL, PROTOCOL_TAG, SCHEMA_VERSION};
use relaygen_common::error::WriteError;
use relaygen_common::models::{OutputRecord, ProbeOutcome, ServerDocument};
use sha2::{Digest, Sha256};

use crate::openvpn::OpenVpnProfile;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Builds the document from the best `limit` reachable outcomes.
pub fn assemble(outcomes: Vec<ProbeOutcome>, limit: usize, now: DateTime<Utc>) -> ServerDocument {
    let mut working: Vec<ProbeOutcome> = outcomes.into_iter().filter(|o| o.reachable).collect();
    working.sort_by(|a, b| b.candidate.score.cmp(&a.candidate.score));
    working.truncate(limit);

    ServerDocument {
        servers: working.iter().map(to_output_record).collect(),
        version: SCHEMA_VERSION.to_string(),
        last_updated: timestamp(now),
    }
}

pub fn to_output_record(outcome: &ProbeOutcome) -> OutputRecord {
    let candidate = &outcome.candidate;
    let profile: OpenVpnProfile = OpenVpnProfile::from_blob(&candidate.config_blob);

    OutputRecord {
        id: relay_id(&candidate.address),
        name: candidate.display_name.clone(),
        country: candidate.country_code.clone(),
        city: candidate.country_long.clone(),
        endpoint: candidate.address.clone(),
        port: outcome.resolved_port,
        protocol: PROTOCOL_TAG.to_string(),
        config: profile.text,
        username: PLACEHOLDER_CREDENTIAL.to_string(),
        password: PLACEHOLDER_CREDENTIAL.to_string(),
        psk: PLACEHOLDER_CREDENTIAL.to_string(),
        ping_latency: candidate.latency_ms,
        vpn_sessions: candidate.session_count,
        throughput: throughput_mb(candidate.throughput_bps),
    }
}

/// Decimal rendering of the first 64 bits of SHA-256(address), top bit cleared
/// so it also reads as a positive signed value.
pub fn relay_id(address: &str) -> String {
    let digest = Sha256::digest(address.as_bytes());
    let mut head: [u8; 8] = [0; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(head) >> 1).to_string()
}

/// Bytes per second to MB/s, two decimals.
pub fn throughput_mb(bytes_per_sec: u64) -> f64 {
    let mb: f64 = bytes_per_sec as f64 / BYTES_PER_MB;
    (mb * 100.0).round() / 100.0
}

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn to_json(document: &ServerDocument) -> Result<String, WriteError> {
    serde_json::to_string_pretty(document).map_err(|e| WriteError::Serialize(e.to_string()))
}

/// Replaces `path` with the serialized document. Not atomic.
pub async fn write_document(path: &Path, document: &ServerDocument) -> Result<(), WriteError> {
    let json: String = to_json(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
