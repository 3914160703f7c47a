/// A relay parsed from one feed row.
///
/// Never built from a row with fewer than 15 fields, and `address` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub display_name: String,
    pub address: String,
    pub score: u64,
    pub latency_ms: u64,
    pub throughput_bps: u64,
    pub country_long: String,
    pub country_code: String,
    pub session_count: u64,
    /// Base64 encoded OpenVPN profile; may be empty.
    pub config_blob: String,
}

impl CandidateRecord {
    pub fn has_config(&self) -> bool {
        !self.config_blob.trim().is_empty()
    }
}

/// Result of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub candidate: CandidateRecord,
    /// The port that answered, or the primary port when nothing did.
    pub resolved_port: u16,
    pub reachable: bool,
}

impl ProbeOutcome {
    pub fn reachable(candidate: CandidateRecord, port: u16) -> Self {
        Self {
            candidate,
            resolved_port: port,
            reachable: true,
        }
    }

    pub fn unreachable(candidate: CandidateRecord, primary_port: u16) -> Self {
        Self {
            candidate,
            resolved_port: primary_port,
            reachable: false,
        }
    }
}
