use serde::{Deserialize, Serialize};

/// One relay entry as the client application reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub endpoint: String,
    pub port: u16,
    pub protocol: String,
    pub config: String,
    pub username: String,
    pub password: String,
    pub psk: String,
    pub ping_latency: u64,
    pub vpn_sessions: u64,
    /// MB/s, two decimals.
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDocument {
    pub servers: Vec<OutputRecord>,
    pub version: String,
    /// UTC, second precision, `Z` suffix.
    pub last_updated: String,
}
