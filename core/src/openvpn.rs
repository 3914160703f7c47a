//! Decoding of the base64 OpenVPN profile embedded in every feed row.
//!
//! Decoding never fails: bad base64 gives an empty profile, bad UTF-8 bytes
//! are dropped, a missing `remote` directive falls back to port 443.

use std::fmt;
use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::alphabet;
use regex::Regex;
use relaygen_common::config::DEFAULT_PORT;

static REMOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"remote\s+(\S+)\s+(\d+)").expect("valid remote regex"));
static PROTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"proto\s+(tcp|udp)").expect("valid proto regex"));

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    #[default]
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "tcp"),
            Transport::Udp => write!(f, "udp"),
        }
    }
}

/// What the client needs to know about a relay's OpenVPN profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenVpnProfile {
    /// Host token of the `remote` directive, if there was one.
    pub remote_host: Option<String>,
    pub port: u16,
    pub transport: Transport,
    /// Decoded profile text; empty when no `remote` directive was found.
    pub text: String,
}

impl Default for OpenVpnProfile {
    fn default() -> Self {
        Self {
            remote_host: None,
            port: DEFAULT_PORT,
            transport: Transport::Udp,
            text: String::new(),
        }
    }
}

impl OpenVpnProfile {
    pub fn from_blob(blob: &str) -> Self {
        Self::from_text(decode_blob(blob))
    }

    pub fn from_text(text: String) -> Self {
        let Some((host, port)) = find_remote(&text) else {
            return Self::default();
        };

        let transport: Transport = PROTO_RE
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| match m.as_str() {
                "tcp" => Transport::Tcp,
                _ => Transport::Udp,
            })
            .unwrap_or_default();

        Self {
            remote_host: Some(host),
            port,
            transport,
            text,
        }
    }
}

fn find_remote(text: &str) -> Option<(String, u16)> {
    let caps = REMOTE_RE.captures(text)?;
    let host: String = caps.get(1)?.as_str().to_string();
    let port: u16 = caps.get(2)?.as_str().parse().ok()?;
    Some((host, port))
}

/// Base64 to text. Embedded whitespace is ignored, undecodable input yields
/// an empty string and invalid UTF-8 sequences are dropped.
pub fn decode_blob(blob: &str) -> String {
    let compact: String = blob.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return String::new();
    }

    match LENIENT.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).replace('\u{FFFD}', ""),
        Err(_) => String::new(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
