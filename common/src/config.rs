//! # Run Configuration
//!
//! Every tunable of a run lives in [`RunConfig`]. The defaults reproduce the
//! behaviour of the published server list: VPN Gate feed, 34 allowed
//! territories, score floor of 100 000, top 50 probed ten at a time, top 20
//! written out.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://www.vpngate.net/api/iphone/";
pub const DEFAULT_OUTPUT: &str = "servers.json";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub const MIN_SCORE: u64 = 100_000;

/// Territories whose relays are known to reach the services the client needs.
pub const ALLOWED_COUNTRIES: &[&str] = &[
    "JP", "US", "KR", "TW", "SG", "HK", "DE", "GB", "FR", "NL", "AU", "CA", "SE", "CH", "NO",
    "FI", "DK", "BE", "AT", "IT", "ES", "PT", "IE", "NZ", "PL", "CZ", "RO", "HU", "TH", "MY",
    "PH", "VN", "IN", "ID",
];

pub const PROBE_CANDIDATES: usize = 50;
pub const PROBE_CONCURRENCY: usize = 10;
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PORT: u16 = 443;
pub const FALLBACK_PORTS: [u16; 4] = [443, 1194, 992, 995];

pub const MAX_SERVERS: usize = 20;
pub const SCHEMA_VERSION: &str = "2.0";
pub const PLACEHOLDER_CREDENTIAL: &str = "vpn";
pub const PROTOCOL_TAG: &str = "OpenVPN";

/// Where the CSV feed comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    Remote { url: String },
    Local { path: PathBuf },
}

impl std::str::FromStr for FeedSource {
    type Err = String;

    /// Anything with an `http://` or `https://` scheme is fetched, everything
    /// else is read from disk.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err("feed source cannot be empty".to_string());
        }

        let lower: String = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(FeedSource::Remote {
                url: trimmed.to_string(),
            });
        }

        Ok(FeedSource::Local {
            path: PathBuf::from(trimmed),
        })
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Remote { url } => write!(f, "{url}"),
            FeedSource::Local { path } => write!(f, "{}", path.display()),
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Remote {
            url: DEFAULT_FEED_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: DOWNLOAD_TIMEOUT,
        }
    }
}

/// Inclusion predicates applied before ranking.
#[derive(Clone, Debug)]
pub struct FilterConfig {
    pub allowed_countries: Vec<String>,
    pub min_score: u64,
}

impl FilterConfig {
    pub fn allows(&self, country_code: &str) -> bool {
        self.allowed_countries.iter().any(|code| code == country_code)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_countries: ALLOWED_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            min_score: MIN_SCORE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// How many of the best ranked candidates get probed.
    pub candidates: usize,
    /// Simultaneous probes in flight.
    pub concurrency: usize,
    /// Applied to every single connect attempt.
    pub connect_timeout: Duration,
    pub fallback_ports: Vec<u16>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            candidates: PROBE_CANDIDATES,
            concurrency: PROBE_CONCURRENCY,
            connect_timeout: CONNECT_TIMEOUT,
            fallback_ports: FALLBACK_PORTS.to_vec(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub source: FeedSource,
    pub output: PathBuf,
    pub fetch: FetchConfig,
    pub filter: FilterConfig,
    /// `None` skips reachability testing; every qualified candidate is kept
    /// at its configured port.
    pub probe: Option<ProbeConfig>,
    pub max_servers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: FeedSource::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            fetch: FetchConfig::default(),
            filter: FilterConfig::default(),
            probe: Some(ProbeConfig::default()),
            max_servers: MAX_SERVERS,
        }
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
