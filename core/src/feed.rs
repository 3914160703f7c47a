//! Retrieves the raw CSV text of the relay feed, either over HTTP or from disk.

use relaygen_common::config::{FeedSource, FetchConfig};
use relaygen_common::error::FeedError;
use relaygen_common::{debug, info};
use reqwest::Client;
use reqwest::header::USER_AGENT;

/// Fetches the feed and decodes it as (lossy) UTF-8.
pub async fn fetch(source: &FeedSource, cfg: &FetchConfig) -> Result<String, FeedError> {
    let bytes: Vec<u8> = match source {
        FeedSource::Remote { url } => fetch_remote(url, cfg).await?,
        FeedSource::Local { path } => {
            info!("Reading relay feed from {}", path.display());
            tokio::fs::read(path).await.map_err(|source| FeedError::Read {
                path: path.clone(),
                source,
            })?
        }
    };

    let text: String = String::from_utf8_lossy(&bytes).into_owned();
    info!("Downloaded {} bytes", bytes.len());
    Ok(text)
}

async fn fetch_remote(url: &str, cfg: &FetchConfig) -> Result<Vec<u8>, FeedError> {
    info!("Downloading relay list from {url}");
    let client: Client = Client::builder()
        .timeout(cfg.timeout)
        .build()
        .map_err(|source| FeedError::Http {
            url: url.to_string(),
            source,
        })?;

    let resp = client
        .get(url)
        .header(USER_AGENT, &cfg.user_agent)
        .send()
        .await
        .map_err(|source| FeedError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    debug!("{url} answered {status}");
    if !status.is_success() {
        return Err(FeedError::Status(url.to_string(), status.as_u16()));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|source| FeedError::Http {
            url: url.to_string(),
            source,
        })?;
    Ok(body.to_vec())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
