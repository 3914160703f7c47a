//! # Error Taxonomy
//!
//! Only failures that end a run are represented here. Row, field and profile
//! decoding problems never leave the parser; they degrade to a skip or a
//! default value.

use std::path::PathBuf;

/// The feed could not be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{0} answered with status {1}")]
    Status(String, u16),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The server document could not be persisted.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to serialize server document: {0}")]
    Serialize(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a run ended without producing a server list.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to download feed: {0}")]
    Feed(#[from] FeedError),
    #[error("no servers found in data")]
    NoRecords,
    #[error("no servers passed the country and score filter")]
    NoneQualified,
    #[error("no working servers found ({tested} tested)")]
    NoneReachable { tested: usize },
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl PipelineError {
    /// Empty-result conditions end the run cleanly; everything else is a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            PipelineError::NoRecords
                | PipelineError::NoneQualified
                | PipelineError::NoneReachable { .. }
        )
    }
}
