//! # Pipeline
//!
//! One run from feed to file: fetch, parse, drop rows without a profile,
//! filter and rank, probe (or trust) the best candidates, assemble, write.
//!
//! Every empty stage ends the run with its own [`PipelineError`] and nothing
//! is written in that case.

use std::path::PathBuf;

use chrono::Utc;
use relaygen_common::config::{ProbeConfig, RunConfig};
use relaygen_common::error::PipelineError;
use relaygen_common::models::{CandidateRecord, ProbeOutcome, ServerDocument};
use relaygen_common::{debug, info, success, warn};

use crate::assembler;
use crate::feed;
use crate::filter;
use crate::parser::{self, ParseReport};
use crate::prober::{self, Connector, OutcomeCallback, TcpConnector};

/// Called with the number of candidates right before probing starts.
pub type ProbeStartCallback<'c> = dyn Fn(usize) + Send + Sync + 'c;

/// Counts and result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub parsed: usize,
    pub with_config: usize,
    pub qualified: usize,
    /// Zero when probing was skipped.
    pub tested: usize,
    pub reachable: usize,
    pub document: ServerDocument,
    pub output: PathBuf,
}

pub struct Pipeline<'a> {
    config: &'a RunConfig,
    connector: Option<&'a dyn Connector>,
    on_probe_start: Option<&'a ProbeStartCallback<'a>>,
    on_outcome: Option<&'a OutcomeCallback<'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            connector: None,
            on_probe_start: None,
            on_outcome: None,
        }
    }

    /// Runs with the plain TCP connector and no progress hooks.
    pub async fn run(config: &RunConfig) -> Result<RunSummary, PipelineError> {
        Pipeline::new(config).execute().await
    }

    /// Replaces the TCP connector used for probing.
    pub fn with_connector(mut self, connector: &'a dyn Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn on_probe_start(mut self, callback: &'a ProbeStartCallback<'a>) -> Self {
        self.on_probe_start = Some(callback);
        self
    }

    pub fn on_outcome(mut self, callback: &'a OutcomeCallback<'a>) -> Self {
        self.on_outcome = Some(callback);
        self
    }

    pub async fn execute(&self) -> Result<RunSummary, PipelineError> {
        let cfg: &RunConfig = self.config;

        let text: String = feed::fetch(&cfg.source, &cfg.fetch).await?;

        let (mut records, report): (Vec<CandidateRecord>, ParseReport) =
            parser::parse_feed_with_report(&text);
        let parsed: usize = records.len();
        records.retain(CandidateRecord::has_config);
        let with_config: usize = records.len();

        info!("Parsed {with_config} servers with OpenVPN config");
        if with_config < parsed {
            debug!("{} servers dropped without an OpenVPN profile", parsed - with_config);
        }
        if report.rows_short > 0 {
            debug!("{} rows skipped with too few fields", report.rows_short);
        }
        if records.is_empty() {
            return Err(PipelineError::NoRecords);
        }

        let ranked: Vec<CandidateRecord> = filter::rank(&records, &cfg.filter);
        let qualified: usize = ranked.len();
        info!(
            "Filtered to {qualified} servers in {} allowed countries with score >= {}",
            cfg.filter.allowed_countries.len(),
            cfg.filter.min_score
        );
        if ranked.is_empty() {
            return Err(PipelineError::NoneQualified);
        }

        let (outcomes, tested): (Vec<ProbeOutcome>, usize) = match &cfg.probe {
            Some(probe_cfg) => {
                let outcomes: Vec<ProbeOutcome> = self.probe(ranked, probe_cfg).await;
                let tested: usize = outcomes.len();
                (outcomes, tested)
            }
            None => {
                info!("Skipping reachability tests");
                (assume_reachable(ranked), 0)
            }
        };

        let reachable: usize = outcomes.iter().filter(|o| o.reachable).count();
        if tested > 0 {
            info!("Found {reachable} working servers");
        }
        if reachable == 0 {
            warn!("No working servers found");
            return Err(PipelineError::NoneReachable { tested });
        }

        let document: ServerDocument = assembler::assemble(outcomes, cfg.max_servers, Utc::now());
        assembler::write_document(&cfg.output, &document).await?;
        success!(
            "Saved {} servers to {}",
            document.servers.len(),
            cfg.output.display()
        );

        Ok(RunSummary {
            parsed,
            with_config,
            qualified,
            tested,
            reachable,
            document,
            output: cfg.output.clone(),
        })
    }

    async fn probe(&self, mut ranked: Vec<CandidateRecord>, probe_cfg: &ProbeConfig) -> Vec<ProbeOutcome> {
        ranked.truncate(probe_cfg.candidates);
        info!("Testing connectivity for {} servers...", ranked.len());
        if let Some(callback) = self.on_probe_start {
            callback(ranked.len());
        }

        match self.connector {
            Some(connector) => prober::probe_all(connector, ranked, probe_cfg, self.on_outcome).await,
            None => {
                let tcp: TcpConnector = TcpConnector::new(probe_cfg.connect_timeout);
                prober::probe_all(&tcp, ranked, probe_cfg, self.on_outcome).await
            }
        }
    }
}

/// Without probing every candidate is published at its profile port.
fn assume_reachable(ranked: Vec<CandidateRecord>) -> Vec<ProbeOutcome> {
    ranked
        .into_iter()
        .map(|candidate| {
            let port: u16 = prober::primary_port(&candidate);
            ProbeOutcome::reachable(candidate, port)
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
