//! # Reachability Prober
//!
//! Checks that a relay accepts TCP connections before it is published.
//!
//! Every candidate is tried on the port of its OpenVPN profile first and then,
//! one after the other, on the fallback ports. The first port that accepts a
//! connection wins. Candidates are probed concurrently, at most
//! [`ProbeConfig::concurrency`] at a time, and every candidate yields exactly
//! one [`ProbeOutcome`] whatever happens on the wire.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use relaygen_common::config::ProbeConfig;
use relaygen_common::models::{CandidateRecord, ProbeOutcome};
use relaygen_common::{debug, success, warn};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::openvpn::OpenVpnProfile;

/// Called once per finished probe, in completion order.
pub type OutcomeCallback<'c> = dyn Fn(&ProbeOutcome) + Send + Sync + 'c;

/// A single connection attempt. Any failure, including a timeout, is `false`.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, host: &str, port: u16) -> bool;
}

/// Plain TCP handshake bounded by a timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    pub timeout: Duration,
}

impl TcpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, host: &str, port: u16) -> bool {
        match timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!("{host}:{port} refused: {e}");
                false
            }
            Err(_elapsed) => {
                debug!("{host}:{port} timed out after {:?}", self.timeout);
                false
            }
        }
    }
}

/// The port a candidate is expected to listen on.
pub fn primary_port(candidate: &CandidateRecord) -> u16 {
    OpenVpnProfile::from_blob(&candidate.config_blob).port
}

/// Primary port first, then each fallback port not already tried.
pub async fn probe_candidate<C>(
    connector: &C,
    candidate: CandidateRecord,
    fallback_ports: &[u16],
) -> ProbeOutcome
where
    C: Connector + ?Sized,
{
    let primary: u16 = primary_port(&candidate);

    if connector.connect(&candidate.address, primary).await {
        return ProbeOutcome::reachable(candidate, primary);
    }

    for &port in fallback_ports.iter().filter(|&&port| port != primary) {
        if connector.connect(&candidate.address, port).await {
            return ProbeOutcome::reachable(candidate, port);
        }
    }

    ProbeOutcome::unreachable(candidate, primary)
}

/// Probes every candidate with bounded concurrency and waits for all of them.
///
/// `on_outcome` fires in completion order; the returned outcomes are back in
/// candidate order.
pub async fn probe_all<C>(
    connector: &C,
    candidates: Vec<CandidateRecord>,
    cfg: &ProbeConfig,
    on_outcome: Option<&OutcomeCallback<'_>>,
) -> Vec<ProbeOutcome>
where
    C: Connector + ?Sized,
{
    let fallback_ports: &[u16] = &cfg.fallback_ports;

    let mut finished: Vec<(usize, ProbeOutcome)> = stream::iter(candidates.into_iter().enumerate().map(
        |(rank, candidate)| async move {
            (rank, probe_candidate(connector, candidate, fallback_ports).await)
        },
    ))
    .buffer_unordered(cfg.concurrency.max(1))
    .inspect(|(_, outcome)| {
        report(outcome);
        if let Some(callback) = on_outcome {
            callback(outcome);
        }
    })
    .collect::<Vec<(usize, ProbeOutcome)>>()
    .await;

    finished.sort_unstable_by_key(|(rank, _)| *rank);
    finished.into_iter().map(|(_, outcome)| outcome).collect()
}

fn report(outcome: &ProbeOutcome) {
    let candidate: &CandidateRecord = &outcome.candidate;
    if outcome.reachable {
        success!(
            "✓ {}:{} ({}) - Score: {}",
            candidate.address,
            outcome.resolved_port,
            candidate.country_code,
            candidate.score
        );
    } else {
        warn!(
            "✗ {} ({}) - Not reachable",
            candidate.address, candidate.country_code
        );
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
