use std::time::Instant;

use relaygen_common::config::{FeedSource, FetchConfig, RunConfig};
use relaygen_common::error::PipelineError;
use relaygen_core::pipeline::{Pipeline, RunSummary};
use tracing::{Instrument, Span};

use crate::commands::{Config, GenerateArgs, report};
use crate::terminal::progress;

/// Offline run: local CSV in, nothing probed.
pub async fn generate(args: GenerateArgs, cfg: &Config) -> anyhow::Result<()> {
    let run_cfg: RunConfig = RunConfig {
        source: FeedSource::Local { path: args.input },
        filter: args.selection.filter(),
        output: args.selection.output,
        fetch: FetchConfig::default(),
        probe: None,
        max_servers: args.selection.limit,
    };

    let span: Span = progress::run_span("reading relay feed");
    let start_time: Instant = Instant::now();
    let result: Result<RunSummary, PipelineError> =
        Pipeline::run(&run_cfg).instrument(span).await;

    report::conclude(result, start_time.elapsed(), cfg)
}
