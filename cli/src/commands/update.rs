use std::time::{Duration, Instant};

use relaygen_common::config::{FetchConfig, ProbeConfig, RunConfig};
use relaygen_common::error::PipelineError;
use relaygen_common::models::ProbeOutcome;
use relaygen_core::pipeline::{Pipeline, RunSummary};
use tracing::{Instrument, Span};

use crate::commands::{Config, UpdateArgs, report};
use crate::terminal::progress;

pub async fn update(args: UpdateArgs, cfg: &Config) -> anyhow::Result<()> {
    let run_cfg: RunConfig = run_config(args);

    let start_time: Instant = Instant::now();
    let result: Result<RunSummary, PipelineError> = {
        let span: Span = progress::run_span("fetching relay feed");
        let on_probe_start = |total: usize| progress::start_probing(&span, total);
        let on_outcome = |_: &ProbeOutcome| progress::advance(&span);

        Pipeline::new(&run_cfg)
            .on_probe_start(&on_probe_start)
            .on_outcome(&on_outcome)
            .execute()
            .instrument(span.clone())
            .await
    };

    report::conclude(result, start_time.elapsed(), cfg)
}

fn run_config(args: UpdateArgs) -> RunConfig {
    let probe: Option<ProbeConfig> = (!args.no_probe).then(|| ProbeConfig {
        candidates: args.probe_limit,
        concurrency: args.concurrency,
        connect_timeout: Duration::from_secs(args.timeout),
        ..ProbeConfig::default()
    });

    RunConfig {
        source: args.source,
        filter: args.selection.filter(),
        output: args.selection.output,
        fetch: FetchConfig::default(),
        probe,
        max_servers: args.selection.limit,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandLine, Commands};
    use clap::Parser;

    fn update_args(args: &[&str]) -> UpdateArgs {
        match CommandLine::try_parse_from(args).unwrap().command {
            Commands::Update(args) => args,
            Commands::Generate(_) => panic!("expected update"),
        }
    }

    #[test]
    fn flags_reach_the_run_config() {
        let run_cfg: RunConfig = run_config(update_args(&[
            "relaygen", "update", "--probe-limit", "7", "--concurrency", "2", "--timeout", "1",
            "--limit", "3", "--output", "out/servers.json",
        ]));
        let probe: ProbeConfig = run_cfg.probe.unwrap();

        assert_eq!(probe.candidates, 7);
        assert_eq!(probe.concurrency, 2);
        assert_eq!(probe.connect_timeout, Duration::from_secs(1));
        assert_eq!(probe.fallback_ports, vec![443, 1194, 992, 995]);
        assert_eq!(run_cfg.max_servers, 3);
        assert_eq!(run_cfg.output.to_str(), Some("out/servers.json"));
    }

    #[test]
    fn no_probe_disables_testing() {
        let run_cfg: RunConfig = run_config(update_args(&["relaygen", "update", "--no-probe"]));
        assert!(run_cfg.probe.is_none());
    }
}
