use std::time::Duration;

use colored::*;
use relaygen_common::error::PipelineError;
use relaygen_common::models::OutputRecord;
use relaygen_common::{success, warn};
use relaygen_core::pipeline::RunSummary;

use crate::commands::Config;
use crate::mprint;
use crate::terminal::{colors, print};

const SHOWN_SERVERS: usize = 10;

type Detail = (String, ColoredString);

/// Prints the outcome of a run. Empty results are reported and swallowed,
/// everything else is handed back as a failure.
pub fn conclude(
    result: Result<RunSummary, PipelineError>,
    total_time: Duration,
    cfg: &Config,
) -> anyhow::Result<()> {
    match result {
        Ok(summary) => {
            print_summary(&summary, total_time, cfg);
            Ok(())
        }
        Err(err) if err.is_empty_result() => {
            print::header("zero relays saved", cfg.quiet);
            if cfg.quiet == 0 {
                print::no_results();
            }
            warn!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// `endpoint:port - city (country) - throughput MB/s`
pub fn server_line(server: &OutputRecord) -> String {
    format!(
        "{}:{} - {} ({}) - {} MB/s",
        server.endpoint, server.port, server.city, server.country, server.throughput
    )
}

fn print_summary(summary: &RunSummary, total_time: Duration, cfg: &Config) {
    let servers: &[OutputRecord] = &summary.document.servers;

    print::header("server summary", cfg.quiet);
    for (idx, server) in servers.iter().take(SHOWN_SERVERS).enumerate() {
        match cfg.quiet {
            0 => {
                print_server_tree(server, idx + 1);
                if idx + 1 != servers.len().min(SHOWN_SERVERS) {
                    mprint!();
                }
            }
            1 => {
                mprint!(&format!("{}. {}", idx + 1, server_line(server)));
            }
            _ => {}
        }
    }

    let saved: ColoredString = format!("{} servers", servers.len()).bold().green();
    let path: ColoredString = summary.output.display().to_string().bold();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Saved {saved} to {path} in {elapsed}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => success!("{}", output),
    }
}

fn print_server_tree(server: &OutputRecord, idx: usize) {
    let endpoint: String = format!("{}:{}", server.endpoint, server.port);
    print::tree_head(idx, &endpoint);

    let details: Vec<Detail> = vec![
        (
            "Where".to_string(),
            format!("{} ({})", server.city, server.country).normal(),
        ),
        (
            "Speed".to_string(),
            format!("{} MB/s", server.throughput).color(colors::THROUGHPUT),
        ),
        ("Ping".to_string(), format!("{} ms", server.ping_latency).normal()),
        ("Sessions".to_string(), server.vpn_sessions.to_string().normal()),
        ("Host".to_string(), server.name.color(colors::ENDPOINT)),
    ];
    print::as_tree_one_level(&details);
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
    use relaygen_common::error::FeedError;

    #[test]
    fn server_line_format() {
        let server = OutputRecord {
            endpoint: "5.6.7.8".to_string(),
            port: 1194,
            city: "United States".to_string(),
            country: "US".to_string(),
            throughput: 2.5,
            ..Default::default()
        };
        assert_eq!(server_line(&server), "5.6.7.8:1194 - United States (US) - 2.5 MB/s");
    }

    #[test]
    fn empty_results_are_not_failures() {
        let cfg = Config { quiet: 2, no_banner: true };
        assert!(conclude(Err(PipelineError::NoneQualified), Duration::ZERO, &cfg).is_ok());
        assert!(conclude(Err(PipelineError::NoneReachable { tested: 3 }), Duration::ZERO, &cfg).is_ok());

        let failure = PipelineError::Feed(FeedError::Status("http://feed".to_string(), 503));
        assert!(conclude(Err(failure), Duration::ZERO, &cfg).is_err());
    }
}
