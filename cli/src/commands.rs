pub mod generate;
pub mod report;
pub mod update;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use relaygen_common::config::{self, FeedSource, FilterConfig};

/// Display options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub quiet: u8,
    pub no_banner: bool,
}

#[derive(Parser)]
#[command(name = "relaygen")]
#[command(about = "Builds a ranked, reachability-checked VPN relay list from the VPN Gate feed.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output; repeat to drop the server tree as well
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// More log output; `-vv` for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the feed, test the best relays and write the server list
    #[command(alias = "u")]
    Update(UpdateArgs),
    /// Write the server list from a local CSV without testing reachability
    #[command(alias = "g")]
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Feed URL or path to a local CSV
    #[arg(long, default_value = config::DEFAULT_FEED_URL)]
    pub source: FeedSource,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// How many of the best ranked relays get tested
    #[arg(long, default_value_t = config::PROBE_CANDIDATES)]
    pub probe_limit: usize,

    /// Simultaneous connection tests
    #[arg(long, default_value_t = config::PROBE_CONCURRENCY)]
    pub concurrency: usize,

    /// Connect timeout per attempt, in seconds
    #[arg(long, default_value_t = config::CONNECT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Publish the best ranked relays without testing them
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Local VPN Gate CSV export
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Output and filter options common to both commands.
#[derive(Args, Debug)]
pub struct SelectionArgs {
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Maximum number of relays written
    #[arg(long, default_value_t = config::MAX_SERVERS)]
    pub limit: usize,

    /// Comma separated country codes replacing the built-in allow-list
    #[arg(long, value_delimiter = ',')]
    pub countries: Option<Vec<String>>,

    #[arg(long, default_value_t = config::MIN_SCORE)]
    pub min_score: u64,
}

impl SelectionArgs {
    pub fn filter(&self) -> FilterConfig {
        let allowed_countries: Vec<String> = match &self.countries {
            Some(codes) => codes
                .iter()
                .map(|code| code.trim().to_ascii_uppercase())
                .filter(|code| !code.is_empty())
                .collect(),
            None => FilterConfig::default().allowed_countries,
        };

        FilterConfig {
            allowed_countries,
            min_score: self.min_score,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn display_config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
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
