//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

use guidefeed::{FeedbackConfig, ObservationPlacement};

/// Guidefeed: operational feedback reports over cargo guide sheets
#[derive(Parser)]
#[command(name = "guidefeed")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "GUIDEFEED_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a report for a local sheet export
    Report {
        /// Path to the sheet (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Which report to build
        #[arg(short, long, default_value = "dep")]
        kind: ReportKind,

        /// Report date (DD/MM/YYYY or YYYY-MM-DD; default: today minus the lookback)
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Serve the reports over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Port for the HTTP server
        #[arg(short, long, default_value = "8000", env = "GUIDEFEED_PORT")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1", env = "GUIDEFEED_BIND")]
        bind: IpAddr,

        /// Seconds a fetched sheet stays fresh
        #[arg(long, default_value = "300", env = "GUIDEFEED_CACHE_TTL")]
        cache_ttl: u64,

        /// Allowed CORS origin (repeatable; any origin when omitted)
        #[arg(long = "allow-origin", value_name = "ORIGIN")]
        allow_origins: Vec<String>,

        #[command(flatten)]
        options: ReportOptions,
    },
}

/// Where the server reads its sheets from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Directory holding DEP.csv, TMA.csv and RCF.csv
    #[arg(long, env = "GUIDEFEED_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Key of the published spreadsheet to export sheets from
    #[arg(long, env = "GUIDEFEED_SHEET_KEY")]
    pub sheet_key: Option<String>,
}

/// Report knobs shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// Days before today reported when no date is given
    #[arg(long, default_value = "3", env = "GUIDEFEED_LOOKBACK_DAYS")]
    pub lookback_days: u32,

    /// Department label in the DEP title
    #[arg(long, default_value = "DEP")]
    pub department: String,

    /// Leave percentages out of the DEP feedback
    #[arg(long)]
    pub no_percentages: bool,

    /// Show each flight/destination line's share of the shift
    #[arg(long)]
    pub group_percentages: bool,

    /// Where observations go: group, rule, or both
    #[arg(long, default_value = "group")]
    pub observations: ObservationPlacement,

    /// Print an empty string instead of " - " when a group has no observations
    #[arg(long)]
    pub blank_placeholder: bool,
}

impl ReportOptions {
    pub fn to_config(&self) -> FeedbackConfig {
        let mut config = FeedbackConfig::default()
            .with_department(self.department.clone())
            .with_lookback_days(self.lookback_days)
            .with_percentages(!self.no_percentages)
            .with_group_percentages(self.group_percentages)
            .with_observation_placement(self.observations);
        if self.blank_placeholder {
            config = config.with_observation_placeholder("");
        }
        config
    }
}

/// Report family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportKind {
    /// Operational feedback on DEP guides
    #[default]
    Dep,
    /// Lost dock passwords
    Tma,
    /// Guides with a registered deviation
    Rcf,
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dep" | "feedback" => Ok(ReportKind::Dep),
            "tma" => Ok(ReportKind::Tma),
            "rcf" => Ok(ReportKind::Rcf),
            _ => Err(format!("Unknown report: {}. Use dep, tma, or rcf.", s)),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Dep => write!(f, "dep"),
            ReportKind::Tma => write!(f, "tma"),
            ReportKind::Rcf => write!(f, "rcf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_options_to_config() {
        let cli = Cli::parse_from([
            "guidefeed",
            "report",
            "DEP.csv",
            "--kind",
            "tma",
            "--no-percentages",
            "--observations",
            "both",
        ]);
        let Commands::Report { kind, options, .. } = cli.command else {
            panic!("expected report");
        };
        assert_eq!(kind, ReportKind::Tma);
        let config = options.to_config();
        assert!(!config.show_percentages);
        assert_eq!(config.observation_placement, ObservationPlacement::Both);
        assert_eq!(config.observation_placeholder, " - ");
    }

    #[test]
    fn test_serve_needs_one_source() {
        assert!(Cli::try_parse_from(["guidefeed", "serve", "--data-dir", "d", "--sheet-key", "k"]).is_err());
        let cli = Cli::try_parse_from(["guidefeed", "serve", "--data-dir", "d", "--allow-origin", "http://a"]).unwrap();
        let Commands::Serve { allow_origins, port, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(allow_origins, vec!["http://a".to_string()]);
        assert_eq!(port, 8000);
    }
}
