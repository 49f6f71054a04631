//! CLI argument parsing for Cosechar

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for schedulability reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table per version (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "cosechar")]
#[command(version)]
#[command(about = "Aggregate scheduler simulation results into schedulability summaries", long_about = None)]
pub struct Cli {
    /// Version tokens to aggregate (e.g. v7 v8)
    #[arg(required = true, value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Root directory of the result tree
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Entry field holding the missed-deadline counter
    #[arg(
        long = "missed-field",
        value_name = "NAME",
        default_value = "MissedDeadlineCounter"
    )]
    pub missed_field: String,

    /// Entry field holding the packet counter
    #[arg(long = "pkt-field", value_name = "NAME", default_value = "PktCounter")]
    pub pkt_field: String,

    /// Result-file extension (matched case-insensitively)
    #[arg(long = "extension", value_name = "EXT", default_value = "json")]
    pub extension: String,

    /// Confidence level for per-metric intervals (default: 0.95)
    #[arg(
        long = "confidence",
        value_name = "LEVEL",
        default_value_t = crate::stats::DEFAULT_CONFIDENCE
    )]
    pub confidence: f64,

    /// Include per-metric confidence intervals in the report
    #[arg(long = "intervals")]
    pub intervals: bool,

    /// Also render the comparison chart to this PNG path
    #[arg(long = "plot", value_name = "FILE")]
    pub plot: Option<PathBuf>,

    /// Logarithmic x-axis for the chart
    #[arg(long = "log-x")]
    pub log_x: bool,

    /// Logarithmic y-axis for the chart (drops zero-valued points)
    #[arg(long = "log-y")]
    pub log_y: bool,

    /// Annotate each chart point with its value
    #[arg(long = "annotate")]
    pub annotate: bool,

    /// Enable debug-level diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_versions() {
        let cli = Cli::parse_from(["cosechar", "v7", "v8"]);
        assert_eq!(cli.versions, vec!["v7", "v8"]);
    }

    #[test]
    fn test_cli_requires_a_version() {
        assert!(Cli::try_parse_from(["cosechar"]).is_err());
    }

    #[test]
    fn test_cli_default_data_dir() {
        let cli = Cli::parse_from(["cosechar", "v7"]);
        assert_eq!(cli.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_cli_default_fields() {
        let cli = Cli::parse_from(["cosechar", "v7"]);
        assert_eq!(cli.missed_field, "MissedDeadlineCounter");
        assert_eq!(cli.pkt_field, "PktCounter");
        assert_eq!(cli.extension, "json");
    }

    #[test]
    fn test_cli_confidence_default() {
        let cli = Cli::parse_from(["cosechar", "v7"]);
        assert_eq!(cli.confidence, 0.95);
        assert!(!cli.intervals);
    }

    #[test]
    fn test_cli_confidence_custom() {
        let cli = Cli::parse_from(["cosechar", "--confidence", "0.99", "--intervals", "v7"]);
        assert_eq!(cli.confidence, 0.99);
        assert!(cli.intervals);
    }

    #[test]
    fn test_cli_plot_flags() {
        let cli = Cli::parse_from([
            "cosechar", "--plot", "out.png", "--log-y", "--annotate", "v7",
        ]);
        assert_eq!(cli.plot, Some(PathBuf::from("out.png")));
        assert!(cli.log_y);
        assert!(!cli.log_x);
        assert!(cli.annotate);
    }

    #[test]
    fn test_cli_format_default_text() {
        let cli = Cli::parse_from(["cosechar", "v7"]);
        assert!(matches!(cli.format, OutputFormat::Text));
    }
}
