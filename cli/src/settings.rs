use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, ValueEnum};

/// How runs and views are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable log, one block per snapshot.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Graph input settings shared by every subcommand.
///
/// Each flag falls back to a `GRAPH_STEP_*` environment variable.
#[derive(Debug, Clone, Args)]
pub struct GraphArgs {
    /// Edge-list file, one "SOURCE TARGET" pair per line. Reads stdin when omitted.
    #[arg(short, long, env = "GRAPH_STEP_INPUT")]
    pub input: Option<PathBuf>,

    /// Treat every edge as directed. The env value accepts 1/0, yes/no,
    /// on/off, and true/false.
    #[arg(
        short,
        long,
        env = "GRAPH_STEP_DIRECTED",
        value_parser = BoolishValueParser::new()
    )]
    pub directed: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "GRAPH_STEP_FORMAT")]
    pub format: OutputFormat,
}

/// Log filter used when RUST_LOG is unset. Logs go to stderr.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Read the log filter, returning the default if unset or empty.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
