//! Clap derive structures for the `sentra` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sentra -- security-operations telemetry from the command line
#[derive(Debug, Parser)]
#[command(
    name = "sentra",
    version,
    about = "Query security activity telemetry from the command line",
    long_about = "A CLI for browsing a sentra telemetry backend:\n\
        paginated activity listings, aggregate statistics, and a live\n\
        watch mode that polls the backend on an interval.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SENTRA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "SENTRA_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SENTRA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SENTRA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SENTRA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Severity filter values accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Low,
    Medium,
    High,
}

impl From<SeverityArg> for sentra_core::Severity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Low => Self::Low,
            SeverityArg::Medium => Self::Medium,
            SeverityArg::High => Self::High,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List historical activities, one page at a time
    #[command(alias = "act", alias = "a")]
    Activities(ActivitiesArgs),

    /// Show aggregate statistics for the active day range
    #[command(alias = "st")]
    Stats(StatsArgs),

    /// Poll the backend continuously and print feed updates
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ActivitiesArgs {
    /// Page number to display
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Day range to query (defaults to the profile setting)
    #[arg(long, short = 'd')]
    pub days: Option<u32>,

    /// Records per page
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Filter by severity
    #[arg(long, short = 's', value_enum)]
    pub status: Option<SeverityArg>,

    /// Filter by log source
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Day range to query (defaults to the profile setting)
    #[arg(long, short = 'd')]
    pub days: Option<u32>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Day range to query (defaults to the profile setting)
    #[arg(long, short = 'd')]
    pub days: Option<u32>,

    /// Refresh interval (e.g. "30s", "2m")
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Filter by severity
    #[arg(long, short = 's', value_enum)]
    pub status: Option<SeverityArg>,

    /// Filter by log source
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Write a starter config file with a default profile
    Init {
        /// Backend base URL for the default profile
        #[arg(long, short = 'b')]
        backend: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
