//! Clap derive structures for the `intercheck` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use intercheck_api::LogFormat;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// intercheck -- terminal dashboard for an Intercheck speed-test server
#[derive(Debug, Parser)]
#[command(
    name = "intercheck",
    version,
    about = "Watch and control an Intercheck speed-test server",
    long_about = "Polls an Intercheck server for connectivity status and speed-test\n\
        summaries, forces tests on demand, and edits server settings.",
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
    /// Server URL (overrides the config file)
    #[arg(long, short = 's', env = "INTERCHECK_SERVER", global = true)]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Color Enum ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the live dashboard; reads commands from stdin
    #[command(alias = "w")]
    Watch,

    /// Poll the server status once
    #[command(alias = "st")]
    Status,

    /// Ask the server to run a speed test now
    Force(ForceArgs),

    /// Show the speed-test summary
    #[command(alias = "sum")]
    Summary,

    /// Change a server setting
    Set(SetArgs),

    /// Restore one setting, or all settings, to the server default
    Reset(ResetArgs),

    /// Download the raw speed-test log
    #[command(alias = "dl")]
    Download(DownloadArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ForceArgs {
    /// Keep polling until the forced test has finished
    #[arg(long, short = 'w')]
    pub wait: bool,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Field name (e.g. intercheck-settings-interval)
    pub field: String,

    /// New value; boolean fields take true or false
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Field to reset; all fields when omitted
    pub field: Option<String>,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Log format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: LogFormatArg,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Csv,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Csv => Self::Csv,
            LogFormatArg::Json => Self::Json,
        }
    }
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
    /// Print the effective configuration (file + environment)
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
