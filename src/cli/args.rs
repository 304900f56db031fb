//! CLI argument definitions using clap derive

use crate::config::Config;
use crate::error::{OutguardError, OutguardResult};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// outguard - Overlapping output detection for incremental builds
///
/// Decides from snapshot documents whether a task's output location was
/// touched by someone else, and which captured entries are the task's own
/// outputs.
#[derive(Parser, Debug)]
#[command(name = "outguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "OUTGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .outguard.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect overlapping outputs before a task executes
    Detect(DetectArgs),

    /// Build the output snapshot to record after a task executed
    Record(RecordArgs),

    /// Detect overlaps and build output snapshots for one execution
    Analyze(AnalyzeArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Outputs recorded after the previous execution (omit for a first run)
    #[arg(short, long)]
    pub previous: Option<PathBuf>,

    /// Snapshot captured immediately before this execution
    #[arg(short, long)]
    pub before: PathBuf,

    /// Report format (defaults to report.format from config)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Exit with an error when overlapping outputs are found
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the record command
#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Outputs recorded after the previous execution (omit for a first run)
    #[arg(short, long)]
    pub previous: Option<PathBuf>,

    /// Snapshot captured immediately before this execution
    #[arg(short, long)]
    pub before: PathBuf,

    /// Snapshot captured immediately after this execution
    #[arg(short, long)]
    pub after: PathBuf,

    /// Write the recorded outputs here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the analyze command
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Outputs recorded after the previous execution (omit for a first run)
    #[arg(short, long)]
    pub previous: Option<PathBuf>,

    /// Snapshot captured immediately before this execution
    #[arg(short, long)]
    pub before: PathBuf,

    /// Snapshot captured immediately after this execution
    #[arg(short, long)]
    pub after: PathBuf,

    /// Also write the recorded outputs to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format (defaults to report.format from config)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Exit with an error when overlapping outputs are found
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Use the explicit flag if given, otherwise the configured default
    pub fn resolve(flag: Option<Self>, config: &Config) -> OutguardResult<Self> {
        if let Some(format) = flag {
            return Ok(format);
        }

        match config.report.format.as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(OutguardError::User(format!(
                "Invalid report.format: {}. Use text or json",
                other
            ))),
        }
    }
}
