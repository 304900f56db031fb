//! outguard - overlapping output detection for incremental builds
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use outguard::cli::{Cli, Commands};
use outguard::config::{Config, ConfigManager, LogFormat};
use outguard::error::{OutguardError, OutguardResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> OutguardResult<()> {
    let cli = Cli::parse();

    // Config comes first so general.log_format can pick the formatter
    let config = load_config(&cli)?;
    let log_format = config.general.log_format()?;
    init_logging(cli.verbose.max(u8::from(config.general.verbose)), log_format);
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Detect(args) => outguard::cli::commands::detect(args, &config),
        Commands::Record(args) => outguard::cli::commands::record(args),
        Commands::Analyze(args) => outguard::cli::commands::analyze(args, &config),
        Commands::Config(args) => {
            outguard::cli::commands::config(args, &config, cli.config.as_deref())
        }
    }
}

fn load_config(cli: &Cli) -> OutguardResult<Config> {
    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let local_config_path = if cli.no_local {
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| OutguardError::io("getting current directory", e))?;
        ConfigManager::find_local_config(&cwd)
    };

    config_manager.load_merged(local_config_path.as_deref())
}

/// 0 = warn, 1 = info, 2+ = debug. Logs go to stderr so reports on stdout
/// stay machine-readable.
fn init_logging(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => EnvFilter::new("outguard=warn"),
        1 => EnvFilter::new("outguard=info"),
        _ => EnvFilter::new("outguard=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.without_time().init(),
    }
}
