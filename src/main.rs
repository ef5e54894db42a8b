//! pagesum - persona-styled web page summaries
//!
//! Main entry point for the pagesum CLI.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagesum_config::{Config, ConfigLoader, ConfigValidator, FileSettingsStore};

use crate::cli::{Cli, Commands};

/// Initialize console and daily-rolling file logging.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = config.logging.resolved_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pagesum")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer when the process exits.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load_or_default(&config_path)?;
    init_tracing(&config)?;

    let validation = ConfigValidator::ensure_valid(&config)?;
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    info!("pagesum v{}", env!("CARGO_PKG_VERSION"));
    debug!("Config file: {}", config_path.display());

    let settings = Arc::new(FileSettingsStore::new(config.settings.resolved_path()));

    match cli.command {
        Commands::Summarize {
            url,
            length,
            html_file,
        } => {
            commands::check_api_key(settings.as_ref()).await;
            commands::summarize(&config, settings, &url, length, html_file.as_deref()).await
        }
        Commands::Settings { action } => commands::settings(&settings, action).await,
        Commands::Persona => commands::persona(&config, settings).await,
    }
}
