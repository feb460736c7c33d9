//! formpilot - conditional form automation
//!
//! Main entry point for the formpilot CLI.

mod cli;
mod cmd_autofill;
mod cmd_check;
mod cmd_secret;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use formpilot_config::{Config, ConfigLoader, ConfigValidator, formpilot_dir};

use crate::cli::{Cli, Commands};

/// Log directory from configuration, or `~/.formpilot/logs`.
fn log_dir(config: &Config) -> PathBuf {
    config
        .logging
        .dir
        .as_deref()
        .map(|dir| PathBuf::from(ConfigLoader::expand_path(dir)))
        .unwrap_or_else(|| formpilot_dir().join("logs"))
}

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so command output on stdout stays parseable.
/// Log files rotate daily.
fn init_tracing(log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("formpilot")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the life of the process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

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

/// Log configuration warnings and fail on configuration errors.
fn check_config(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        for err in &result.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!(
            "{} has {} configuration error(s)",
            path.display(),
            result.errors.len()
        )
        .into());
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&log_dir(&config))?;
    check_config(&cli.config, &config)?;

    match cli.command {
        Commands::Check { page, output } => {
            cmd_check::handle_check(&config, &page, output.as_deref())
        }
        Commands::Mask {
            value,
            mask_type,
            mask_char,
            visible_chars,
        } => cmd_secret::handle_mask(&value, mask_type.into(), mask_char, visible_chars),
        Commands::Encrypt { value } => cmd_secret::handle_encrypt(&config, &value),
        Commands::Decrypt { ciphertext } => cmd_secret::handle_decrypt(&config, &ciphertext),
        Commands::Autofill { action } => cmd_autofill::handle_autofill_command(&config, action),
    }
}
