//! File logging. The terminal belongs to the UI, so everything goes to a
//! log file through a non-blocking writer.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{PanelError, Result};

/// CLI level wins over the configured one
pub fn resolve_level<'a>(cli_level: Option<&'a str>, config_level: &'a str) -> &'a str {
    cli_level.unwrap_or(config_level)
}

/// Install the global subscriber. `RUST_LOG` overrides `level`. Keep the
/// returned guard alive for the life of the program.
pub fn init(log_file: &Path, level: &str) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| PanelError::Config(format!("Invalid log file path: {}", log_file.display())))?;

    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| PanelError::Config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(path = %log_file.display(), level, "logging initialized");
    Ok(guard)
}
