// 🪵 Logging setup
// RUST_LOG wins over the configured level.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Compact lines on stderr (CLI commands, server)
    Stderr,
    /// Daily-rolling file, keeps the terminal UI clean
    File,
}

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber.
///
/// For `LogTarget::File` the returned guard must be held until exit or
/// buffered lines are lost.
pub fn init_logging(config: &LoggingConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter(config))
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to set tracing subscriber")?;
            Ok(None)
        }
        LogTarget::File => {
            std::fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("Failed to create log directory {}", config.log_dir.display())
            })?;

            let file_appender = tracing_appender::rolling::daily(&config.log_dir, "networth.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter(config))
                .with_writer(non_blocking)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to set tracing subscriber")?;
            Ok(Some(guard))
        }
    }
}
