//! Tracing setup for the binary.
//!
//! Logs go to a daily file under the data directory so stdout stays clean
//! for command output; `--verbose` sends them to stderr instead.

use std::path::PathBuf;

use color_eyre::{eyre::eyre, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// `$XDG_DATA_HOME/hrdesk`, or the working directory when there is none.
pub fn log_dir() -> PathBuf {
  dirs::data_dir()
    .map(|d| d.join("hrdesk"))
    .unwrap_or_else(|| PathBuf::from("."))
}

/// `RUST_LOG` wins over the configured level.
fn make_filter(config: &LogConfig) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level))
}

fn level_filter(level: &str) -> EnvFilter {
  EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit or
/// buffered file output is lost.
pub fn init(config: &LogConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
  if verbose {
    tracing_subscriber::fmt()
      .with_env_filter(make_filter(config))
      .with_target(true)
      .with_writer(std::io::stderr)
      .try_init()
      .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;
    return Ok(None);
  }

  let dir = log_dir();
  std::fs::create_dir_all(&dir).map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(&dir, "hrdesk.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(make_filter(config))
    .with_target(true)
    .with_ansi(false)
    .with_writer(writer)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  tracing::debug!(dir = %dir.display(), "logging initialized");
  Ok(Some(guard))
}
