//! Tracing setup: human-readable stderr output plus a daily log file

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "citelens=info";
const LOG_FILE_PREFIX: &str = "citelens.log";

/// Directory for log files, e.g. `~/.local/share/citelens/logs`
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("citelens").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the global subscriber
///
/// The filter comes from `RUST_LOG` when set. Keep the returned guard alive
/// for the lifetime of the program or buffered file output is lost.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create log directory: {}", e))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
