//! Tracing subscriber setup
//!
//! Console output always; an additional daily-rotated log file when one is
//! configured.

use relayswitch_core::LogLevel;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Number of rotated log files kept next to the active one
const MAX_LOG_FILES: usize = 10;

/// Build the filter: `RUST_LOG` wins, then `level`.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_str())
}

/// Initialize tracing subscriber for logging
///
/// The returned guard flushes the file writer and must be kept alive until
/// the daemon exits.
pub fn init_tracing(level: LogLevel, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let console = tracing_subscriber::fmt::layer().with_filter(env_filter(level));

    let Some(log_file) = log_file else {
        tracing_subscriber::registry().with(console).init();
        return Ok(None);
    };

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "relayd.log".to_string());

    std::fs::create_dir_all(directory)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(env_filter(level));

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(Some(guard))
}
