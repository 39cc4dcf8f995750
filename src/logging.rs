//! File logging for the device process. There is no terminal to log to,
//! so everything goes to a daily rolling file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "bookreader.log";
const DEFAULT_FILTER: &str = "info,symphonia=warn";

/// Flushes the background writer on drop; hold it until exit.
pub struct LogGuard {
    _writer: WorkerGuard,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

impl LogConfig {
    /// `{data_dir}/logs` unless overridden. Read-only media fall back to a
    /// directory under the system temp dir.
    fn resolve_dir(&self, data_dir: &Path) -> PathBuf {
        let preferred = self.dir.clone().unwrap_or_else(|| data_dir.join("logs"));
        if fs::create_dir_all(&preferred).is_ok() {
            return preferred;
        }
        let fallback = std::env::temp_dir().join("bookreader-logs");
        let _ = fs::create_dir_all(&fallback);
        fallback
    }

    fn env_filter(&self) -> EnvFilter {
        match self.filter.as_deref().map(str::trim) {
            Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
            _ => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        }
    }
}

pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = cfg.resolve_dir(data_dir);
    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // end watchers and input readers run on named threads
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(cfg.env_filter())
        .with(file_layer)
        .try_init();
    tracing::info!(
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "logging started"
    );

    LogGuard { _writer: guard }
}
