//! Tracing subscriber setup.

use std::path::Path;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs the global subscriber. The returned guard flushes buffered
/// records on drop and must live as long as `main`.
pub fn init_logging(config: &LogConfig) -> WorkerGuard {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.file.as_deref() {
        Some(log_file) => {
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let prefix = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("snip.log");
            Box::new(rolling::daily(dir, prefix))
        }
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(config.file.is_none());

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}
