use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info,podium=debug,podium_app=debug,podium_db=debug,podium_web=debug";

/// Logs go both to stdout and to `podium.log` in `PODIUM_LOG_DIR` (default
/// `logs/`), rotated daily. `RUST_LOG` overrides the default filter.
///
/// File output is flushed by a background worker that stops when the
/// returned guard is dropped, so keep it around until exit.
pub fn setup_logging() -> WorkerGuard {
    let log_dir = env::var("PODIUM_LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let file_appender = tracing_appender::rolling::daily(log_dir, "podium.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_thread_ids(true)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
