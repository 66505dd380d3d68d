//! Logging initialization

use super::config::{LogConfig, LOG_FILE_NAME};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber.
///
/// Sets up:
/// - Console output on stderr
/// - Optional daily-rotated file log under `DASHBOARD_LOG_DIR`
/// - Panic hook that records panics through `tracing`
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the file writer.
pub fn init() -> Option<WorkerGuard> {
    init_with(LogConfig::from_env())
}

pub fn init_with(config: LogConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_FILTER));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(config.ansi);

    let mut guard = None;
    let file_layer = match &config.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
                None
            }
        },
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Warning: Logging already initialized: {}", e);
        return guard;
    }

    tracing::info!(
        log_level = %config.log_level,
        log_file = ?config.log_file(),
        "Logging initialized"
    );

    setup_panic_hook();
    guard
}

/// Log panics with their location before running the default hook.
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        tracing::error!(
            panic.location = %location,
            panic.message = %message,
            "Application panicked"
        );

        default_panic(panic_info);
    }));
}
