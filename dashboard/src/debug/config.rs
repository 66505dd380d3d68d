//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "dashboard=info,lib_thorchain=info,warn";
pub const LOG_FILE_NAME: &str = "dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (e.g., "dashboard=debug,info")
    pub log_level: String,
    /// Directory for the daily-rotated log file; console only when unset
    pub log_dir: Option<PathBuf>,
    /// Emit ANSI colours on the console
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from `RUST_LOG`, `DASHBOARD_LOG_DIR` and `NO_COLOR`.
    pub fn from_env() -> Self {
        Self {
            log_level: lib_utils::get_env_or("RUST_LOG", DEFAULT_LOG_FILTER),
            log_dir: lib_utils::get_env_opt("DASHBOARD_LOG_DIR").map(PathBuf::from),
            ansi: lib_utils::get_env_opt("NO_COLOR").is_none(),
        }
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
