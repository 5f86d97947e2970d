//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve log level and optional log directory for presenters.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never fails; invalid values surface at `crate::logging::init_logging`.

use std::path::PathBuf;

/// Env var overriding the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "GOALBOARD_LOG_LEVEL";
/// Env var holding an absolute directory for rolling log files.
pub const ENV_LOG_DIR: &str = "GOALBOARD_LOG_DIR";

/// Core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

/// Default log level for the current build mode: `debug` or `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}
