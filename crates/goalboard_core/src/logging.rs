//! File logging bootstrap for goals sessions.
//!
//! # Responsibility
//! - Start rolling file logs from a [`CoreConfig`] exactly once per process.
//! - Record the session context (registry kind, first page) when logs open.
//!
//! # Invariants
//! - Same level and directory on a repeated call is a no-op.
//! - A different level or directory after start is refused.
//! - Goals text never reaches the log; panics log their location only.

use crate::config::CoreConfig;
use crate::session::navigation::PageKind;
use flexi_logger::{
    Cleanup, Criterion, DeferredNow, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter, Record};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "goalboard";
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    status: LoggingStatus,
    _handle: LoggerHandle,
}

/// Level and directory of the running file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

/// Why file logging could not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// Level is not one of `trace|debug|info|warn|error`.
    UnsupportedLevel(String),
    EmptyDir,
    /// Log directory must be absolute.
    RelativeDir(PathBuf),
    CreateDir { path: PathBuf, reason: String },
    /// flexi_logger refused to start.
    Backend(String),
    /// Logging already runs with different settings.
    AlreadyInitialized(LoggingStatus),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
            Self::CreateDir { path, reason } => {
                write!(f, "failed to create log directory `{}`: {reason}", path.display())
            }
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::AlreadyInitialized(active) => write!(
                f,
                "logging already runs at level `{}` in `{}`",
                active.level,
                active.log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging for `config`.
///
/// Returns `Ok(None)` when `config.log_dir` is unset; nothing is started.
///
/// # Errors
/// - Invalid level or directory, or directory creation failure.
/// - `AlreadyInitialized` when logging runs with other settings.
pub fn init_logging(config: &CoreConfig) -> Result<Option<LoggingStatus>, LoggingError> {
    let Some(raw_dir) = config.log_dir.as_deref() else {
        return Ok(None);
    };
    let requested = LoggingStatus {
        level: parse_level(&config.log_level)?,
        log_dir: resolve_log_dir(raw_dir)?,
    };

    let active = ACTIVE.get_or_try_init(|| start_file_logger(&requested))?;
    if active.status != requested {
        return Err(LoggingError::AlreadyInitialized(active.status.clone()));
    }
    Ok(Some(active.status.clone()))
}

/// Settings of the running file logger, if any.
pub fn logging_status() -> Option<LoggingStatus> {
    ACTIVE.get().map(|active| active.status.clone())
}

fn start_file_logger(status: &LoggingStatus) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&status.log_dir).map_err(|err| LoggingError::CreateDir {
        path: status.log_dir.clone(),
        reason: err.to_string(),
    })?;

    let log_spec = LogSpecification::builder().default(status.level).build();
    // Direct writes: the terminal presenter may exit the process without
    // dropping the handle.
    let handle = Logger::with(log_spec)
        .log_to_file(
            FileSpec::default()
                .directory(status.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::Direct)
        .format_for_files(event_line)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=session_start module=logging status=ok registry=volatile initial_page={} level={} version={}",
        PageKind::UsernameEntry,
        status.level,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        status: status.clone(),
        _handle: handle,
    })
}

// 2026-01-01 12:00:00.000 INFO goalboard_core::session::machine event=...
fn event_line(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    match raw.trim().parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => {
            Err(LoggingError::UnsupportedLevel(raw.trim().to_string()))
        }
        Ok(level) => Ok(level),
    }
}

fn resolve_log_dir(raw: &Path) -> Result<PathBuf, LoggingError> {
    let lossy = raw.to_string_lossy();
    let trimmed = lossy.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::EmptyDir);
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeDir(path));
    }
    Ok(path)
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Payload is skipped: it may quote goals text.
        match info.location() {
            Some(loc) => error!(
                "event=panic module=logging status=error file={} line={}",
                loc.file(),
                loc.line()
            ),
            None => error!("event=panic module=logging status=error file=unknown"),
        }
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_level, resolve_log_dir, LoggingError};
    use crate::config::CoreConfig;
    use log::LevelFilter;
    use std::path::{Path, PathBuf};

    fn config(level: &str, dir: &Path) -> CoreConfig {
        CoreConfig {
            log_level: level.to_string(),
            log_dir: Some(dir.to_path_buf()),
        }
    }

    fn read_logs(dir: &Path) -> String {
        std::fs::read_dir(dir)
            .expect("log dir readable")
            .filter_map(Result::ok)
            .filter_map(|entry| std::fs::read_to_string(entry.path()).ok())
            .collect()
    }

    #[test]
    fn parse_level_is_case_insensitive_and_refuses_off() {
        assert_eq!(parse_level(" INFO ").expect("info parses"), LevelFilter::Info);
        assert_eq!(parse_level("warn").expect("warn parses"), LevelFilter::Warn);
        assert_eq!(
            parse_level("verbose"),
            Err(LoggingError::UnsupportedLevel("verbose".to_string()))
        );
        assert_eq!(
            parse_level("off"),
            Err(LoggingError::UnsupportedLevel("off".to_string()))
        );
    }

    #[test]
    fn resolve_log_dir_requires_absolute_non_blank_path() {
        assert_eq!(resolve_log_dir(Path::new("   ")), Err(LoggingError::EmptyDir));
        assert_eq!(
            resolve_log_dir(Path::new("logs/dev")),
            Err(LoggingError::RelativeDir(PathBuf::from("logs/dev")))
        );
    }

    #[test]
    fn missing_log_dir_leaves_logging_off() {
        let config = CoreConfig {
            log_level: "info".to_string(),
            log_dir: None,
        };
        assert_eq!(init_logging(&config), Ok(None));
    }

    #[test]
    fn relative_dir_is_refused_before_start() {
        let err = init_logging(&config("info", Path::new("relative/logs")))
            .expect_err("relative dir must fail");
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn init_is_idempotent_records_session_context_and_refuses_conflicts() {
        let log_dir = tempfile::tempdir().expect("create first temp dir");
        let other_dir = tempfile::tempdir().expect("create second temp dir");

        let started = init_logging(&config("info", log_dir.path()))
            .expect("first init should succeed")
            .expect("file logging active");
        assert_eq!(started.level, LevelFilter::Info);
        assert_eq!(
            init_logging(&config(" INFO ", log_dir.path())),
            Ok(Some(started.clone()))
        );

        let level_conflict = init_logging(&config("debug", log_dir.path()))
            .expect_err("level conflict should fail");
        assert_eq!(level_conflict, LoggingError::AlreadyInitialized(started.clone()));
        let dir_conflict = init_logging(&config("info", other_dir.path()))
            .expect_err("directory conflict should fail");
        assert_eq!(dir_conflict, LoggingError::AlreadyInitialized(started.clone()));

        assert_eq!(logging_status(), Some(started));
        let logs = read_logs(log_dir.path());
        assert!(logs.contains("event=session_start"));
        assert!(logs.contains("registry=volatile initial_page=username_entry"));
    }
}
