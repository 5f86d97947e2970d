//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one process-wide goals session to Dart via FRB.
//! - Translate UI events into core intents and return plain envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every action returns the page that is active after the call.
//! - A poisoned session lock is recovered, never propagated as a panic.

use goalboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Block, CoreConfig, GoalboardSession, IntentOutcome, SessionError, SessionSnapshot,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSION: OnceLock<Mutex<GoalboardSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let config = CoreConfig {
        log_level: level,
        log_dir: Some(PathBuf::from(log_dir)),
    };
    match init_logging_inner(&config) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Action response envelope for session intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActionResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Human-readable message for display/diagnostics.
    pub message: String,
    /// Active page id after the call (`username_entry|roster|goals_view`).
    pub page: String,
}

/// One roster card for the gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterCard {
    pub participant_id: String,
    pub name: String,
    pub is_current: bool,
}

/// Goals page payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalsPage {
    pub name: String,
    pub title: String,
    /// One string per paragraph.
    pub paragraphs: Vec<String>,
    /// Full document in editor JSON shape.
    pub document_json: String,
    pub read_only: bool,
    pub placeholder: String,
}

/// Full session view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub page: String,
    pub current_participant: Option<String>,
    pub roster: Vec<RosterCard>,
    pub goals: Option<GoalsPage>,
    pub username_draft: String,
}

/// Submits the username field.
///
/// # FFI contract
/// - Blank and duplicate names return `ok=false` with a display message.
/// - On success the session moves to the roster page.
#[flutter_rust_bridge::frb(sync)]
pub fn session_submit_username(name: String) -> SessionActionResponse {
    with_session(|session| session.submit_username(&name))
}

/// Opens the goals page of one participant (case-insensitive name).
#[flutter_rust_bridge::frb(sync)]
pub fn session_select_participant(name: String) -> SessionActionResponse {
    with_session(|session| session.select_participant(&name))
}

/// Returns from the goals page to the roster.
#[flutter_rust_bridge::frb(sync)]
pub fn session_go_back() -> SessionActionResponse {
    with_session(|session| session.go_back())
}

/// Replaces the focused goals with one paragraph per input string.
///
/// # FFI contract
/// - Read-only views return `ok=true` with an "ignored" message.
/// - An empty list is refused and the stored goals are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn session_edit_goals(paragraphs: Vec<String>) -> SessionActionResponse {
    let blocks = paragraphs.into_iter().map(Block::paragraph).collect();
    with_session(|session| session.edit_document(blocks))
}

/// Returns the current session view.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot() -> SessionView {
    to_session_view(lock_session().snapshot())
}

/// Discards the session and starts over on the username page.
#[flutter_rust_bridge::frb(sync)]
pub fn session_reset() -> SessionActionResponse {
    let mut session = lock_session();
    *session = GoalboardSession::new();
    SessionActionResponse {
        ok: true,
        message: "Session reset.".to_string(),
        page: session.page().kind().as_str().to_string(),
    }
}

fn lock_session() -> MutexGuard<'static, GoalboardSession> {
    let lock = SESSION.get_or_init(|| Mutex::new(GoalboardSession::new()));
    lock.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn with_session(
    f: impl FnOnce(&mut GoalboardSession) -> Result<IntentOutcome, SessionError>,
) -> SessionActionResponse {
    let mut session = lock_session();
    let result = f(&mut session);
    let page = session.page().kind().as_str().to_string();
    match result {
        Ok(outcome) => SessionActionResponse {
            ok: true,
            message: outcome_message(&outcome),
            page,
        },
        Err(err) => SessionActionResponse {
            ok: false,
            message: error_message(&err),
            page,
        },
    }
}

fn outcome_message(outcome: &IntentOutcome) -> String {
    match outcome {
        IntentOutcome::Registered(participant) => format!("Welcome, {}.", participant.name()),
        IntentOutcome::Focused(participant) => format!("Viewing {}.", participant.name()),
        IntentOutcome::ReturnedToRoster => "Back to roster.".to_string(),
        IntentOutcome::DocumentUpdated(_) => "Goals saved.".to_string(),
        IntentOutcome::EditIgnoredReadOnly => "Edit ignored: goals are read-only.".to_string(),
        IntentOutcome::EditRejected(err) => format!("Edit ignored: {err}."),
    }
}

fn error_message(err: &SessionError) -> String {
    match err {
        SessionError::Registration(goalboard_core::RegistrationError::DuplicateName(_)) => {
            "Username already exists!".to_string()
        }
        other => other.to_string(),
    }
}

fn to_session_view(snapshot: SessionSnapshot) -> SessionView {
    SessionView {
        page: snapshot.page.as_str().to_string(),
        current_participant: snapshot.current_participant,
        roster: snapshot
            .roster
            .into_iter()
            .map(|entry| RosterCard {
                participant_id: entry.id.to_string(),
                name: entry.name,
                is_current: entry.is_current,
            })
            .collect(),
        goals: snapshot.focused.map(|focused| GoalsPage {
            paragraphs: focused
                .document
                .blocks()
                .iter()
                .map(|block| block.text())
                .collect(),
            document_json: document_json(&focused.document),
            name: focused.name,
            title: focused.title,
            read_only: focused.read_only,
            placeholder: focused.placeholder.to_string(),
        }),
        username_draft: snapshot.username_draft,
    }
}

fn document_json(document: &goalboard_core::Document) -> String {
    serde_json::to_string(document).unwrap_or_else(|err| {
        warn!("event=document_encode module=ffi status=error error={err}");
        "[]".to_string()
    })
}
