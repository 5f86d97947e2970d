//! Core domain logic for Goalboard.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::{default_log_level, CoreConfig};
pub use logging::{init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::document::{
    Block, BlockKind, Document, DocumentError, TextRun, DEFAULT_GOALS_TEXT,
};
pub use model::participant::{
    normalize_name, Participant, ParticipantId, ParticipantValidationError,
};
pub use repo::participant_repo::{
    InMemoryParticipantRepository, ParticipantRepository, RepoError, RepoResult,
};
pub use service::registry_service::{ParticipantRegistry, RegistrationError, RegistryError};
pub use session::machine::{GoalboardSession, IntentOutcome, SessionError};
pub use session::navigation::{Intent, IntentKind, Page, PageKind};
pub use session::snapshot::{GoalsViewSnapshot, RosterEntry, SessionSnapshot, EDITOR_PLACEHOLDER};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
