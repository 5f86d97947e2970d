//! Session state machine: navigation, identity and edit gating.
//!
//! # Responsibility
//! - Apply presenter intents against the page transition table.
//! - Track the current (self-registered) participant and the focused one.
//! - Gate document edits on identity equality of focus and current.
//!
//! # Invariants
//! - An intent either fully applies or leaves state untouched.
//! - `GoalsView` focus always names an existing registry entry.
//! - Edits from a non-current participant never reach the registry.
//!
//! # See also
//! - `crate::session::navigation` for the transition table.

use crate::model::document::{Block, Document, DocumentError};
use crate::model::participant::Participant;
use crate::repo::participant_repo::{InMemoryParticipantRepository, ParticipantRepository};
use crate::service::registry_service::{ParticipantRegistry, RegistrationError, RegistryError};
use crate::session::navigation::{Intent, IntentKind, Page, PageKind};
use crate::session::snapshot::{
    goals_title, GoalsViewSnapshot, RosterEntry, SessionSnapshot, EDITOR_PLACEHOLDER,
};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-level error for rejected intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Username submission failed validation.
    Registration(RegistrationError),
    /// Registry and session state disagree.
    Registry(RegistryError),
    /// Selected participant does not exist.
    ParticipantNotFound(String),
    /// Intent is not accepted on the active page.
    InvalidTransition { page: PageKind, intent: IntentKind },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration(err) => write!(f, "{err}"),
            Self::Registry(err) => write!(f, "{err}"),
            Self::ParticipantNotFound(name) => write!(f, "participant not found: {name}"),
            Self::InvalidTransition { page, intent } => {
                write!(f, "intent `{intent}` is not allowed on page `{page}`")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registration(err) => Some(err),
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistrationError> for SessionError {
    fn from(value: RegistrationError) -> Self {
        Self::Registration(value)
    }
}

impl From<RegistryError> for SessionError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Result of an accepted intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// New participant registered and made current.
    Registered(Participant),
    /// Participant put in focus on the goals page.
    Focused(Participant),
    ReturnedToRoster,
    /// Stored document replaced.
    DocumentUpdated(Document),
    /// Edit dropped because the view is read-only.
    EditIgnoredReadOnly,
    /// Edit refused by document validation; stored document unchanged.
    EditRejected(DocumentError),
}

/// One interactive session over a participant registry.
pub struct GoalboardSession<R: ParticipantRepository = InMemoryParticipantRepository> {
    registry: ParticipantRegistry<R>,
    page: Page,
    current: Option<String>,
    username_draft: String,
}

impl GoalboardSession<InMemoryParticipantRepository> {
    /// Creates a session with an empty volatile registry.
    pub fn new() -> Self {
        Self::with_registry(ParticipantRegistry::in_memory())
    }
}

impl Default for GoalboardSession<InMemoryParticipantRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ParticipantRepository> GoalboardSession<R> {
    /// Creates a session on the username page over `registry`.
    pub fn with_registry(registry: ParticipantRegistry<R>) -> Self {
        Self {
            registry,
            page: Page::UsernameEntry,
            current: None,
            username_draft: String::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn registry(&self) -> &ParticipantRegistry<R> {
        &self.registry
    }

    /// Name of the participant who registered last in this session.
    pub fn current_participant(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn focused_participant(&self) -> Option<&str> {
        self.page.focused()
    }

    /// Whether the focused document may be edited by the current participant.
    pub fn can_edit(&self) -> bool {
        match (self.page.focused(), self.current.as_deref()) {
            (Some(focused), Some(current)) => self
                .registry
                .find(focused)
                .is_some_and(|participant| participant.is_named(current)),
            _ => false,
        }
    }

    /// Applies one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<IntentOutcome, SessionError> {
        match intent {
            Intent::SubmitUsername(name) => self.submit_username(&name),
            Intent::SelectParticipant(name) => self.select_participant(&name),
            Intent::GoBack => self.go_back(),
            Intent::EditDocument(blocks) => self.edit_document(blocks),
        }
    }

    /// Registers `raw_name` and moves to the roster.
    ///
    /// On failure the page and current participant are unchanged and the
    /// submitted text stays available as the username draft.
    pub fn submit_username(&mut self, raw_name: &str) -> Result<IntentOutcome, SessionError> {
        self.ensure_accepts(IntentKind::SubmitUsername)?;
        self.username_draft = raw_name.to_string();

        let participant = self.registry.register(raw_name)?;
        self.current = Some(participant.name().to_string());
        self.username_draft.clear();
        self.navigate(Page::Roster);
        Ok(IntentOutcome::Registered(participant))
    }

    /// Focuses `name` (case-insensitive) and opens the goals page.
    pub fn select_participant(&mut self, name: &str) -> Result<IntentOutcome, SessionError> {
        self.ensure_accepts(IntentKind::SelectParticipant)?;
        let participant = self
            .registry
            .find(name)
            .ok_or_else(|| SessionError::ParticipantNotFound(name.trim().to_string()))?;

        self.navigate(Page::GoalsView {
            focused: participant.name().to_string(),
        });
        Ok(IntentOutcome::Focused(participant))
    }

    /// Leaves the goals page and clears focus.
    pub fn go_back(&mut self) -> Result<IntentOutcome, SessionError> {
        self.ensure_accepts(IntentKind::GoBack)?;
        self.navigate(Page::Roster);
        Ok(IntentOutcome::ReturnedToRoster)
    }

    /// Replaces the focused document when the focused participant is current.
    ///
    /// Read-only views drop the edit. An empty block list is refused and the
    /// stored document keeps its previous value.
    pub fn edit_document(&mut self, blocks: Vec<Block>) -> Result<IntentOutcome, SessionError> {
        self.ensure_accepts(IntentKind::EditDocument)?;
        let Some(focused) = self.page.focused().map(str::to_string) else {
            return Ok(IntentOutcome::EditIgnoredReadOnly);
        };
        let Some(stored) = self.registry.find(&focused) else {
            error!("event=document_edit module=session status=error reason=focus_not_in_registry");
            return Err(RegistryError::NotFound(focused).into());
        };
        let is_owner = self
            .current
            .as_deref()
            .is_some_and(|current| stored.is_named(current));
        if !is_owner {
            debug!("event=document_edit module=session status=ignored reason=read_only");
            return Ok(IntentOutcome::EditIgnoredReadOnly);
        }

        let document = match stored.document().replace_blocks(blocks) {
            Ok(document) => document,
            Err(err) => {
                debug!("event=document_edit module=session status=rejected reason={err}");
                return Ok(IntentOutcome::EditRejected(err));
            }
        };
        let updated = self.registry.update_document(&focused, document)?;
        Ok(IntentOutcome::DocumentUpdated(updated.document().clone()))
    }

    /// Builds the presenter-facing view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let current = self.current.as_deref();
        let roster = self
            .registry
            .list()
            .into_iter()
            .map(|participant| RosterEntry {
                id: participant.id(),
                is_current: current.is_some_and(|name| participant.is_named(name)),
                name: participant.name().to_string(),
            })
            .collect();

        let focused = self
            .page
            .focused()
            .and_then(|name| self.registry.find(name))
            .map(|participant| GoalsViewSnapshot {
                participant_id: participant.id(),
                name: participant.name().to_string(),
                title: goals_title(participant.name()),
                document: participant.document().clone(),
                read_only: !self.can_edit(),
                placeholder: EDITOR_PLACEHOLDER,
            });

        SessionSnapshot {
            page: self.page.kind(),
            current_participant: self.current.clone(),
            roster,
            focused,
            username_draft: self.username_draft.clone(),
        }
    }

    fn ensure_accepts(&self, intent: IntentKind) -> Result<(), SessionError> {
        let page = self.page.kind();
        if page.accepts(intent) {
            return Ok(());
        }
        warn!("event=intent module=session status=rejected page={page} intent={intent}");
        Err(SessionError::InvalidTransition { page, intent })
    }

    fn navigate(&mut self, next: Page) {
        info!(
            "event=navigate module=session status=ok from={} to={}",
            self.page.kind(),
            next.kind()
        );
        self.page = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{GoalboardSession, IntentOutcome, SessionError};
    use crate::model::document::{Block, DocumentError};
    use crate::service::registry_service::RegistrationError;
    use crate::session::navigation::{IntentKind, Page, PageKind};

    #[test]
    fn starts_on_username_page_without_identity() {
        let session = GoalboardSession::new();
        assert_eq!(session.page(), &Page::UsernameEntry);
        assert_eq!(session.current_participant(), None);
        assert_eq!(session.focused_participant(), None);
        assert!(!session.can_edit());
    }

    #[test]
    fn failed_registration_keeps_page_and_draft() {
        let mut session = GoalboardSession::new();
        let err = session
            .submit_username("   ")
            .expect_err("blank name must fail");
        assert_eq!(err, SessionError::Registration(RegistrationError::EmptyName));
        assert_eq!(session.page(), &Page::UsernameEntry);
        assert_eq!(session.snapshot().username_draft, "   ");
        assert!(session.registry().is_empty());
    }

    #[test]
    fn go_back_is_rejected_outside_goals_view() {
        let mut session = GoalboardSession::new();
        session.submit_username("Alice").expect("register alice");
        let err = session.go_back().expect_err("roster has no back");
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                page: PageKind::Roster,
                intent: IntentKind::GoBack,
            }
        );
        assert_eq!(session.page(), &Page::Roster);
    }

    #[test]
    fn select_unknown_participant_keeps_roster() {
        let mut session = GoalboardSession::new();
        session.submit_username("Alice").expect("register alice");
        let err = session
            .select_participant("nobody")
            .expect_err("unknown participant");
        assert_eq!(err, SessionError::ParticipantNotFound("nobody".to_string()));
        assert_eq!(session.page(), &Page::Roster);
    }

    #[test]
    fn empty_edit_is_rejected_and_document_kept() {
        let mut session = GoalboardSession::new();
        session.submit_username("Alice").expect("register alice");
        session.select_participant("alice").expect("select alice");
        session
            .edit_document(vec![Block::paragraph("Learn Rust")])
            .expect("owner edit");

        let outcome = session.edit_document(Vec::new()).expect("edit handled");
        assert_eq!(
            outcome,
            IntentOutcome::EditRejected(DocumentError::EmptyDocument)
        );
        let snapshot = session.snapshot();
        let focused = snapshot.focused.expect("goals view snapshot");
        assert_eq!(focused.document.plain_text(), "Learn Rust");
        assert!(!focused.read_only);
        assert_eq!(focused.title, "Alice's Goals");
    }

    #[test]
    fn only_the_current_participant_is_marked_and_may_edit() {
        let mut session = GoalboardSession::new();
        session.submit_username("Alice").expect("register alice");
        session.submit_username("Bob").expect("register bob");

        let roster = session.snapshot().roster;
        let current = roster
            .iter()
            .filter(|entry| entry.is_current)
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(current, vec!["Bob"]);

        session.select_participant("BOB").expect("select bob");
        assert!(session.can_edit());
        session.go_back().expect("back to roster");
        session.select_participant("alice").expect("select alice");
        assert!(!session.can_edit());
        assert_eq!(
            session
                .edit_document(vec![Block::paragraph("hijack")])
                .expect("edit handled"),
            IntentOutcome::EditIgnoredReadOnly
        );
    }
}
