//! Read-only session snapshots handed to presenters.

use crate::model::document::Document;
use crate::model::participant::ParticipantId;
use crate::session::navigation::PageKind;
use serde::Serialize;

/// Hint shown by editors when the document is blank.
pub const EDITOR_PLACEHOLDER: &str = "Write your resolutions here...";

/// One roster card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    pub name: String,
    /// Whether this entry is the session's current participant.
    pub is_current: bool,
}

/// Goals page payload for the focused participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalsViewSnapshot {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Page heading, e.g. `Alice's Goals`.
    pub title: String,
    pub document: Document,
    /// `true` unless the focused participant is the current participant.
    pub read_only: bool,
    pub placeholder: &'static str,
}

/// Full presenter-facing state after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub page: PageKind,
    pub current_participant: Option<String>,
    pub roster: Vec<RosterEntry>,
    /// Set only when `page == GoalsView`.
    pub focused: Option<GoalsViewSnapshot>,
    /// Username field content retained after a failed registration.
    pub username_draft: String,
}

impl SessionSnapshot {
    /// Roster names in insertion order.
    pub fn roster_names(&self) -> Vec<&str> {
        self.roster.iter().map(|entry| entry.name.as_str()).collect()
    }
}

pub(crate) fn goals_title(name: &str) -> String {
    format!("{name}'s Goals")
}
