//! Page and intent types for the three-page navigation flow.
//!
//! # Invariants
//! - The focused participant exists only inside `Page::GoalsView`.
//! - `UsernameEntry` is the initial page; there is no terminal page.

use crate::model::document::Block;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Active page with its page-local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Initial page: choose a display name.
    UsernameEntry,
    /// Gallery of registered participants.
    Roster,
    /// One participant's goals document.
    GoalsView {
        /// Canonical (stored) name of the focused participant.
        focused: String,
    },
}

impl Page {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::UsernameEntry => PageKind::UsernameEntry,
            Self::Roster => PageKind::Roster,
            Self::GoalsView { .. } => PageKind::GoalsView,
        }
    }

    /// Name of the focused participant, if any.
    pub fn focused(&self) -> Option<&str> {
        match self {
            Self::GoalsView { focused } => Some(focused.as_str()),
            _ => None,
        }
    }
}

/// Page discriminant exposed to presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    UsernameEntry,
    Roster,
    GoalsView,
}

impl PageKind {
    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UsernameEntry => "username_entry",
            Self::Roster => "roster",
            Self::GoalsView => "goals_view",
        }
    }

    /// Intents this page reacts to.
    pub fn accepted_intents(self) -> &'static [IntentKind] {
        use IntentKind::*;
        match self {
            Self::UsernameEntry => &[SubmitUsername],
            Self::Roster => &[SubmitUsername, SelectParticipant],
            Self::GoalsView => &[GoBack, EditDocument],
        }
    }

    pub fn accepts(self, intent: IntentKind) -> bool {
        self.accepted_intents().contains(&intent)
    }
}

impl Display for PageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intent emitted by a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitUsername(String),
    SelectParticipant(String),
    GoBack,
    EditDocument(Vec<Block>),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::SubmitUsername(_) => IntentKind::SubmitUsername,
            Self::SelectParticipant(_) => IntentKind::SelectParticipant,
            Self::GoBack => IntentKind::GoBack,
            Self::EditDocument(_) => IntentKind::EditDocument,
        }
    }
}

/// Intent discriminant used for transition checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    SubmitUsername,
    SelectParticipant,
    GoBack,
    EditDocument,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitUsername => "submit_username",
            Self::SelectParticipant => "select_participant",
            Self::GoBack => "go_back",
            Self::EditDocument => "edit_document",
        }
    }
}

impl Display for IntentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
