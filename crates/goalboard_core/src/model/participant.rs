//! Participant domain model.
//!
//! # Responsibility
//! - Define the registered actor record and its owned goals document.
//! - Own display-name normalization used for uniqueness and lookup.
//!
//! # Invariants
//! - `id` is stable and never reused for another participant.
//! - `name` is trimmed, non-blank and immutable once created.
//! - Each participant owns exactly one `Document`.

use crate::model::document::Document;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a registered participant.
pub type ParticipantId = Uuid;

/// Normalizes a display name into its registry key.
///
/// Trims surrounding whitespace and lower-cases the rest, so `" Alice "`
/// and `"alice"` share one key.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Participant construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantValidationError {
    /// Name is empty after trimming.
    BlankName,
}

impl Display for ParticipantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "participant name must not be blank"),
        }
    }
}

impl Error for ParticipantValidationError {}

/// Registered participant and the goals document they own.
///
/// Only constructible through [`Participant::new`]; there is no
/// deserialization path that could skip name validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    document: Document,
}

impl Participant {
    /// Creates a participant with a generated ID and the default document.
    ///
    /// The stored name is `raw_name` trimmed, original casing preserved.
    ///
    /// # Errors
    /// - `BlankName` when `raw_name` is empty or whitespace-only.
    pub fn new(raw_name: &str) -> Result<Self, ParticipantValidationError> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(ParticipantValidationError::BlankName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            document: Document::default(),
        })
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Registry key for this participant.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, other: &str) -> bool {
        self.key() == normalize_name(other)
    }

    pub(crate) fn set_document(&mut self, document: Document) {
        self.document = document;
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, Participant, ParticipantValidationError};
    use crate::model::document::Document;

    #[test]
    fn normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name("  Alice "), "alice");
        assert_eq!(normalize_name("ÉLODIE"), "élodie");
    }

    #[test]
    fn new_participant_gets_trimmed_name_and_default_document() {
        let participant = Participant::new("  Alice ").expect("valid name");
        assert!(!participant.id().is_nil());
        assert_eq!(participant.name(), "Alice");
        assert_eq!(participant.document(), &Document::default());
        assert!(participant.is_named("ALICE"));
        assert!(!participant.is_named("Bob"));
    }

    #[test]
    fn new_rejects_blank_names() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(
                Participant::new(raw).expect_err("blank name must be rejected"),
                ParticipantValidationError::BlankName
            );
        }
    }

    #[test]
    fn participants_get_distinct_ids() {
        let a = Participant::new("a").expect("valid name");
        let b = Participant::new("b").expect("valid name");
        assert_ne!(a.id(), b.id());
    }
}
