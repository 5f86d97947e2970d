//! Participant repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide insertion-ordered storage for participant records.
//! - Keep key/index bookkeeping out of the registry service.
//!
//! # Invariants
//! - Keys are normalized names; callers normalize before lookup.
//! - No two stored participants share a key.
//! - `list` returns participants in insertion order.
//! - Records are never removed.

use crate::model::document::Document;
use crate::model::participant::Participant;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level error for participant operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A participant with the same normalized key already exists.
    DuplicateKey(String),
    /// No participant stored under the key.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "participant key already stored: {key}"),
            Self::NotFound(key) => write!(f, "participant not found: {key}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for participant storage.
pub trait ParticipantRepository {
    /// Appends one participant under `participant.key()`.
    fn insert(&mut self, participant: Participant) -> RepoResult<()>;
    /// Gets one participant by normalized key.
    fn get(&self, key: &str) -> Option<Participant>;
    /// Lists all participants in insertion order.
    fn list(&self) -> Vec<Participant>;
    /// Replaces the stored document and returns the updated record.
    fn replace_document(&mut self, key: &str, document: Document) -> RepoResult<Participant>;
    /// Number of stored participants.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile repository; contents live as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryParticipantRepository {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticipantRepository for InMemoryParticipantRepository {
    fn insert(&mut self, participant: Participant) -> RepoResult<()> {
        let key = participant.key();
        if self.index.contains_key(&key) {
            return Err(RepoError::DuplicateKey(key));
        }
        self.index.insert(key, self.participants.len());
        self.participants.push(participant);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Participant> {
        self.index
            .get(key)
            .and_then(|&slot| self.participants.get(slot))
            .cloned()
    }

    fn list(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    fn replace_document(&mut self, key: &str, document: Document) -> RepoResult<Participant> {
        let slot = *self
            .index
            .get(key)
            .ok_or_else(|| RepoError::NotFound(key.to_string()))?;
        let participant = self
            .participants
            .get_mut(slot)
            .ok_or_else(|| RepoError::NotFound(key.to_string()))?;
        participant.set_document(document);
        Ok(participant.clone())
    }

    fn len(&self) -> usize {
        self.participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryParticipantRepository, ParticipantRepository, RepoError};
    use crate::model::document::Document;
    use crate::model::participant::Participant;

    #[test]
    fn insert_preserves_order_and_rejects_duplicate_key() {
        let mut repo = InMemoryParticipantRepository::new();
        repo.insert(Participant::new("Alice").expect("valid name")).expect("first insert");
        repo.insert(Participant::new("Bob").expect("valid name")).expect("second insert");

        let err = repo
            .insert(Participant::new("ALICE").expect("valid name"))
            .expect_err("duplicate key must be rejected");
        assert_eq!(err, RepoError::DuplicateKey("alice".to_string()));

        let names = repo
            .list()
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn replace_document_updates_only_target() {
        let mut repo = InMemoryParticipantRepository::new();
        repo.insert(Participant::new("Alice").expect("valid name")).expect("insert alice");
        repo.insert(Participant::new("Bob").expect("valid name")).expect("insert bob");

        let doc = Document::from_paragraphs(["ship it"]).expect("valid document");
        let updated = repo
            .replace_document("bob", doc.clone())
            .expect("bob should exist");
        assert_eq!(updated.document(), &doc);

        let alice = repo.get("alice").expect("alice stored");
        assert_eq!(alice.document(), &Document::default());
    }

    #[test]
    fn replace_document_reports_missing_key() {
        let mut repo = InMemoryParticipantRepository::new();
        assert!(repo.is_empty());
        let err = repo
            .replace_document("ghost", Document::default())
            .expect_err("missing key must fail");
        assert_eq!(err, RepoError::NotFound("ghost".to_string()));
    }
}
