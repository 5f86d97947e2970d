//! Participant registry use-case service.
//!
//! # Responsibility
//! - Validate and normalize display names before registration.
//! - Provide list/find/update APIs over repository implementations.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected.
//! - Uniqueness is case-insensitive.
//! - Failed calls leave the registry untouched.
//! - `update_document` is the only mutator after creation.

use crate::model::document::Document;
use crate::model::participant::{normalize_name, Participant, ParticipantValidationError};
use crate::repo::participant_repo::{
    InMemoryParticipantRepository, ParticipantRepository, RepoError,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registration failure surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Blank or whitespace-only name.
    EmptyName,
    /// Case-insensitive collision with an existing participant.
    DuplicateName(String),
    /// Storage-layer failure other than a key collision.
    Repo(RepoError),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "username must not be empty"),
            Self::DuplicateName(name) => write!(f, "username already exists: {name}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParticipantValidationError> for RegistrationError {
    fn from(value: ParticipantValidationError) -> Self {
        match value {
            ParticipantValidationError::BlankName => Self::EmptyName,
        }
    }
}

impl From<RepoError> for RegistrationError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateKey(key) => Self::DuplicateName(key),
            other => Self::Repo(other),
        }
    }
}

/// Document update failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Target participant does not exist.
    NotFound(String),
    /// Storage-layer failure other than a missing key.
    Repo(RepoError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "participant not found: {name}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for RegistryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(key) => Self::NotFound(key),
            other => Self::Repo(other),
        }
    }
}

/// Registry facade over repository implementations.
pub struct ParticipantRegistry<R: ParticipantRepository> {
    repo: R,
}

impl ParticipantRegistry<InMemoryParticipantRepository> {
    /// Creates an empty volatile registry.
    pub fn in_memory() -> Self {
        Self::new(InMemoryParticipantRepository::new())
    }
}

impl Default for ParticipantRegistry<InMemoryParticipantRepository> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<R: ParticipantRepository> ParticipantRegistry<R> {
    /// Creates a registry using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers one participant from raw user input.
    ///
    /// # Contract
    /// - Stored name is the trimmed input, original casing preserved.
    /// - New participant receives a fresh default document.
    /// - New participant is appended after all existing ones.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed input is empty.
    /// - `DuplicateName` when another participant has the same normalized name.
    pub fn register(&mut self, raw_name: &str) -> Result<Participant, RegistrationError> {
        let participant = Participant::new(raw_name).map_err(|err| {
            warn!("event=participant_register module=registry status=rejected reason={err}");
            RegistrationError::from(err)
        })?;
        if let Some(existing) = self.repo.get(&participant.key()) {
            warn!(
                "event=participant_register module=registry status=rejected reason=duplicate_name existing_id={}",
                existing.id()
            );
            return Err(RegistrationError::DuplicateName(existing.name().to_string()));
        }

        self.repo.insert(participant.clone())?;
        info!(
            "event=participant_register module=registry status=ok participant_id={} total={}",
            participant.id(),
            self.repo.len()
        );
        Ok(participant)
    }

    /// Returns an insertion-ordered snapshot of all participants.
    pub fn list(&self) -> Vec<Participant> {
        self.repo.list()
    }

    /// Finds one participant by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<Participant> {
        self.repo.get(&normalize_name(name))
    }

    /// Replaces the stored document for the named participant.
    ///
    /// # Errors
    /// - `NotFound` when no participant has the given name.
    pub fn update_document(
        &mut self,
        name: &str,
        document: Document,
    ) -> Result<Participant, RegistryError> {
        let key = normalize_name(name);
        match self.repo.replace_document(&key, document) {
            Ok(updated) => {
                info!(
                    "event=document_update module=registry status=ok participant_id={} blocks={}",
                    updated.id(),
                    updated.document().blocks().len()
                );
                Ok(updated)
            }
            Err(err) => {
                error!("event=document_update module=registry status=error error={err}");
                Err(err.into())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ParticipantRegistry, RegistrationError, RegistryError};
    use crate::model::document::Document;

    #[test]
    fn register_trims_and_keeps_original_casing() {
        let mut registry = ParticipantRegistry::in_memory();
        let created = registry.register("  Alice  ").expect("register alice");
        assert_eq!(created.name(), "Alice");
        assert_eq!(created.document(), &Document::default());
    }

    #[test]
    fn register_rejects_case_insensitive_duplicate_without_side_effect() {
        let mut registry = ParticipantRegistry::in_memory();
        registry.register("Alice").expect("register alice");

        let err = registry
            .register(" aLiCe ")
            .expect_err("duplicate must be rejected");
        assert_eq!(err, RegistrationError::DuplicateName("Alice".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn find_is_case_insensitive() {
        let mut registry = ParticipantRegistry::in_memory();
        let created = registry.register("Bob").expect("register bob");
        let found = registry.find("bOB").expect("bob should be found");
        assert_eq!(found.id(), created.id());
        assert!(registry.find("carol").is_none());
    }

    #[test]
    fn update_document_reports_not_found() {
        let mut registry = ParticipantRegistry::in_memory();
        let err = registry
            .update_document("ghost", Document::default())
            .expect_err("unknown participant must fail");
        assert_eq!(err, RegistryError::NotFound("ghost".to_string()));
    }
}
