//! Domain model for participants and their goals documents.
//!
//! # Responsibility
//! - Define plain value types used by registry and session logic.
//! - Keep editor/view state out of domain records.
//!
//! # Invariants
//! - Every participant is identified by a stable `ParticipantId`.
//! - Nothing is deleted: participants live for the whole session.

pub mod document;
pub mod participant;
