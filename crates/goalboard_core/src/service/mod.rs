//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep session/FFI layers decoupled from storage details.

pub mod registry_service;
