//! Interactive session: navigation state machine and session identity.
//!
//! # Responsibility
//! - Own the single source of truth for the active page.
//! - Accept presenter intents and expose snapshots after each transition.
//!
//! # Invariants
//! - State is mutated only through the transition table.
//! - Single-threaded: all methods take `&mut self`, nothing blocks.

pub mod machine;
pub mod navigation;
pub mod snapshot;
