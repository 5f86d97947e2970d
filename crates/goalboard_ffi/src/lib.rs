//! Flutter-facing bindings over `goalboard_core`.

pub mod api;
