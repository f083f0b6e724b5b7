//! Flutter-facing bindings for the expense core.

pub mod api;
