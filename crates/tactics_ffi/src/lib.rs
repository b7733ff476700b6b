//! Flutter-facing FFI surface for the tactics board core.

pub mod api;
