//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by store, view and persistence.
//!
//! # Invariants
//! - Every token is identified by a stable string id.
//! - Board snapshots move between store and persistence by value.

pub mod board;
pub mod saved_board;
