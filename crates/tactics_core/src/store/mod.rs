//! Live board state and its mutations.
//!
//! # Responsibility
//! - Own the authoritative `BoardState` for one session.
//! - Apply UI-driven mutations while keeping board invariants.
//!
//! # Invariants
//! - Unknown item ids are tolerated as no-ops.
//! - Deleting the selected item clears the selection in the same call.

pub mod board_store;
pub mod name_editor;
