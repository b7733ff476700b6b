//! Persistence layer for saved boards.
//!
//! # Responsibility
//! - Define the string-keyed storage contract and its backends.
//! - Map slot ids to saved boards, including legacy-format migration.
//!
//! # Invariants
//! - Corrupt stored payloads read as empty; they never surface as errors.
//! - Every mutating call rewrites the whole slot collection.

pub mod board_repo;
pub mod kv_store;
pub mod sqlite_store;
