//! Saved board slot model.
//!
//! # Responsibility
//! - Define the persisted named snapshot and its list projection.
//!
//! # Invariants
//! - `id` is generated at save time and never reused for another slot.
//! - `state` is an owned copy; it never aliases the live store.

use crate::model::board::BoardState;
use serde::{Deserialize, Serialize};

/// Persisted named board snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub id: String,
    /// User supplied, may repeat across slots.
    pub name: String,
    /// Unix epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    pub state: BoardState,
}

impl SavedBoard {
    pub fn summary(&self) -> SavedBoardSummary {
        SavedBoardSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Slot list entry without the embedded board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBoardSummary {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}
