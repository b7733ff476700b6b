//! Inline player label editing.
//!
//! # Responsibility
//! - Track the draft of the one label being edited on the pitch.
//! - Apply or discard the draft against a `BoardStore`.
//!
//! # Invariants
//! - At most one item is edited at a time.
//! - Only existing player items can enter editing.
//! - The store is only touched on `commit`.

use crate::store::board_store::BoardStore;

/// Editor state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameEditor {
    #[default]
    Idle,
    Editing { item_id: String, draft: String },
}

impl NameEditor {
    /// Starts editing `item_id` with its current name as draft.
    ///
    /// A pending edit of another item is committed first. Returns `false`
    /// (and stays idle) when the id is unknown or not a player.
    pub fn begin(&mut self, store: &mut BoardStore, item_id: &str) -> bool {
        if self.editing_id() == Some(item_id) {
            return true;
        }
        self.commit(store);

        let Some(item) = store.state().find(item_id).filter(|item| item.is_player()) else {
            return false;
        };
        *self = Self::Editing {
            item_id: item.id.clone(),
            draft: item.name.clone(),
        };
        true
    }

    /// Replaces the draft text. Ignored while idle.
    pub fn update(&mut self, text: impl Into<String>) {
        if let Self::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// Writes the draft to the store and returns to idle.
    ///
    /// Returns whether a draft was written.
    pub fn commit(&mut self, store: &mut BoardStore) -> bool {
        match std::mem::take(self) {
            Self::Editing { item_id, draft } => {
                store.set_name(&item_id, draft);
                true
            }
            Self::Idle => false,
        }
    }

    /// Drops the draft without touching the store.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Editing { item_id, .. } => Some(item_id.as_str()),
            Self::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Editing { draft, .. } => Some(draft.as_str()),
            Self::Idle => None,
        }
    }

    /// Items under edit must not be dragged.
    pub fn is_editing(&self, item_id: &str) -> bool {
        self.editing_id() == Some(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::NameEditor;
    use crate::formation::catalog::BALL_ID;
    use crate::store::board_store::BoardStore;

    #[test]
    fn begin_seeds_draft_with_current_name() {
        let mut store = BoardStore::new();
        let mut editor = NameEditor::default();

        assert!(editor.begin(&mut store, "p1"));
        assert_eq!(editor.editing_id(), Some("p1"));
        assert_eq!(editor.draft(), Some("GK"));
        assert!(editor.is_editing("p1"));
    }

    #[test]
    fn begin_rejects_ball_and_unknown_items() {
        let mut store = BoardStore::new();
        let mut editor = NameEditor::default();

        assert!(!editor.begin(&mut store, BALL_ID));
        assert!(!editor.begin(&mut store, "missing"));
        assert_eq!(editor, NameEditor::Idle);
    }

    #[test]
    fn commit_writes_draft_and_returns_to_idle() {
        let mut store = BoardStore::new();
        let mut editor = NameEditor::default();
        editor.begin(&mut store, "p2");
        editor.update("Pivo");

        assert!(editor.commit(&mut store));
        assert_eq!(store.state().find("p2").unwrap().name, "Pivo");
        assert_eq!(editor, NameEditor::Idle);
        assert!(!editor.commit(&mut store));
    }

    #[test]
    fn cancel_discards_draft() {
        let mut store = BoardStore::new();
        let mut editor = NameEditor::default();
        editor.begin(&mut store, "p2");
        editor.update("Ala");
        editor.cancel();

        assert_eq!(store.state().find("p2").unwrap().name, "");
        assert_eq!(editor.editing_id(), None);
    }

    #[test]
    fn switching_items_commits_previous_draft() {
        let mut store = BoardStore::new();
        let mut editor = NameEditor::default();
        editor.begin(&mut store, "p2");
        editor.update("Fixo");

        assert!(editor.begin(&mut store, "p3"));
        assert_eq!(store.state().find("p2").unwrap().name, "Fixo");
        assert_eq!(editor.editing_id(), Some("p3"));
    }
}
