//! Board session service.
//!
//! # Responsibility
//! - Own one live board, its label editor and the slot repository.
//! - Translate pointer gestures and save-panel actions into store/repo calls.
//! - Track the active slot (last saved or loaded) for overwrite.
//!
//! # Invariants
//! - Slot names are trimmed with inner whitespace collapsed; blank names
//!   make save/rename do nothing.
//! - Any pending label edit is committed before the board is saved, and
//!   dropped when another board is loaded.
//! - A failed load leaves board and active slot unchanged.

use crate::geometry::field::{hit_test, FieldRect};
use crate::model::saved_board::SavedBoardSummary;
use crate::repo::board_repo::BoardSlotRepository;
use crate::repo::kv_store::{KeyValueStore, RepoResult};
use crate::store::board_store::BoardStore;
use crate::store::name_editor::NameEditor;
use crate::view::board_view::BoardView;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Normalizes a user supplied slot name.
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_slot_name(name: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(name.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// One board editing session.
pub struct BoardService<S: KeyValueStore> {
    board: BoardStore,
    slots: BoardSlotRepository<S>,
    editor: NameEditor,
    active_slot_id: Option<String>,
}

impl<S: KeyValueStore> BoardService<S> {
    /// Starts a session on the default board.
    pub fn open(store: S) -> RepoResult<Self> {
        Ok(Self::new(BoardStore::new(), BoardSlotRepository::open(store)?))
    }

    pub fn new(board: BoardStore, slots: BoardSlotRepository<S>) -> Self {
        Self {
            board,
            slots,
            editor: NameEditor::default(),
            active_slot_id: None,
        }
    }

    pub fn board(&self) -> &BoardStore {
        &self.board
    }

    /// Direct store access for selection/formation/team buttons.
    pub fn board_mut(&mut self) -> &mut BoardStore {
        &mut self.board
    }

    pub fn repository(&self) -> &BoardSlotRepository<S> {
        &self.slots
    }

    pub fn editor(&self) -> &NameEditor {
        &self.editor
    }

    pub fn active_slot_id(&self) -> Option<&str> {
        self.active_slot_id.as_deref()
    }

    /// Draw list of the current board on `field`.
    pub fn view(&self, field: FieldRect) -> BoardView {
        BoardView::build(self.board.state(), field, self.editor.editing_id())
    }

    /// Pointer pressed at a stage point.
    ///
    /// Commits a pending label edit, then selects the topmost token under
    /// the pointer or clears the selection on empty ground. Returns the
    /// selected id.
    pub fn pointer_down(&mut self, field: &FieldRect, x: f64, y: f64) -> Option<String> {
        self.editor.commit(&mut self.board);
        let hit = hit_test(self.board.state(), field, x, y).map(|item| item.id.clone());
        self.board.select(hit.as_deref());
        hit
    }

    /// Drag released at a stage point; the point is bounded to the field.
    ///
    /// Items under label edit are not movable.
    pub fn drag_end(&mut self, field: &FieldRect, item_id: &str, x: f64, y: f64) {
        if self.editor.is_editing(item_id) {
            return;
        }
        let bounded = field.clamp_point(x, y);
        self.board
            .set_position(item_id, field.to_board(bounded.x, bounded.y));
    }

    /// Opens the inline label editor for a player.
    pub fn begin_name_edit(&mut self, item_id: &str) -> bool {
        self.editor.begin(&mut self.board, item_id)
    }

    pub fn update_name_draft(&mut self, text: impl Into<String>) {
        self.editor.update(text);
    }

    pub fn commit_name_edit(&mut self) -> bool {
        self.editor.commit(&mut self.board)
    }

    pub fn cancel_name_edit(&mut self) {
        self.editor.cancel();
    }

    /// Slot list, most-recent-first.
    pub fn slots(&self) -> RepoResult<Vec<SavedBoardSummary>> {
        self.slots.list()
    }

    /// Saves the board as a new slot named `name`.
    ///
    /// Returns `Ok(None)` without saving when the name is blank.
    pub fn save_as(&mut self, name: &str) -> RepoResult<Option<String>> {
        let Some(name) = normalize_slot_name(name) else {
            return Ok(None);
        };
        self.editor.commit(&mut self.board);
        let id = self.slots.save(&name, self.board.state())?;
        self.active_slot_id = Some(id.clone());
        Ok(Some(id))
    }

    /// Replaces the active slot with the current board under the same name.
    ///
    /// The replacement gets a new id and moves to the front. Returns
    /// `Ok(None)` when there is no active slot or it no longer exists.
    pub fn overwrite_active(&mut self) -> RepoResult<Option<String>> {
        let Some(active_id) = self.active_slot_id.clone() else {
            return Ok(None);
        };
        let Some(current) = self
            .slots
            .list()?
            .into_iter()
            .find(|slot| slot.id == active_id)
        else {
            self.active_slot_id = None;
            return Ok(None);
        };

        self.editor.commit(&mut self.board);
        let Some(id) = self
            .slots
            .replace(&current.id, &current.name, self.board.state())?
        else {
            self.active_slot_id = None;
            return Ok(None);
        };
        self.active_slot_id = Some(id.clone());
        info!(
            "event=slot_overwrite module=service status=ok replaced_slot_id={} slot_id={}",
            current.id, id
        );
        Ok(Some(id))
    }

    /// Replaces the board with a saved slot.
    ///
    /// Returns `false` and changes nothing when the slot is unknown.
    pub fn load_slot(&mut self, id: &str) -> RepoResult<bool> {
        let Some(state) = self.slots.load(id)? else {
            return Ok(false);
        };
        self.editor.cancel();
        self.board.replace_all(state);
        self.active_slot_id = Some(id.to_string());
        Ok(true)
    }

    /// Renames a slot. Blank or unchanged names are skipped.
    ///
    /// Returns whether a rename was written.
    pub fn rename_slot(&mut self, id: &str, name: &str) -> RepoResult<bool> {
        let Some(name) = normalize_slot_name(name) else {
            return Ok(false);
        };
        let Some(current) = self.slots.list()?.into_iter().find(|slot| slot.id == id) else {
            return Ok(false);
        };
        if current.name == name {
            return Ok(false);
        }
        self.slots.rename(id, &name)?;
        Ok(true)
    }

    /// Deletes a slot and forgets it as active.
    pub fn remove_slot(&mut self, id: &str) -> RepoResult<()> {
        self.slots.remove(id)?;
        if self.active_slot_id.as_deref() == Some(id) {
            self.active_slot_id = None;
        }
        Ok(())
    }

    /// Restores the default board. The active slot is kept.
    pub fn reset(&mut self) {
        self.editor.cancel();
        self.board.reset();
    }
}
