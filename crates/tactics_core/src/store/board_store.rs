//! Board store state machine.
//!
//! # Responsibility
//! - Hold the live board (items + selection) as an owned, injectable value.
//! - Provide total mutation operations for pointer/keyboard/button events.
//!
//! # Invariants
//! - Every operation is applied completely before it returns.
//! - `apply_formation` and `reset` leave exactly one ball on the board.
//! - Player ids minted by `add_player` are unique for the process lifetime.
//! - `select` does not validate the id (tolerant contract kept on purpose).

use crate::formation::catalog::{formation_items, make_ball, FormationKey};
use crate::model::board::{BoardItem, BoardState, Team, Vec2};
use log::debug;
use uuid::Uuid;

/// Formation used for the initial and reset board.
pub const DEFAULT_FORMATION: FormationKey = FormationKey::TwoOneTwo;

/// Source of ids for newly added players.
pub trait IdGenerator: Send {
    fn next_player_id(&mut self) -> String;
}

/// Uuid v4 backed id source (`p-<32 hex>`).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_player_id(&mut self) -> String {
        format!("p-{}", Uuid::new_v4().simple())
    }
}

/// Builds the default board: default formation, ball, no selection.
pub fn initial_board() -> BoardState {
    let mut items = formation_items(DEFAULT_FORMATION);
    items.push(make_ball());
    BoardState {
        items,
        selected_id: None,
    }
}

/// Owned live board.
pub struct BoardStore {
    state: BoardState,
    ids: Box<dyn IdGenerator>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Creates a store holding the default board.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidIdGenerator))
    }

    /// Creates a store with a caller supplied id source.
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: initial_board(),
            ids,
        }
    }

    /// Creates a store starting from `state`.
    pub fn from_state(state: BoardState) -> Self {
        let mut store = Self::new();
        store.state = state;
        store
    }

    /// Current board, read-only.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Owned copy of the current board.
    pub fn snapshot(&self) -> BoardState {
        self.state.clone()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected_id.as_deref()
    }

    /// Item referenced by the selection, if it exists.
    pub fn selected_item(&self) -> Option<&BoardItem> {
        self.selected_id().and_then(|id| self.state.find(id))
    }

    /// Sets or clears the selection. The id is not checked against items.
    pub fn select(&mut self, id: Option<&str>) {
        self.state.selected_id = id.map(str::to_string);
    }

    /// Moves an item. Unknown ids are ignored.
    pub fn set_position(&mut self, id: &str, pos: Vec2) {
        if let Some(item) = self.state.find_mut(id) {
            item.pos = pos.clamped();
        }
    }

    /// Renames an item. Unknown ids are ignored.
    pub fn set_name(&mut self, id: &str, name: impl Into<String>) {
        if let Some(item) = self.state.find_mut(id) {
            item.name = name.into();
        }
    }

    /// Replaces every token with formation `key` plus the current ball.
    ///
    /// The first existing ball keeps its position; a new one is made when
    /// none exists. Selection is cleared.
    pub fn apply_formation(&mut self, key: FormationKey) {
        let ball = self.state.ball().cloned().unwrap_or_else(make_ball);
        let mut items = formation_items(key);
        items.push(ball);
        self.state = BoardState {
            items,
            selected_id: None,
        };
        debug!(
            "event=formation_apply module=store status=ok formation={} item_count={}",
            key,
            self.state.items.len()
        );
    }

    /// Appends a player at field center and selects it.
    ///
    /// Returns the new player id.
    pub fn add_player(&mut self, team: Team) -> String {
        let mut id = self.ids.next_player_id();
        while self.state.contains(&id) {
            id = self.ids.next_player_id();
        }
        self.state
            .items
            .push(BoardItem::player(id.clone(), team, Vec2::CENTER, ""));
        self.state.selected_id = Some(id.clone());
        debug!(
            "event=player_add module=store status=ok team={} item_count={}",
            team.as_str(),
            self.state.items.len()
        );
        id
    }

    /// Removes the selected item and clears the selection.
    ///
    /// Returns whether an item was removed. Without a selection nothing
    /// changes.
    pub fn remove_selected(&mut self) -> bool {
        let Some(selected) = self.state.selected_id.take() else {
            return false;
        };
        let before = self.state.items.len();
        self.state.items.retain(|item| item.id != selected);
        before != self.state.items.len()
    }

    /// Replaces the whole board (used by load).
    pub fn replace_all(&mut self, state: BoardState) {
        self.state = state;
    }

    /// Restores the default board.
    pub fn reset(&mut self) {
        self.state = initial_board();
    }
}

#[cfg(test)]
mod tests {
    use super::{initial_board, BoardStore, IdGenerator};
    use crate::formation::catalog::{formation_items, FormationKey, BALL_ID};
    use crate::model::board::{BoardItem, BoardState, Team, Vec2};

    struct Repeating {
        ids: Vec<&'static str>,
    }

    impl IdGenerator for Repeating {
        fn next_player_id(&mut self) -> String {
            if self.ids.len() > 1 {
                self.ids.remove(0).to_string()
            } else {
                self.ids[0].to_string()
            }
        }
    }

    #[test]
    fn new_store_holds_default_board() {
        let store = BoardStore::new();
        assert_eq!(store.state(), &initial_board());
        assert_eq!(store.state().items.len(), 7);
        assert_eq!(store.state().ball_count(), 1);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn set_position_clamps_and_ignores_unknown_ids() {
        let mut store = BoardStore::new();
        store.set_position("p2", Vec2::new(1.5, -0.5));
        assert_eq!(store.state().find("p2").unwrap().pos, Vec2::new(1.0, 0.0));

        let before = store.snapshot();
        store.set_position("missing", Vec2::CENTER);
        store.set_name("missing", "ghost");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn select_accepts_dangling_ids() {
        let mut store = BoardStore::new();
        store.select(Some("nope"));
        assert_eq!(store.selected_id(), Some("nope"));
        assert!(store.selected_item().is_none());
        store.select(None);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn apply_formation_keeps_moved_ball_and_clears_selection() {
        let mut store = BoardStore::new();
        store.set_position(BALL_ID, Vec2::new(0.8, 0.2));
        store.select(Some("p3"));

        store.apply_formation(FormationKey::TwoZeroThree);

        let state = store.state();
        assert_eq!(state.selected_id, None);
        assert_eq!(state.ball_count(), 1);
        assert_eq!(state.ball().unwrap().pos, Vec2::new(0.8, 0.2));
        let players: Vec<BoardItem> = state.players().cloned().collect();
        assert_eq!(players, formation_items(FormationKey::TwoZeroThree));
    }

    #[test]
    fn apply_formation_synthesizes_missing_ball_and_drops_extra_players() {
        let mut store = BoardStore::from_state(BoardState::default());
        store.add_player(Team::Blue);

        store.apply_formation(FormationKey::TwoOneTwo);

        assert_eq!(store.state().items.len(), 7);
        assert_eq!(store.state().ball().unwrap().pos, Vec2::CENTER);
    }

    #[test]
    fn add_player_appends_and_selects() {
        let mut store = BoardStore::new();
        let before = store.state().items.len();

        let id = store.add_player(Team::Yellow);

        assert_eq!(store.state().items.len(), before + 1);
        let added = store.state().items.last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.team, Some(Team::Yellow));
        assert_eq!(added.color, Team::Yellow.color());
        assert_eq!(added.pos, Vec2::CENTER);
        assert!(added.name.is_empty());
        assert_eq!(store.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn add_player_skips_ids_already_on_board() {
        let mut store = BoardStore::with_id_generator(Box::new(Repeating {
            ids: vec!["p1", "p-new"],
        }));
        let id = store.add_player(Team::Red);
        assert_eq!(id, "p-new");
    }

    #[test]
    fn remove_selected_removes_and_clears() {
        let mut store = BoardStore::new();
        store.select(Some("p4"));

        assert!(store.remove_selected());
        assert!(!store.state().contains("p4"));
        assert_eq!(store.selected_id(), None);

        let before = store.snapshot();
        assert!(!store.remove_selected());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn remove_selected_with_dangling_selection_only_clears() {
        let mut store = BoardStore::new();
        store.select(Some("ghost"));
        assert!(!store.remove_selected());
        assert_eq!(store.state().items.len(), 7);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn reset_restores_default_after_edits() {
        let mut store = BoardStore::new();
        store.add_player(Team::Blue);
        store.set_name("p1", "Keeper");
        store.reset();
        assert_eq!(store.state(), &initial_board());
    }

    #[test]
    fn replace_all_swaps_whole_state() {
        let mut store = BoardStore::new();
        let next = BoardState {
            items: vec![BoardItem::ball("ball", Vec2::new(0.1, 0.1))],
            selected_id: Some("ball".to_string()),
        };
        store.replace_all(next.clone());
        assert_eq!(store.state(), &next);
    }
}
