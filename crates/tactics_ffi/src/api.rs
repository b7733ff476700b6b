//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level board and slot functions to Dart via FRB.
//! - Own the single board session of this process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Board calls before `board_open` fail with a message, never a panic.
//! - Session access is serialized by one mutex.

use log::warn;
use std::sync::{Mutex, MutexGuard};
use tactics_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BoardService, FieldLayoutConfig, FieldRect, FormationKey, ItemKind, SqliteKeyValueStore,
    Team, TokenView, Vec2,
};

type Session = BoardService<SqliteKeyValueStore>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether the call did something.
    pub ok: bool,
    /// Item or slot id produced/affected by the call.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }

    fn from_result(result: Result<Self, String>, action: &str) -> Self {
        result.unwrap_or_else(|err| {
            warn!("event=ffi_call module=ffi status=error action={action}");
            Self::failure(format!("{action} failed: {err}"))
        })
    }
}

/// Slot list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotItem {
    pub slot_id: String,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Whether this slot is the one last saved or loaded.
    pub active: bool,
}

/// Slot list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListResponse {
    pub items: Vec<SlotItem>,
    pub message: String,
}

/// One token of the draw list.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenItem {
    pub id: String,
    /// `player|ball`.
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub label: Option<String>,
    pub selected: bool,
    pub editing: bool,
}

/// Draw list envelope with the fitted pitch rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardViewResponse {
    pub field_x: f64,
    pub field_y: f64,
    pub field_width: f64,
    pub field_height: f64,
    pub tokens: Vec<TokenItem>,
    pub message: String,
}

/// Opens (or reopens) the board session on a database file.
///
/// An empty `db_path` opens an in-memory database.
#[flutter_rust_bridge::frb(sync)]
pub fn board_open(db_path: String) -> BoardActionResponse {
    let trimmed = db_path.trim();
    let store = if trimmed.is_empty() {
        SqliteKeyValueStore::open_in_memory()
    } else {
        SqliteKeyValueStore::open(trimmed)
    };
    let result = store
        .and_then(BoardService::open)
        .map_err(|err| err.to_string())
        .and_then(|service| {
            *lock_session()? = Some(service);
            Ok(BoardActionResponse::success("Board opened.", None))
        });
    BoardActionResponse::from_result(result, "board_open")
}

/// Current board serialized as JSON (`{items, selectedId?}`).
///
/// Returns an empty string when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot_json() -> String {
    with_session(|session| {
        serde_json::to_string(session.board().state()).map_err(|err| err.to_string())
    })
    .unwrap_or_default()
}

/// Draw list for a stage of the given pixel size.
#[flutter_rust_bridge::frb(sync)]
pub fn board_view(stage_width: f64, stage_height: f64) -> BoardViewResponse {
    let field = fit_field(stage_width, stage_height);
    match with_session(|session| Ok(session.view(field))) {
        Ok(view) => BoardViewResponse {
            field_x: view.field.x,
            field_y: view.field.y,
            field_width: view.field.width,
            field_height: view.field.height,
            tokens: view.tokens.into_iter().map(to_token_item).collect(),
            message: String::new(),
        },
        Err(err) => BoardViewResponse {
            field_x: field.x,
            field_y: field.y,
            field_width: field.width,
            field_height: field.height,
            tokens: Vec::new(),
            message: format!("board_view failed: {err}"),
        },
    }
}

/// Selects an item, or clears the selection with `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_select(item_id: Option<String>) -> BoardActionResponse {
    let result = with_session(|session| {
        session.board_mut().select(item_id.as_deref());
        Ok(BoardActionResponse::success("Selection updated.", item_id))
    });
    BoardActionResponse::from_result(result, "board_select")
}

/// Pointer pressed on the stage: selects the token under it or clears.
#[flutter_rust_bridge::frb(sync)]
pub fn board_pointer_down(stage_width: f64, stage_height: f64, x: f64, y: f64) -> BoardActionResponse {
    let field = fit_field(stage_width, stage_height);
    let result = with_session(|session| {
        let hit = session.pointer_down(&field, x, y);
        Ok(BoardActionResponse::success("Pointer handled.", hit))
    });
    BoardActionResponse::from_result(result, "board_pointer_down")
}

/// Drag released on the stage; the drop point is bounded to the pitch.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_end(
    stage_width: f64,
    stage_height: f64,
    item_id: String,
    x: f64,
    y: f64,
) -> BoardActionResponse {
    let field = fit_field(stage_width, stage_height);
    let result = with_session(|session| {
        session.drag_end(&field, &item_id, x, y);
        Ok(BoardActionResponse::success("Item moved.", Some(item_id)))
    });
    BoardActionResponse::from_result(result, "board_drag_end")
}

/// Moves an item to a normalized position. Unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_position(item_id: String, x: f64, y: f64) -> BoardActionResponse {
    let result = with_session(|session| {
        session.board_mut().set_position(&item_id, Vec2::new(x, y));
        Ok(BoardActionResponse::success("Item moved.", Some(item_id)))
    });
    BoardActionResponse::from_result(result, "board_set_position")
}

/// Renames an item. Unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_name(item_id: String, name: String) -> BoardActionResponse {
    let result = with_session(|session| {
        session.board_mut().set_name(&item_id, name);
        Ok(BoardActionResponse::success("Item renamed.", Some(item_id)))
    });
    BoardActionResponse::from_result(result, "board_set_name")
}

/// Applies a formation by label (`2-1-2|2-0-3`).
#[flutter_rust_bridge::frb(sync)]
pub fn board_apply_formation(key: String) -> BoardActionResponse {
    let result = key
        .parse::<FormationKey>()
        .map_err(|err| err.to_string())
        .and_then(|key| {
            with_session(|session| {
                session.board_mut().apply_formation(key);
                Ok(BoardActionResponse::success("Formation applied.", None))
            })
        });
    BoardActionResponse::from_result(result, "board_apply_formation")
}

/// Adds a player of `team` (`RED|YELLOW|BLUE`) at center and selects it.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_player(team: String) -> BoardActionResponse {
    let result = Team::parse(&team)
        .ok_or_else(|| format!("unknown team `{}`; expected RED|YELLOW|BLUE", team.trim()))
        .and_then(|team| {
            with_session(|session| {
                let id = session.board_mut().add_player(team);
                Ok(BoardActionResponse::success("Player added.", Some(id)))
            })
        });
    BoardActionResponse::from_result(result, "board_add_player")
}

/// Removes the selected item. `ok=false` when nothing was removed.
#[flutter_rust_bridge::frb(sync)]
pub fn board_remove_selected() -> BoardActionResponse {
    let result = with_session(|session| {
        if session.board_mut().remove_selected() {
            Ok(BoardActionResponse::success("Item removed.", None))
        } else {
            Ok(BoardActionResponse::failure("Nothing selected."))
        }
    });
    BoardActionResponse::from_result(result, "board_remove_selected")
}

/// Restores the default board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> BoardActionResponse {
    let result = with_session(|session| {
        session.reset();
        Ok(BoardActionResponse::success("Board reset.", None))
    });
    BoardActionResponse::from_result(result, "board_reset")
}

/// Opens the inline label editor on a player.
#[flutter_rust_bridge::frb(sync)]
pub fn name_edit_begin(item_id: String) -> BoardActionResponse {
    let result = with_session(|session| {
        if session.begin_name_edit(&item_id) {
            Ok(BoardActionResponse::success("Editing.", Some(item_id)))
        } else {
            Ok(BoardActionResponse::failure("Only players can be renamed."))
        }
    });
    BoardActionResponse::from_result(result, "name_edit_begin")
}

/// Replaces the label draft.
#[flutter_rust_bridge::frb(sync)]
pub fn name_edit_update(text: String) -> BoardActionResponse {
    let result = with_session(|session| {
        session.update_name_draft(text);
        Ok(BoardActionResponse::success("Draft updated.", None))
    });
    BoardActionResponse::from_result(result, "name_edit_update")
}

/// Commits (`commit=true`, Enter/blur) or cancels (Escape) the label edit.
#[flutter_rust_bridge::frb(sync)]
pub fn name_edit_finish(commit: bool) -> BoardActionResponse {
    let result = with_session(|session| {
        if commit {
            if session.commit_name_edit() {
                Ok(BoardActionResponse::success("Name saved.", None))
            } else {
                Ok(BoardActionResponse::failure("Nothing to commit."))
            }
        } else {
            session.cancel_name_edit();
            Ok(BoardActionResponse::success("Edit cancelled.", None))
        }
    });
    BoardActionResponse::from_result(result, "name_edit_finish")
}

/// Lists saved slots most-recent-first.
#[flutter_rust_bridge::frb(sync)]
pub fn slots_list() -> SlotListResponse {
    let result = with_session(|session| {
        let active = session.active_slot_id().map(str::to_string);
        let slots = session.slots().map_err(|err| err.to_string())?;
        Ok(slots
            .into_iter()
            .map(|slot| SlotItem {
                active: active.as_deref() == Some(slot.id.as_str()),
                slot_id: slot.id,
                name: slot.name,
                created_at: slot.created_at,
            })
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No saved boards.".to_string()
            } else {
                format!("Found {} saved board(s).", items.len())
            };
            SlotListResponse { items, message }
        }
        Err(err) => SlotListResponse {
            items: Vec::new(),
            message: format!("slots_list failed: {err}"),
        },
    }
}

/// Saves the board as a new slot. Blank names are refused.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_save_as(name: String) -> BoardActionResponse {
    let result = with_session(|session| match session.save_as(&name) {
        Ok(Some(id)) => Ok(BoardActionResponse::success("Board saved.", Some(id))),
        Ok(None) => Ok(BoardActionResponse::failure("Name is empty.")),
        Err(err) => Err(err.to_string()),
    });
    BoardActionResponse::from_result(result, "slot_save_as")
}

/// Overwrites the active slot with the current board.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_overwrite_active() -> BoardActionResponse {
    let result = with_session(|session| match session.overwrite_active() {
        Ok(Some(id)) => Ok(BoardActionResponse::success("Board saved.", Some(id))),
        Ok(None) => Ok(BoardActionResponse::failure("No active saved board.")),
        Err(err) => Err(err.to_string()),
    });
    BoardActionResponse::from_result(result, "slot_overwrite_active")
}

/// Loads a slot into the board.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_load(slot_id: String) -> BoardActionResponse {
    let result = with_session(|session| match session.load_slot(&slot_id) {
        Ok(true) => Ok(BoardActionResponse::success("Board loaded.", Some(slot_id))),
        Ok(false) => Ok(BoardActionResponse::failure("Saved board not found.")),
        Err(err) => Err(err.to_string()),
    });
    BoardActionResponse::from_result(result, "slot_load")
}

/// Renames a slot. Blank or unchanged names are skipped (`ok=false`).
#[flutter_rust_bridge::frb(sync)]
pub fn slot_rename(slot_id: String, name: String) -> BoardActionResponse {
    let result = with_session(|session| match session.rename_slot(&slot_id, &name) {
        Ok(true) => Ok(BoardActionResponse::success("Saved board renamed.", Some(slot_id))),
        Ok(false) => Ok(BoardActionResponse::failure("Nothing renamed.")),
        Err(err) => Err(err.to_string()),
    });
    BoardActionResponse::from_result(result, "slot_rename")
}

/// Deletes a slot. Unknown ids succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_remove(slot_id: String) -> BoardActionResponse {
    let result = with_session(|session| {
        session.remove_slot(&slot_id).map_err(|err| err.to_string())?;
        Ok(BoardActionResponse::success("Saved board deleted.", Some(slot_id)))
    });
    BoardActionResponse::from_result(result, "slot_remove")
}

fn fit_field(stage_width: f64, stage_height: f64) -> FieldRect {
    FieldRect::fit(stage_width, stage_height, &FieldLayoutConfig::default())
}

fn lock_session() -> Result<MutexGuard<'static, Option<Session>>, String> {
    SESSION
        .lock()
        .map_err(|_| "board session lock poisoned".to_string())
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, String> {
    let mut guard = lock_session()?;
    let session = guard
        .as_mut()
        .ok_or_else(|| "board session not opened; call board_open first".to_string())?;
    f(session)
}

fn to_token_item(token: TokenView) -> TokenItem {
    TokenItem {
        kind: item_kind_label(token.kind).to_string(),
        id: token.id,
        x: token.center.x,
        y: token.center.y,
        radius: token.radius,
        color: token.color,
        label: token.label,
        selected: token.selected,
        editing: token.editing,
    }
}

fn item_kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Player => "player",
        ItemKind::Ball => "ball",
    }
}
