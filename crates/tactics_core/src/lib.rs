//! Core domain logic for the tactics board.
//! This crate is the single source of truth for board invariants.

pub mod formation;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use formation::catalog::{formation_items, make_ball, FormationKey, FormationParseError};
pub use geometry::coords::{to_normalized, to_pixel, PixelPoint};
pub use geometry::field::{hit_test, FieldLayoutConfig, FieldRect};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::board::{BoardItem, BoardState, ItemKind, Team, Vec2};
pub use model::saved_board::{SavedBoard, SavedBoardSummary};
pub use repo::board_repo::{
    BoardSlotRepository, BoardStorageConfig, Clock, MigrationOutcome, SystemClock,
};
pub use repo::kv_store::{KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult};
pub use repo::sqlite_store::{SqliteKeyValueStore, SCHEMA_VERSION};
pub use service::board_service::{normalize_slot_name, BoardService};
pub use store::board_store::{initial_board, BoardStore, IdGenerator, UuidIdGenerator};
pub use store::name_editor::NameEditor;
pub use view::board_view::{BoardView, TokenView, EXPORT_FILE_NAME};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
