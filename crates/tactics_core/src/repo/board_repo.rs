//! Saved board slot repository.
//!
//! # Responsibility
//! - Persist named board snapshots in a `KeyValueStore` as one JSON list.
//! - Upgrade the legacy single-board payload into the slot list once.
//!
//! # Invariants
//! - The slot list is kept most-recent-first.
//! - Boards go in and come out as owned copies.
//! - Unreadable payloads read as empty and are only logged.
//! - The legacy key is deleted only after the migrated list is written.
//! - Multi-process writers are not coordinated; the last full write wins.
//! - Every public mutation is a single read-modify-write of the slot list.
//! - Log events carry slot ids and counts, never slot names.

use crate::model::board::BoardState;
use crate::model::saved_board::{SavedBoard, SavedBoardSummary};
use crate::repo::kv_store::{KeyValueStore, RepoResult};
use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Key of the legacy single-board payload.
pub const LEGACY_BOARD_KEY: &str = "futsal_board_v1";
/// Key of the slot list.
pub const SAVED_BOARDS_KEY: &str = "futsal_board_saves_v2";
/// Name given to the slot created from a legacy payload.
pub const LEGACY_SLOT_NAME: &str = "previous save";

/// Storage keys and migration naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStorageConfig {
    pub legacy_key: String,
    pub slots_key: String,
    pub legacy_slot_name: String,
}

impl Default for BoardStorageConfig {
    fn default() -> Self {
        Self {
            legacy_key: LEGACY_BOARD_KEY.to_string(),
            slots_key: SAVED_BOARDS_KEY.to_string(),
            legacy_slot_name: LEGACY_SLOT_NAME.to_string(),
        }
    }
}

/// Wall clock used for `created_at`.
pub trait Clock: Send {
    /// Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// What the one-time legacy check found when the repository was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No slots and no legacy payload.
    FreshInstall,
    /// A legacy payload was wrapped into a single slot.
    MigratedLegacy,
    /// Slots already existed; legacy data was not consulted.
    AlreadyCurrent,
}

impl MigrationOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::FreshInstall => "fresh_install",
            Self::MigratedLegacy => "migrated_legacy",
            Self::AlreadyCurrent => "already_current",
        }
    }
}

/// Slot id -> saved board mapping over a key-value store.
pub struct BoardSlotRepository<S: KeyValueStore> {
    store: S,
    config: BoardStorageConfig,
    clock: Box<dyn Clock>,
    migration: MigrationOutcome,
}

impl<S: KeyValueStore> BoardSlotRepository<S> {
    /// Opens the repository with default keys and the system clock.
    ///
    /// Runs the legacy migration check once.
    pub fn open(store: S) -> RepoResult<Self> {
        Self::open_with(store, BoardStorageConfig::default(), Box::new(SystemClock))
    }

    /// Opens the repository with explicit keys and clock.
    ///
    /// # Errors
    /// - Returns storage transport errors raised while migrating.
    pub fn open_with(store: S, config: BoardStorageConfig, clock: Box<dyn Clock>) -> RepoResult<Self> {
        let mut repo = Self {
            store,
            config,
            clock,
            migration: MigrationOutcome::FreshInstall,
        };
        repo.migration = repo.migrate_legacy()?;
        info!(
            "event=slots_open module=repo status=ok migration={}",
            repo.migration.as_str()
        );
        Ok(repo)
    }

    pub fn migration_outcome(&self) -> MigrationOutcome {
        self.migration
    }

    pub fn config(&self) -> &BoardStorageConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a copy of `state` as a new front slot and returns its id.
    ///
    /// Names are not deduplicated.
    pub fn save(&self, name: &str, state: &BoardState) -> RepoResult<String> {
        let mut slots = self.read_slots()?;
        let slot = self.new_slot(name, state.clone());
        let id = slot.id.clone();
        slots.insert(0, slot);
        self.write_slots(&slots)?;
        info!(
            "event=slot_save module=repo status=ok slot_id={} slot_count={}",
            id,
            slots.len()
        );
        Ok(id)
    }

    /// Lists slots most-recent-first without their boards.
    pub fn list(&self) -> RepoResult<Vec<SavedBoardSummary>> {
        Ok(self.read_slots()?.iter().map(SavedBoard::summary).collect())
    }

    /// Lists full slot records most-recent-first.
    pub fn list_full(&self) -> RepoResult<Vec<SavedBoard>> {
        self.read_slots()
    }

    /// Returns an owned copy of a slot's board, or `None` when unknown.
    pub fn load(&self, id: &str) -> RepoResult<Option<BoardState>> {
        Ok(self
            .read_slots()?
            .into_iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.state))
    }

    /// Deletes a slot. Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> RepoResult<()> {
        let mut slots = self.read_slots()?;
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        if slots.len() == before {
            return Ok(());
        }
        self.write_slots(&slots)?;
        info!(
            "event=slot_remove module=repo status=ok slot_id={} slot_count={}",
            id,
            slots.len()
        );
        Ok(())
    }

    /// Swaps slot `id` for a fresh slot holding `state`, in one write.
    ///
    /// The new slot gets a new id and moves to the front. Returns `None` and
    /// writes nothing when `id` is unknown; on a failed write the stored
    /// list is left as it was.
    pub fn replace(&self, id: &str, name: &str, state: &BoardState) -> RepoResult<Option<String>> {
        let mut slots = self.read_slots()?;
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        if slots.len() == before {
            return Ok(None);
        }
        let slot = self.new_slot(name, state.clone());
        let new_id = slot.id.clone();
        slots.insert(0, slot);
        self.write_slots(&slots)?;
        info!(
            "event=slot_replace module=repo status=ok replaced_slot_id={} slot_id={} slot_count={}",
            id,
            new_id,
            slots.len()
        );
        Ok(Some(new_id))
    }

    /// Renames a slot in place. Unknown ids are a no-op.
    pub fn rename(&self, id: &str, name: &str) -> RepoResult<()> {
        let mut slots = self.read_slots()?;
        let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) else {
            return Ok(());
        };
        slot.name = name.to_string();
        self.write_slots(&slots)?;
        info!("event=slot_rename module=repo status=ok slot_id={id}");
        Ok(())
    }

    fn new_slot(&self, name: &str, state: BoardState) -> SavedBoard {
        SavedBoard {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: self.clock.now_epoch_ms(),
            state,
        }
    }

    fn migrate_legacy(&self) -> RepoResult<MigrationOutcome> {
        if !self.read_slots()?.is_empty() {
            return Ok(MigrationOutcome::AlreadyCurrent);
        }

        let Some(raw) = self.store.get(&self.config.legacy_key)? else {
            return Ok(MigrationOutcome::FreshInstall);
        };
        let legacy = match serde_json::from_str::<BoardState>(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    "event=slots_migrate module=repo status=skipped error_code=legacy_unreadable error={}",
                    err
                );
                return Ok(MigrationOutcome::FreshInstall);
            }
        };

        let slot = self.new_slot(&self.config.legacy_slot_name, legacy);
        self.write_slots(std::slice::from_ref(&slot))?;
        self.store.remove(&self.config.legacy_key)?;
        info!(
            "event=slots_migrate module=repo status=ok slot_id={} item_count={}",
            slot.id,
            slot.state.items.len()
        );
        Ok(MigrationOutcome::MigratedLegacy)
    }

    fn read_slots(&self) -> RepoResult<Vec<SavedBoard>> {
        let Some(raw) = self.store.get(&self.config.slots_key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<SavedBoard>>(&raw) {
            Ok(slots) => Ok(slots),
            Err(err) => {
                warn!(
                    "event=slots_read module=repo status=degraded error_code=slots_unreadable error={}",
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_slots(&self, slots: &[SavedBoard]) -> RepoResult<()> {
        let payload = serde_json::to_string(slots)?;
        self.store.set(&self.config.slots_key, &payload)
    }
}
