use serde_json::json;
use tactics_core::repo::board_repo::{LEGACY_BOARD_KEY, LEGACY_SLOT_NAME, SAVED_BOARDS_KEY};
use tactics_core::{
    initial_board, BoardSlotRepository, BoardState, BoardStorageConfig, BoardStore, Clock,
    KeyValueStore, MemoryKeyValueStore, MigrationOutcome,
};

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}

fn open(store: MemoryKeyValueStore) -> BoardSlotRepository<MemoryKeyValueStore> {
    BoardSlotRepository::open_with(
        store,
        BoardStorageConfig::default(),
        Box::new(FixedClock(42)),
    )
    .unwrap()
}

fn legacy_payload() -> (String, BoardState) {
    let value = json!({
        "items": [
            {
                "id": "p1",
                "kind": "player",
                "pos": { "x": 0.1, "y": 0.5 },
                "color": "#e74c3c",
                "name": "GK"
            },
            {
                "id": "ball",
                "kind": "ball",
                "pos": { "x": 0.5, "y": 0.5 },
                "color": "#f1c40f",
                "name": ""
            }
        ]
    });
    let state: BoardState = serde_json::from_value(value.clone()).unwrap();
    (value.to_string(), state)
}

#[test]
fn fresh_install_has_no_slots() {
    let repo = open(MemoryKeyValueStore::new());

    assert_eq!(repo.migration_outcome(), MigrationOutcome::FreshInstall);
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn legacy_payload_becomes_single_placeholder_slot() {
    let (raw, legacy_state) = legacy_payload();
    let repo = open(MemoryKeyValueStore::with_entries([(LEGACY_BOARD_KEY, raw)]));

    assert_eq!(repo.migration_outcome(), MigrationOutcome::MigratedLegacy);
    let slots = repo.list_full().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name, LEGACY_SLOT_NAME);
    assert_eq!(slots[0].created_at, 42);
    assert_eq!(slots[0].state, legacy_state);
    assert_eq!(slots[0].state.selected_id, None);

    assert_eq!(repo.list().unwrap().len(), 1);
    assert!(repo.store().get(LEGACY_BOARD_KEY).unwrap().is_none());
    assert!(repo.store().get(SAVED_BOARDS_KEY).unwrap().is_some());
}

#[test]
fn reopening_after_migration_does_not_duplicate() {
    let (raw, _) = legacy_payload();
    let repo = open(MemoryKeyValueStore::with_entries([(LEGACY_BOARD_KEY, raw)]));
    let migrated = repo.list_full().unwrap();

    let slots_raw = repo.store().get(SAVED_BOARDS_KEY).unwrap().unwrap();
    let reopened = open(MemoryKeyValueStore::with_entries([(SAVED_BOARDS_KEY, slots_raw)]));

    assert_eq!(reopened.migration_outcome(), MigrationOutcome::AlreadyCurrent);
    assert_eq!(reopened.list_full().unwrap(), migrated);
}

#[test]
fn existing_slots_win_over_legacy_payload() {
    let (raw, _) = legacy_payload();
    let seed = open(MemoryKeyValueStore::new());
    seed.save("current", &initial_board()).unwrap();
    let slots_raw = seed.store().get(SAVED_BOARDS_KEY).unwrap().unwrap();

    let repo = open(MemoryKeyValueStore::with_entries([
        (LEGACY_BOARD_KEY, raw.clone()),
        (SAVED_BOARDS_KEY, slots_raw),
    ]));

    assert_eq!(repo.migration_outcome(), MigrationOutcome::AlreadyCurrent);
    let slots = repo.list().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name, "current");
    assert_eq!(repo.store().get(LEGACY_BOARD_KEY).unwrap(), Some(raw));
}

#[test]
fn corrupt_slot_list_falls_back_to_legacy() {
    let (raw, legacy_state) = legacy_payload();
    let repo = open(MemoryKeyValueStore::with_entries([
        (LEGACY_BOARD_KEY, raw),
        (SAVED_BOARDS_KEY, "garbage".to_string()),
    ]));

    assert_eq!(repo.migration_outcome(), MigrationOutcome::MigratedLegacy);
    let slots = repo.list_full().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].state, legacy_state);
}

#[test]
fn corrupt_legacy_payload_is_left_alone() {
    let repo = open(MemoryKeyValueStore::with_entries([(LEGACY_BOARD_KEY, "{oops")]));

    assert_eq!(repo.migration_outcome(), MigrationOutcome::FreshInstall);
    assert!(repo.list().unwrap().is_empty());
    assert_eq!(
        repo.store().get(LEGACY_BOARD_KEY).unwrap().as_deref(),
        Some("{oops")
    );
}

#[test]
fn migrated_slot_loads_into_store() {
    let (raw, legacy_state) = legacy_payload();
    let repo = open(MemoryKeyValueStore::with_entries([(LEGACY_BOARD_KEY, raw)]));
    let id = repo.list().unwrap()[0].id.clone();

    let mut store = BoardStore::new();
    store.replace_all(repo.load(&id).unwrap().unwrap());

    assert_eq!(store.state(), &legacy_state);
}
