use serde_json::json;
use tactics_core::{BoardItem, BoardState, SavedBoard, Team, Vec2};

#[test]
fn player_serializes_with_expected_fields() {
    let item = BoardItem::player("p-1", Team::Yellow, Vec2::new(0.25, 0.75), "Ala");

    let value = serde_json::to_value(&item).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "p-1",
            "kind": "player",
            "pos": { "x": 0.25, "y": 0.75 },
            "color": "#f1c40f",
            "name": "Ala",
            "team": "YELLOW"
        })
    );
}

#[test]
fn ball_omits_team_and_absent_selection_is_omitted() {
    let state = BoardState {
        items: vec![BoardItem::ball("ball", Vec2::CENTER)],
        selected_id: None,
    };

    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["items"][0]["kind"], "ball");
    assert!(value["items"][0].get("team").is_none());
    assert!(value.get("selectedId").is_none());
}

#[test]
fn saved_board_uses_camel_case_keys() {
    let slot = SavedBoard {
        id: "slot-1".to_string(),
        name: "drill".to_string(),
        created_at: 1_700_000_000_000,
        state: BoardState {
            items: Vec::new(),
            selected_id: Some("p1".to_string()),
        },
    };

    let value = serde_json::to_value(&slot).unwrap();

    assert_eq!(value["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(value["state"]["selectedId"], "p1");
    let decoded: SavedBoard = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, slot);
}

#[test]
fn unknown_team_is_rejected() {
    let value = json!({
        "id": "p1",
        "kind": "player",
        "pos": { "x": 0.1, "y": 0.1 },
        "color": "#000000",
        "name": "",
        "team": "GREEN"
    });

    assert!(serde_json::from_value::<BoardItem>(value).is_err());
}
