//! Board domain model.
//!
//! # Responsibility
//! - Define the token and board snapshot shapes shared by store, view and
//!   persistence.
//! - Own the team -> color lookup so color is derived in one place.
//!
//! # Invariants
//! - `Vec2` components produced by `Vec2::clamped` are finite and in `[0, 1]`.
//! - Only `ItemKind::Player` items carry a `team`.
//! - A well-formed board holds exactly one `ItemKind::Ball` item. This is kept
//!   by the mutation API (`BoardStore`), not validated here.
//!
//! # See also
//! - `crate::store::board_store`

use serde::{Deserialize, Serialize};

/// Color used for the ball token.
pub const BALL_COLOR: &str = "#f1c40f";

/// Position normalized to field width/height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Field center.
    pub const CENTER: Vec2 = Vec2 { x: 0.5, y: 0.5 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a copy with both components forced into `[0, 1]`.
    ///
    /// NaN collapses to `0`.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Player,
    Ball,
}

/// Team a player token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    Red,
    Yellow,
    Blue,
}

impl Team {
    pub const ALL: [Team; 3] = [Team::Red, Team::Yellow, Team::Blue];

    /// Display color for players of this team.
    pub fn color(self) -> &'static str {
        match self {
            Self::Red => "#e74c3c",
            Self::Yellow => "#f1c40f",
            Self::Blue => "#3498db",
        }
    }

    /// Wire name (`RED|YELLOW|BLUE`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
        }
    }

    /// Parses a wire name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RED" => Some(Self::Red),
            "YELLOW" => Some(Self::Yellow),
            "BLUE" => Some(Self::Blue),
            _ => None,
        }
    }
}

/// One placed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    /// Stable id keying every lookup.
    pub id: String,
    pub kind: ItemKind,
    pub pos: Vec2,
    /// Hex display color.
    pub color: String,
    /// Free text label, empty allowed.
    pub name: String,
    /// Present only for players.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

impl BoardItem {
    /// Creates a player token with color derived from `team`.
    pub fn player(id: impl Into<String>, team: Team, pos: Vec2, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Player,
            pos: pos.clamped(),
            color: team.color().to_string(),
            name: name.into(),
            team: Some(team),
        }
    }

    /// Creates a ball token.
    pub fn ball(id: impl Into<String>, pos: Vec2) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Ball,
            pos: pos.clamped(),
            color: BALL_COLOR.to_string(),
            name: String::new(),
            team: None,
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == ItemKind::Player
    }

    pub fn is_ball(&self) -> bool {
        self.kind == ItemKind::Ball
    }
}

/// Full board snapshot.
///
/// `items` order is draw order: later items render on top and win hit-tests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardState {
    pub items: Vec<BoardItem>,
    #[serde(
        rename = "selectedId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_id: Option<String>,
}

impl BoardState {
    pub fn find(&self, id: &str) -> Option<&BoardItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut BoardItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// First ball token, if any.
    pub fn ball(&self) -> Option<&BoardItem> {
        self.items.iter().find(|item| item.is_ball())
    }

    pub fn ball_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_ball()).count()
    }

    pub fn players(&self) -> impl Iterator<Item = &BoardItem> {
        self.items.iter().filter(|item| item.is_player())
    }
}
