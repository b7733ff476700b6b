//! Named starting layouts and the ball factory.

use crate::model::board::{BoardItem, Team, Vec2};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed id of the ball token.
pub const BALL_ID: &str = "ball";
/// Team used by catalog formations.
pub const FORMATION_TEAM: Team = Team::Red;
/// Label given to the first (goalkeeper) slot of every formation.
pub const GOALKEEPER_LABEL: &str = "GK";

const TWO_ONE_TWO: [(f64, f64); 6] = [
    (0.10, 0.50),
    (0.24, 0.35),
    (0.24, 0.65),
    (0.36, 0.50),
    (0.46, 0.35),
    (0.46, 0.65),
];

const TWO_ZERO_THREE: [(f64, f64); 6] = [
    (0.10, 0.50),
    (0.24, 0.35),
    (0.24, 0.65),
    (0.44, 0.30),
    (0.44, 0.50),
    (0.44, 0.70),
];

/// Catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormationKey {
    /// `2-1-2`
    TwoOneTwo,
    /// `2-0-3`
    TwoZeroThree,
}

impl FormationKey {
    pub const ALL: [FormationKey; 2] = [FormationKey::TwoOneTwo, FormationKey::TwoZeroThree];

    /// Display/wire label, e.g. `2-1-2`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoOneTwo => "2-1-2",
            Self::TwoZeroThree => "2-0-3",
        }
    }

    fn positions(self) -> &'static [(f64, f64); 6] {
        match self {
            Self::TwoOneTwo => &TWO_ONE_TWO,
            Self::TwoZeroThree => &TWO_ZERO_THREE,
        }
    }
}

impl Display for FormationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown formation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormationParseError(pub String);

impl Display for FormationParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown formation `{}`; expected 2-1-2|2-0-3", self.0)
    }
}

impl Error for FormationParseError {}

impl FromStr for FormationKey {
    type Err = FormationParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| FormationParseError(trimmed.to_string()))
    }
}

/// Builds the player tokens of formation `key`.
pub fn formation_items(key: FormationKey) -> Vec<BoardItem> {
    key.positions()
        .iter()
        .enumerate()
        .map(|(index, &(x, y))| {
            let name = if index == 0 { GOALKEEPER_LABEL } else { "" };
            BoardItem::player(format!("p{}", index + 1), FORMATION_TEAM, Vec2::new(x, y), name)
        })
        .collect()
}

/// Builds the ball token at field center.
pub fn make_ball() -> BoardItem {
    BoardItem::ball(BALL_ID, Vec2::CENTER)
}
