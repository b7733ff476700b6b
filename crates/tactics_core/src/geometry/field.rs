//! Pitch placement inside a stage and pointer hit-testing.
//!
//! # Responsibility
//! - Fit the pitch rectangle into the stage keeping its aspect ratio.
//! - Bound drags to the pitch and translate stage pixels to board coordinates.
//! - Pick the token under a pointer.
//!
//! # Invariants
//! - A fitted `FieldRect` has finite, non-negative size and is centered.
//! - Hit-testing prefers the item drawn last (topmost).

use crate::geometry::coords::{to_normalized, to_pixel, PixelPoint};
use crate::model::board::{BoardItem, BoardState, ItemKind, Vec2};

/// Default gap kept between stage edges and the pitch.
pub const DEFAULT_FIELD_MARGIN: f64 = 24.0;
/// Default pitch width:height ratio (futsal court is roughly 2:1).
pub const DEFAULT_ASPECT_RATIO: f64 = 2.0;
/// Radius of a player token, in pixels.
pub const PLAYER_RADIUS: f64 = 18.0;
/// Radius of the ball token, in pixels.
pub const BALL_RADIUS: f64 = 14.0;
/// Extra radius of the selection ring drawn around a selected token.
pub const SELECTION_RING_PADDING: f64 = 6.0;

/// Layout knobs for fitting the pitch into a stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLayoutConfig {
    pub margin: f64,
    pub aspect_ratio: f64,
}

impl Default for FieldLayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_FIELD_MARGIN,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

/// Pitch rectangle in stage pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FieldRect {
    /// Fits the largest pitch with the configured ratio into the stage minus
    /// margins, centered.
    pub fn fit(stage_width: f64, stage_height: f64, config: &FieldLayoutConfig) -> Self {
        let stage_width = finite_non_negative(stage_width);
        let stage_height = finite_non_negative(stage_height);
        let margin = finite_non_negative(config.margin);
        let ratio = if config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0 {
            config.aspect_ratio
        } else {
            DEFAULT_ASPECT_RATIO
        };

        let max_width = (stage_width - margin * 2.0).max(0.0);
        let max_height = (stage_height - margin * 2.0).max(0.0);

        let mut width = max_width;
        let mut height = max_width / ratio;
        if height > max_height {
            height = max_height;
            width = max_height * ratio;
        }

        Self {
            x: (stage_width - width) / 2.0,
            y: (stage_height - height) / 2.0,
            width,
            height,
        }
    }

    /// Clamps a stage point into the pitch (drag bound).
    pub fn clamp_point(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint {
            x: clamp_finite(x, self.x, self.x + self.width),
            y: clamp_finite(y, self.y, self.y + self.height),
        }
    }

    /// Board position -> stage pixel.
    pub fn to_stage(&self, pos: Vec2) -> PixelPoint {
        let local = to_pixel(pos, self.width, self.height);
        PixelPoint {
            x: self.x + local.x,
            y: self.y + local.y,
        }
    }

    /// Stage pixel -> board position, clamped to the pitch.
    pub fn to_board(&self, x: f64, y: f64) -> Vec2 {
        to_normalized(x - self.x, y - self.y, self.width, self.height)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Drawn radius of a token of `kind`.
pub fn token_radius(kind: ItemKind) -> f64 {
    match kind {
        ItemKind::Player => PLAYER_RADIUS,
        ItemKind::Ball => BALL_RADIUS,
    }
}

/// Returns the topmost item whose token covers the stage point.
pub fn hit_test<'a>(state: &'a BoardState, field: &FieldRect, x: f64, y: f64) -> Option<&'a BoardItem> {
    state.items.iter().rev().find(|item| {
        let center = field.to_stage(item.pos);
        let radius = token_radius(item.kind);
        let dx = x - center.x;
        let dy = y - center.y;
        dx * dx + dy * dy <= radius * radius
    })
}

fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}
