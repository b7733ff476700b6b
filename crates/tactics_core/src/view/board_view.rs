//! Draw list for one board on one pitch rectangle.

use crate::geometry::coords::PixelPoint;
use crate::geometry::field::{token_radius, FieldRect, SELECTION_RING_PADDING};
use crate::model::board::{BoardState, ItemKind};

/// Default file name used when the rendered board is exported as an image.
pub const EXPORT_FILE_NAME: &str = "futsal-board.png";

/// One token ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenView {
    pub id: String,
    pub kind: ItemKind,
    /// Center in stage pixels.
    pub center: PixelPoint,
    pub radius: f64,
    pub color: String,
    /// Name label; only players have one.
    pub label: Option<String>,
    pub selected: bool,
    /// Being edited inline (label hidden behind the editor, drag disabled).
    pub editing: bool,
}

impl TokenView {
    /// Radius of the selection ring, when selected.
    pub fn selection_ring_radius(&self) -> Option<f64> {
        self.selected.then_some(self.radius + SELECTION_RING_PADDING)
    }

    pub fn draggable(&self) -> bool {
        !self.editing
    }
}

/// Full draw list in z-order (first drawn first).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub field: FieldRect,
    pub tokens: Vec<TokenView>,
}

impl BoardView {
    pub fn build(state: &BoardState, field: FieldRect, editing_id: Option<&str>) -> Self {
        let selected_id = state.selected_id.as_deref();
        let tokens = state
            .items
            .iter()
            .map(|item| TokenView {
                id: item.id.clone(),
                kind: item.kind,
                center: field.to_stage(item.pos),
                radius: token_radius(item.kind),
                color: item.color.clone(),
                label: item.is_player().then(|| item.name.clone()),
                selected: selected_id == Some(item.id.as_str()),
                editing: editing_id == Some(item.id.as_str()),
            })
            .collect();

        Self { field, tokens }
    }

    pub fn token(&self, id: &str) -> Option<&TokenView> {
        self.tokens.iter().find(|token| token.id == id)
    }
}
