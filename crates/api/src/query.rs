//! Collage queries - read-only access to workspace state.

use collage::{CanvasSettings, History, Item, ItemId, LayoutMode};
use serde::{Deserialize, Serialize};

/// A query for workspace state (read-only).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// All items in array (layout) order.
    GetItems,

    /// A specific item by ID.
    GetItem { id: ItemId },

    /// All items back to front.
    GetItemsInPaintOrder,

    /// The frontmost item under a canvas point.
    GetItemAtPoint { x: f32, y: f32 },

    GetCanvasSettings,

    GetLayoutMode,

    /// Undo/redo depth.
    GetHistory,

    /// The selected item and the selected uploads.
    GetSelection,

    GetUploads,

    GetItemCount,
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Items { items: Vec<Item> },

    Item { item: Option<Item> },

    Settings { settings: CanvasSettings },

    LayoutMode { mode: LayoutMode },

    History(HistoryInfo),

    Selection {
        item: Option<ItemId>,
        uploads: Vec<String>,
    },

    Uploads { uploads: Vec<String> },

    Count { count: usize },
}

/// Serializable summary of the undo history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryInfo {
    pub undo_steps: usize,
    pub redo_steps: usize,
}

impl From<&History> for HistoryInfo {
    fn from(history: &History) -> Self {
        Self {
            undo_steps: history.past_len(),
            redo_steps: history.future_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_query_parses() {
        let query: Query =
            serde_json::from_str(r#"{"type": "get_item_at_point", "x": 10, "y": 20.5}"#).unwrap();
        assert!(matches!(query, Query::GetItemAtPoint { x, y } if x == 10.0 && y == 20.5));
    }

    #[test]
    fn history_result_is_flat() {
        let result = QueryResult::History(HistoryInfo {
            undo_steps: 2,
            redo_steps: 0,
        });
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["type"], "history");
        assert_eq!(json["undo_steps"], 2);
    }
}
