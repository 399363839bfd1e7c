//! Target specification for commands.
//!
//! Commands that act on existing items say which ones through a [`Target`]:
//! the current selection, specific ids, or everything.

use collage::ItemId;
use serde::{Deserialize, Serialize};

/// Specifies which items a command targets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The selected item, if any.
    #[default]
    Selection,

    /// Specific item by ID.
    Item(ItemId),

    /// Multiple specific items by ID.
    Items(Vec<ItemId>),

    /// Every item on the canvas.
    All,
}

impl From<ItemId> for Target {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

impl From<Vec<ItemId>> for Target {
    fn from(ids: Vec<ItemId>) -> Self {
        Self::Items(ids)
    }
}
