//! Collage commands - all operations that modify workspace state.
//!
//! Commands are intent-based: they describe what the user wants, not how
//! to achieve it. The executor handles re-layout and undo recording.

use crate::Target;
use collage::{
    AutoLayout, CanvasPoint, CanvasSettingsUpdate, CanvasSize, Item, ItemContent, ItemId,
    ItemStyle, ItemUpdate,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A command that modifies the workspace.
///
/// Commands are serializable so they can be recorded, scripted and replayed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Items ===
    /// Add one item.
    AddItem { item: ItemSpec },

    /// Add several items as one undo step.
    AddItems { items: Vec<ItemSpec> },

    /// Remove target items, one undo step each.
    RemoveItem {
        #[serde(default)]
        target: Target,
    },

    /// Apply a partial edit to target items. Leaves auto layout.
    UpdateItem {
        #[serde(default)]
        target: Target,
        update: ItemUpdate,
    },

    /// An edit coming from a canvas gesture: drops onto another item swap
    /// in auto layouts, drops elsewhere snap back.
    ChangeItem { id: ItemId, update: ItemUpdate },

    /// Exchange the layout slots of two items.
    SwapItems { first: ItemId, second: ItemId },

    /// Replace every item without layout or history.
    SetItems { items: Vec<Item> },

    // === Layout ===
    /// Switch to an auto layout and re-pack.
    ApplyLayout { layout: AutoLayout },

    /// Shuffle item order and re-pack. A seed makes the order reproducible.
    ShuffleLayout {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },

    // === Canvas ===
    ResizeCanvas { width: f32, height: f32 },

    SetCanvasSettings { settings: CanvasSettingsUpdate },

    // === Selection ===
    /// Select one item, or clear the selection with `null`.
    SelectItem { id: Option<ItemId> },

    // === Uploads ===
    AddUpload { src: String },

    RemoveUpload { src: String },

    /// Click an upload thumbnail.
    ToggleUploadSelection {
        src: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },

    // === History ===
    /// Undo the last recorded change.
    Undo,

    /// Redo the last undone change.
    Redo,

    // === Batch ===
    /// Execute multiple commands in sequence, stopping at the first error.
    Batch { commands: Vec<Command> },
}

/// Creation payload for a new item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Fixed id, so later commands in a script can refer to the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub content: ItemContent,
    #[serde(default)]
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Defaults to stacking above every existing item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f32>,
    #[serde(default)]
    pub style: ItemStyle,
}

fn default_scale() -> f32 {
    1.0
}

impl ItemSpec {
    pub fn new(content: ItemContent, size: Vec2) -> Self {
        Self {
            id: None,
            content,
            position: Vec2::ZERO,
            size,
            rotation: 0.0,
            scale: 1.0,
            z_index: None,
            original_width: None,
            original_height: None,
            style: ItemStyle::default(),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the item, stacking it at `default_z_index` unless one was given.
    pub fn into_item(self, default_z_index: i32) -> Item {
        let mut item = Item::new(self.content, CanvasPoint(self.position), CanvasSize(self.size));
        if let Some(id) = self.id {
            item.id = id;
        }
        item.rotation = self.rotation;
        item.scale = self.scale;
        item.z_index = self.z_index.unwrap_or(default_z_index);
        item.original_width = self.original_width;
        item.original_height = self.original_height;
        item.style = self.style;
        item
    }
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of items created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<ItemId>,
        /// IDs of items modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<ItemId>,
        /// IDs of items deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<ItemId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn created(ids: Vec<ItemId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn modified(ids: Vec<ItemId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
            deleted: vec![],
        }
    }

    pub fn deleted(ids: Vec<ItemId>) -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
