//! Document model and layout engines for a collage canvas.
//!
//! Items form a flat list. Array order drives layout; `z_index` drives
//! paint order. A [`CollageStore`] owns the list together with the canvas
//! settings, the active [`LayoutMode`] and a bounded undo history.

pub mod coords;
pub mod dims;
pub mod grid;
pub mod history;
pub mod import;
pub mod interaction;
mod item;
mod item_id;
pub mod layout;
pub mod mosaic;
pub mod selection;
mod settings;
pub mod store;

pub use coords::{Bounds, CanvasDelta, CanvasPoint, CanvasSize};
pub use history::{History, MAX_HISTORY};
pub use item::{
    z_index_above, Crop, Filter, Item, ItemContent, ItemKind, ItemStyle, ItemUpdate, Shadow,
};
pub use item_id::ItemId;
pub use layout::{AutoLayout, LayoutMode, LayoutOptions};
pub use selection::{Modifiers, Selection};
pub use settings::{CanvasSettings, CanvasSettingsUpdate, SettingsError};
pub use store::CollageStore;
