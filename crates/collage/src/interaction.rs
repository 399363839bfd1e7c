//! Canvas gestures: drag-to-swap and resize limits.

use crate::coords::{Bounds, CanvasPoint};
use crate::layout::{AutoLayout, LayoutMode};
use crate::{Item, ItemId, ItemUpdate};

/// Smallest width or height a resize may leave an item with.
pub const MIN_ITEM_EXTENT: f32 = 5.0;

/// What an edit coming from the canvas turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemChange {
    /// The dragged item was dropped onto another; exchange their slots.
    Swap(ItemId, ItemId),
    /// Dropped on empty canvas in an auto mode; snap everything back.
    Relayout(AutoLayout),
    /// A plain edit.
    Update(ItemId, ItemUpdate),
}

/// Where a drag of `item` ends: its new top-left plus half its current size.
pub fn drop_point(item: &Item, update: &ItemUpdate) -> CanvasPoint {
    let x = update.x.unwrap_or(item.position.x());
    let y = update.y.unwrap_or(item.position.y());
    CanvasPoint::new(x, y) + item.size.half()
}

/// Decide how to handle `update` to `item` given the current layout.
///
/// Moves only mean something special in an auto mode: the items there are
/// placed by the engine, so a drag is read as "put me where that item is".
/// The first other item (in array order) under the drop point is the target.
pub fn resolve_item_change(
    item: &Item,
    update: &ItemUpdate,
    items: &[Item],
    mode: LayoutMode,
) -> ItemChange {
    let Some(layout) = mode.auto().filter(|_| update.moves()) else {
        return ItemChange::Update(item.id, update.clone());
    };

    let point = drop_point(item, update);
    match items
        .iter()
        .find(|other| other.id != item.id && other.contains_point(point))
    {
        Some(target) => ItemChange::Swap(item.id, target.id),
        None => ItemChange::Relayout(layout),
    }
}

/// Clamp a transformer resize: boxes narrower or shorter than
/// [`MIN_ITEM_EXTENT`] are rejected in favour of the old box.
pub fn constrain_resize(old: Bounds, new: Bounds) -> Bounds {
    if new.size.width() < MIN_ITEM_EXTENT || new.size.height() < MIN_ITEM_EXTENT {
        old
    } else {
        new
    }
}
