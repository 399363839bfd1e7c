//! The collage document and its transitions.
//!
//! [`CollageStore`] owns the current item list, canvas settings, layout mode
//! and undo history. Every method runs to completion and replaces the item
//! list as a whole, so an observer only ever sees complete snapshots.

use crate::coords::CanvasPoint;
use crate::history::History;
use crate::interaction::{resolve_item_change, ItemChange};
use crate::layout::{self, AutoLayout, LayoutMode, LayoutOptions};
use crate::{CanvasSettings, CanvasSettingsUpdate, Item, ItemId, ItemUpdate};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Debug, Default)]
pub struct CollageStore {
    items: Vec<Item>,
    settings: CanvasSettings,
    layout_mode: LayoutMode,
    history: History,
    selected_item: Option<ItemId>,
    uploaded_images: Vec<String>,
}

impl CollageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CanvasSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // === Accessors ===

    /// Current items, in array order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_item_id(&self) -> Option<ItemId> {
        self.selected_item
    }

    /// The selected item, if it still exists.
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_item.and_then(|id| self.get_item(id))
    }

    pub fn uploaded_images(&self) -> &[String] {
        &self.uploaded_images
    }

    /// Items sorted back to front by `z_index`; ties keep array order.
    pub fn items_in_paint_order(&self) -> Vec<&Item> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.z_index);
        ordered
    }

    /// The frontmost item whose hit box contains `point`.
    pub fn item_at_point(&self, point: CanvasPoint) -> Option<&Item> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.contains_point(point))
            .max_by_key(|(index, item)| (item.z_index, *index))
            .map(|(_, item)| item)
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::from(&self.settings)
    }

    /// Re-run the active engine, if any.
    fn recalculate(&self, items: Vec<Item>) -> Vec<Item> {
        layout::recalculate(self.layout_mode, &self.layout_options(), items)
    }

    /// Replace the items and record the old list as an undo step.
    fn commit(&mut self, items: Vec<Item>) {
        let previous = std::mem::replace(&mut self.items, items);
        self.history.record(previous);
    }

    /// Replace the items without an undo step; redo is invalidated.
    fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.history.discard_redo();
    }

    // === Recorded mutations ===

    pub fn add_item(&mut self, item: Item) {
        self.add_items(vec![item]);
    }

    /// Append several items as one undo step.
    pub fn add_items(&mut self, items: Vec<Item>) {
        log::debug!("adding {} item(s) in {} mode", items.len(), self.layout_mode);
        let mut next = self.items.clone();
        next.extend(items);
        let next = self.recalculate(next);
        self.commit(next);
    }

    /// Remove an item. An unknown id still records an (unchanged) undo step.
    pub fn remove_item(&mut self, id: ItemId) {
        log::debug!("removing item {id}");
        let next: Vec<Item> = self.items.iter().filter(|item| item.id != id).cloned().collect();
        let next = self.recalculate(next);
        self.commit(next);
        if self.selected_item == Some(id) {
            self.selected_item = None;
        }
    }

    /// Apply a manual edit. This always drops back to free layout.
    pub fn update_item(&mut self, id: ItemId, update: &ItemUpdate) {
        let next = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    update.applied(item)
                } else {
                    item.clone()
                }
            })
            .collect();
        self.commit(next);
        if !self.layout_mode.is_free() {
            log::debug!("manual edit of {id} leaves {} layout", self.layout_mode);
        }
        self.layout_mode = LayoutMode::Free;
    }

    /// Exchange the array positions of two items and re-pack.
    ///
    /// Returns false, changing nothing, if either id is unknown.
    pub fn swap_items(&mut self, first: ItemId, second: ItemId) -> bool {
        let position = |id: ItemId| self.items.iter().position(|item| item.id == id);
        let (Some(a), Some(b)) = (position(first), position(second)) else {
            log::debug!("swap of {first} and {second} ignored: unknown item");
            return false;
        };

        let mut next = self.items.clone();
        next.swap(a, b);
        let next = self.recalculate(next);
        self.commit(next);
        true
    }

    /// Apply the drag-end decision for an edit coming from the canvas.
    pub fn change_item(&mut self, id: ItemId, update: &ItemUpdate) -> ItemChange {
        let change = match self.get_item(id) {
            Some(item) => resolve_item_change(item, update, &self.items, self.layout_mode),
            None => ItemChange::Update(id, update.clone()),
        };

        match &change {
            ItemChange::Swap(dragged, target) => {
                self.swap_items(*dragged, *target);
            }
            ItemChange::Relayout(layout) => self.apply_layout(*layout),
            ItemChange::Update(id, update) => self.update_item(*id, update),
        }
        change
    }

    // === Layout (not recorded) ===

    /// Switch to an auto layout and re-pack immediately.
    pub fn apply_layout(&mut self, layout: AutoLayout) {
        let next = layout::layout_items(layout, &self.layout_options(), &self.items);
        self.replace(next);
        self.layout_mode = layout.into();
    }

    /// Shuffle item order and re-pack; free mode becomes grid.
    pub fn shuffle_layout<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut shuffled = self.items.clone();
        shuffled.shuffle(rng);

        let layout = self.layout_mode.auto().unwrap_or(AutoLayout::Grid);
        let next = layout::layout_items(layout, &self.layout_options(), &shuffled);
        self.replace(next);
        self.layout_mode = layout.into();
    }

    pub fn shuffle_layout_random(&mut self) {
        self.shuffle_layout(&mut rand::rng());
    }

    /// Change the canvas size and re-pack.
    ///
    /// Unlike other changes this re-packs in free mode too, using the grid
    /// engine, so items land inside the new canvas. The mode is unchanged.
    pub fn resize_canvas(&mut self, width: f32, height: f32) {
        self.settings.width = width;
        self.settings.height = height;

        let layout = self.layout_mode.auto().unwrap_or(AutoLayout::Grid);
        let next = layout::layout_items(layout, &self.layout_options(), &self.items);
        self.replace(next);
    }

    /// Merge new settings; auto modes re-pack with them.
    pub fn set_canvas_settings(&mut self, update: &CanvasSettingsUpdate) {
        self.settings = self.settings.merged(update);
        let next = self.recalculate(self.items.clone());
        self.replace(next);
    }

    /// Replace the items wholesale, without layout or an undo step.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.replace(items);
    }

    // === History ===

    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.items.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.items = previous;
                true
            }
            None => false,
        }
    }

    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.items.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.items = next;
                true
            }
            None => false,
        }
    }

    // === Selection and uploads ===

    pub fn set_selected_item(&mut self, id: Option<ItemId>) {
        self.selected_item = id;
    }

    /// Deselect so selection chrome is not captured; call before sampling
    /// pixels for export.
    pub fn prepare_export(&mut self) {
        self.selected_item = None;
    }

    pub fn add_uploaded_image(&mut self, src: impl Into<String>) {
        self.uploaded_images.push(src.into());
    }

    pub fn remove_uploaded_image(&mut self, src: &str) {
        self.uploaded_images.retain(|s| s != src);
    }
}
