//! Command and query execution against a [`Workspace`].
//!
//! This module connects the abstract Command/Query types to the collage
//! store, executing operations and returning results.

use crate::{Command, CommandResult, HistoryInfo, Query, QueryResult, Target};
use collage::interaction::ItemChange;
use collage::{
    z_index_above, CanvasPoint, CanvasSettings, CollageStore, Item, ItemId, Modifiers, Selection,
    SettingsError,
};
use std::collections::HashSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// A collage document plus the editor state around it.
#[derive(Clone, Debug, Default)]
pub struct Workspace {
    pub store: CollageStore,
    /// Multi-selection in the uploads gallery, keyed by source.
    pub upload_selection: Selection<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CanvasSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            store: CollageStore::with_settings(settings),
            upload_selection: Selection::new(),
        })
    }
}

#[derive(Debug, Error)]
enum CommandError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("no item with id {0}")]
    UnknownItem(ItemId),

    #[error("item id {0} is already in use")]
    DuplicateItem(ItemId),

    #[error("no upload named {0:?}")]
    UnknownUpload(String),

    #[error("invalid canvas settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Execute a command against a workspace.
pub fn execute_command(workspace: &mut Workspace, command: Command) -> CommandResult {
    match execute_command_inner(workspace, command) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("command failed: {err}");
            CommandResult::error(err.to_string())
        }
    }
}

fn execute_command_inner(
    workspace: &mut Workspace,
    command: Command,
) -> Result<CommandResult, CommandError> {
    let store = &mut workspace.store;

    let result = match command {
        Command::AddItem { item } => {
            let item = item.into_item(z_index_above(store.items().len(), 0));
            let id = item.id;
            ensure_unique_ids(store.items(), std::slice::from_ref(&item))?;
            store.add_item(item);
            CommandResult::created(vec![id])
        }

        Command::AddItems { items } => {
            let items: Vec<_> = items
                .into_iter()
                .enumerate()
                .map(|(i, spec)| spec.into_item(z_index_above(store.items().len(), i)))
                .collect();
            ensure_unique_ids(store.items(), &items)?;
            let ids = items.iter().map(|item| item.id).collect();
            store.add_items(items);
            CommandResult::created(ids)
        }

        Command::RemoveItem { target } => {
            let mut deleted = Vec::new();
            for id in resolve_target(store, &target) {
                if store.get_item(id).is_some() {
                    deleted.push(id);
                }
                store.remove_item(id);
            }
            CommandResult::deleted(deleted)
        }

        Command::UpdateItem { target, update } => {
            let mut modified = Vec::new();
            for id in resolve_target(store, &target) {
                if store.get_item(id).is_some() {
                    modified.push(id);
                }
                store.update_item(id, &update);
            }
            CommandResult::modified(modified)
        }

        Command::ChangeItem { id, update } => {
            if store.get_item(id).is_none() {
                return Err(CommandError::UnknownItem(id));
            }
            match store.change_item(id, &update) {
                ItemChange::Swap(first, second) => CommandResult::modified(vec![first, second]),
                ItemChange::Relayout(_) => CommandResult::modified(all_ids(store)),
                ItemChange::Update(id, _) => CommandResult::modified(vec![id]),
            }
        }

        Command::SwapItems { first, second } => {
            if store.swap_items(first, second) {
                CommandResult::modified(vec![first, second])
            } else {
                CommandResult::success()
            }
        }

        Command::SetItems { items } => {
            ensure_unique_ids(&[], &items)?;
            store.set_items(items);
            CommandResult::modified(all_ids(store))
        }

        Command::ApplyLayout { layout } => {
            store.apply_layout(layout);
            CommandResult::modified(all_ids(store))
        }

        Command::ShuffleLayout { seed } => {
            match seed {
                Some(seed) => store.shuffle_layout(&mut StdRng::seed_from_u64(seed)),
                None => store.shuffle_layout_random(),
            }
            CommandResult::modified(all_ids(store))
        }

        Command::ResizeCanvas { width, height } => {
            CanvasSettings {
                width,
                height,
                ..store.settings().clone()
            }
            .validate()?;
            store.resize_canvas(width, height);
            CommandResult::modified(all_ids(store))
        }

        Command::SetCanvasSettings { settings } => {
            store.settings().merged(&settings).validate()?;
            store.set_canvas_settings(&settings);
            CommandResult::modified(all_ids(store))
        }

        Command::SelectItem { id } => {
            if let Some(id) = id {
                if store.get_item(id).is_none() {
                    return Err(CommandError::UnknownItem(id));
                }
            }
            store.set_selected_item(id);
            CommandResult::success()
        }

        Command::AddUpload { src } => {
            store.add_uploaded_image(src);
            CommandResult::success()
        }

        Command::RemoveUpload { src } => {
            store.remove_uploaded_image(&src);
            workspace
                .upload_selection
                .retain_existing(workspace.store.uploaded_images());
            CommandResult::success()
        }

        Command::ToggleUploadSelection { src, shift, meta } => {
            let uploads = store.uploaded_images();
            let index = uploads
                .iter()
                .position(|upload| *upload == src)
                .ok_or_else(|| CommandError::UnknownUpload(src.clone()))?;
            let modifiers = Modifiers::from_keys(shift, meta, false);
            workspace
                .upload_selection
                .toggle(&src, index, modifiers, uploads);
            CommandResult::success()
        }

        Command::Undo => {
            if !store.undo() {
                return Err(CommandError::NothingToUndo);
            }
            CommandResult::modified(all_ids(store))
        }

        Command::Redo => {
            if !store.redo() {
                return Err(CommandError::NothingToRedo);
            }
            CommandResult::modified(all_ids(store))
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();

            for cmd in commands {
                match execute_command(workspace, cmd) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                    }
                    CommandResult::Error { message } => {
                        return Ok(CommandResult::error(format!("Batch failed: {}", message)));
                    }
                }
            }

            CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
            }
        }
    };
    Ok(result)
}

/// Execute a query against a workspace.
pub fn execute_query(workspace: &Workspace, query: Query) -> QueryResult {
    let store = &workspace.store;

    match query {
        Query::GetItems => QueryResult::Items {
            items: store.items().to_vec(),
        },

        Query::GetItem { id } => QueryResult::Item {
            item: store.get_item(id).cloned(),
        },

        Query::GetItemsInPaintOrder => QueryResult::Items {
            items: store.items_in_paint_order().into_iter().cloned().collect(),
        },

        Query::GetItemAtPoint { x, y } => QueryResult::Item {
            item: store.item_at_point(CanvasPoint::new(x, y)).cloned(),
        },

        Query::GetCanvasSettings => QueryResult::Settings {
            settings: store.settings().clone(),
        },

        Query::GetLayoutMode => QueryResult::LayoutMode {
            mode: store.layout_mode(),
        },

        Query::GetHistory => QueryResult::History(HistoryInfo::from(store.history())),

        Query::GetSelection => {
            // Keep gallery order rather than set order.
            let uploads = store
                .uploaded_images()
                .iter()
                .filter(|src| workspace.upload_selection.contains(*src))
                .cloned()
                .collect();
            QueryResult::Selection {
                item: store.selected_item_id(),
                uploads,
            }
        }

        Query::GetUploads => QueryResult::Uploads {
            uploads: store.uploaded_images().to_vec(),
        },

        Query::GetItemCount => QueryResult::Count {
            count: store.items().len(),
        },
    }
}

/// Reject new items whose ids collide with `existing` or with each other.
fn ensure_unique_ids(existing: &[Item], new: &[Item]) -> Result<(), CommandError> {
    let mut seen: HashSet<ItemId> = existing.iter().map(|item| item.id).collect();
    match new.iter().find(|item| !seen.insert(item.id)) {
        Some(item) => Err(CommandError::DuplicateItem(item.id)),
        None => Ok(()),
    }
}

fn all_ids(store: &CollageStore) -> Vec<ItemId> {
    store.items().iter().map(|item| item.id).collect()
}

/// Resolve a target to a list of item IDs.
fn resolve_target(store: &CollageStore, target: &Target) -> Vec<ItemId> {
    match target {
        Target::Selection => store.selected_item_id().into_iter().collect(),
        Target::Item(id) => vec![*id],
        Target::Items(ids) => ids.clone(),
        Target::All => all_ids(store),
    }
}
