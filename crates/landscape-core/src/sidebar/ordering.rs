use super::drag::{apply_drag, DragLocation};
use super::materialize::SidebarSnapshot;
use crate::models::{Direction, GroupOrder, OrderError};
use crate::store::{SettingsStore, StorageError};
use tracing::{debug, warn};

/// Interactive yes/no confirmation, asked before destructive operations.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

const DELETE_FOLDER_PROMPT: &str =
    "Are you sure you want to delete this folder? The groups will be moved to the bottom of the main list.";

/// Sidebar Ordering Engine.
///
/// Owns the settings store and writes the full order through on every
/// change. Each call returns `Ok(true)` when the order changed and was
/// persisted, `Ok(false)` when the operation was rejected or had no effect
/// (the order is untouched in both cases), and `Err` only when the write
/// failed, in which case the previous order stays in place.
pub struct SidebarOrdering {
    settings: SettingsStore,
}

impl SidebarOrdering {
    pub fn new(settings: SettingsStore) -> Self {
        Self { settings }
    }

    pub fn order(&self) -> &GroupOrder {
        self.settings.group_order()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    pub fn into_settings(self) -> SettingsStore {
        self.settings
    }

    pub fn insert_folder(&mut self, name: &str) -> Result<bool, StorageError> {
        let next = self.order().insert_folder(name);
        self.commit("insert folder", next)
    }

    pub fn move_to_folder(
        &mut self,
        group: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<bool, StorageError> {
        let next = self.order().move_to_folder(group, from, to);
        self.commit("move to folder", next)
    }

    pub fn reorder_within_folder(
        &mut self,
        folder: &str,
        group: &str,
        direction: Direction,
    ) -> Result<bool, StorageError> {
        let next = self.order().reorder_within_folder(folder, group, direction);
        self.commit("reorder within folder", next)
    }

    /// Delete a folder after the user confirms; declining changes nothing.
    pub fn delete_folder(
        &mut self,
        name: &str,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<bool, StorageError> {
        if self.order().folder(name).is_none() {
            return self.commit("delete folder", Err(OrderError::UnknownFolder(name.to_string())));
        }
        if !prompt.confirm(DELETE_FOLDER_PROMPT) {
            debug!("folder {:?} kept, deletion declined", name);
            return Ok(false);
        }
        let next = self.order().remove_folder(name);
        self.commit("delete folder", next)
    }

    pub fn toggle_collapse(&mut self, folder: &str) -> Result<bool, StorageError> {
        let next = self.order().toggle_collapse(folder);
        self.commit("toggle collapse", next)
    }

    pub fn toggle_collapse_all(&mut self, collapsed: bool) -> Result<bool, StorageError> {
        let next = self.order().set_all_collapsed(collapsed);
        self.commit("toggle collapse all", Ok(next))
    }

    /// Bring the order up to date with the joined groups (discovery order).
    pub fn reconcile_membership(&mut self, joined: &[String]) -> Result<bool, StorageError> {
        let next = self.order().reconcile_membership(joined);
        self.commit("reconcile membership", Ok(next))
    }

    /// Expand whichever folder holds the selected group.
    pub fn reveal_selection(&mut self, group: &str) -> Result<bool, StorageError> {
        let next = self.order().expand_folder_of(group);
        self.commit("reveal selection", Ok(next))
    }

    /// Apply a finished drag. A drop outside any list is a no-op.
    pub fn apply_drag(
        &mut self,
        source: &DragLocation,
        destination: Option<&DragLocation>,
    ) -> Result<bool, StorageError> {
        let Some(destination) = destination else {
            return Ok(false);
        };
        let next = apply_drag(self.order(), source, destination);
        self.commit("drag", next)
    }

    /// Seed an empty order with the default before the sorter edits it, so
    /// drag locations address the rows the user sees.
    pub fn begin_sorting(&mut self, snapshot: &SidebarSnapshot<'_>) -> Result<bool, StorageError> {
        if !self.order().is_empty() {
            return Ok(false);
        }
        let seeded = snapshot.default_order();
        self.commit("seed order", Ok(seeded))
    }

    /// Replace the whole order, e.g. with the seeded order the sorter was editing
    pub fn save_order(&mut self, order: GroupOrder) -> Result<bool, StorageError> {
        self.commit("save order", Ok(order))
    }

    fn commit(
        &mut self,
        operation: &str,
        next: Result<GroupOrder, OrderError>,
    ) -> Result<bool, StorageError> {
        match next {
            Err(e) => {
                warn!("{} rejected: {}", operation, e);
                Ok(false)
            }
            Ok(next) if &next == self.order() => Ok(false),
            Ok(next) => {
                self.settings.set_group_order(next)?;
                debug!("{}: order now has {} entries", operation, self.order().len());
                Ok(true)
            }
        }
    }
}
