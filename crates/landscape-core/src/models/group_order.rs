//! User-defined sidebar order: bare group entries and named folders of groups.
//!
//! Every operation takes the current order and returns the next one; the
//! caller decides whether to persist it. A group id resides in exactly one
//! place (top level, or exactly one folder) and folder names are unique.

use crate::constants::{APPS_ENTRY, HOME_ENTRY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("folder name must not be empty")]
    EmptyFolderName,
    #[error("a folder named {0:?} already exists")]
    FolderExists(String),
    #[error("no folder named {0:?}")]
    UnknownFolder(String),
    #[error("group {group:?} is not in folder {folder:?}")]
    GroupNotInFolder { group: String, folder: String },
    #[error("folder {0:?} cannot be placed inside another folder")]
    FolderNesting(String),
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFolder {
    #[serde(rename = "folder")]
    pub name: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl GroupFolder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collapsed: false,
            groups: Vec::new(),
        }
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// One top-level entry. Serialized untagged, so a stored order reads as
/// `["My Channels", {"folder": "work", "collapsed": false, "groups": [...]}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderEntry {
    Group(String),
    Folder(GroupFolder),
}

impl OrderEntry {
    pub fn group(id: &str) -> Self {
        Self::Group(id.to_string())
    }

    pub fn as_folder(&self) -> Option<&GroupFolder> {
        match self {
            Self::Folder(f) => Some(f),
            Self::Group(_) => None,
        }
    }
}

/// Whether an order entry id is one of the synthetic home/apps rows
pub fn is_synthetic(id: &str) -> bool {
    id == HOME_ENTRY || id == APPS_ENTRY
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<OrderEntry>>", into = "Vec<OrderEntry>")]
pub struct GroupOrder {
    entries: Vec<OrderEntry>,
}

impl From<Vec<Option<OrderEntry>>> for GroupOrder {
    fn from(entries: Vec<Option<OrderEntry>>) -> Self {
        Self::from_entries(entries.into_iter().flatten().collect())
    }
}

impl From<GroupOrder> for Vec<OrderEntry> {
    fn from(order: GroupOrder) -> Self {
        order.entries
    }
}

impl GroupOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an order from raw entries, dropping duplicate residencies
    /// (first occurrence wins) and merging same-named folders.
    pub fn from_entries(entries: Vec<OrderEntry>) -> Self {
        let mut seen_groups: HashSet<String> = HashSet::new();
        let mut normalized: Vec<OrderEntry> = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                OrderEntry::Group(id) => {
                    if seen_groups.insert(id.clone()) {
                        normalized.push(OrderEntry::Group(id));
                    }
                }
                OrderEntry::Folder(folder) => {
                    let members: Vec<String> = folder
                        .groups
                        .into_iter()
                        .filter(|g| seen_groups.insert(g.clone()))
                        .collect();
                    let existing = normalized
                        .iter()
                        .position(|e| matches!(e, OrderEntry::Folder(f) if f.name == folder.name));
                    match existing {
                        Some(idx) => {
                            if let OrderEntry::Folder(f) = &mut normalized[idx] {
                                f.groups.extend(members);
                            }
                        }
                        None => normalized.push(OrderEntry::Folder(GroupFolder {
                            name: folder.name,
                            collapsed: folder.collapsed,
                            groups: members,
                        })),
                    }
                }
            }
        }

        Self { entries: normalized }
    }

    /// Default order used to seed the sorter: home first, then the given groups.
    pub fn seeded(groups: &[String]) -> Self {
        let entries = std::iter::once(HOME_ENTRY.to_string())
            .chain(groups.iter().cloned())
            .map(OrderEntry::Group)
            .collect();
        Self::from_entries(entries)
    }

    // ===== Getters =====

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<OrderEntry> {
        &mut self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every group id in render order, folders flattened in place
    pub fn all_groups(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for entry in &self.entries {
            match entry {
                OrderEntry::Group(id) => out.push(id.as_str()),
                OrderEntry::Folder(f) => out.extend(f.groups.iter().map(String::as_str)),
            }
        }
        out
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.entries.iter().any(|e| match e {
            OrderEntry::Group(id) => id == group,
            OrderEntry::Folder(f) => f.contains(group),
        })
    }

    pub fn folder(&self, name: &str) -> Option<&GroupFolder> {
        self.entries
            .iter()
            .filter_map(OrderEntry::as_folder)
            .find(|f| f.name == name)
    }

    fn folder_mut(&mut self, name: &str) -> Option<&mut GroupFolder> {
        self.entries.iter_mut().find_map(|e| match e {
            OrderEntry::Folder(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    pub fn folder_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(OrderEntry::as_folder)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Name of the folder holding `group`, None when top-level or absent
    pub fn folder_of(&self, group: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter_map(OrderEntry::as_folder)
            .find(|f| f.contains(group))
            .map(|f| f.name.as_str())
    }

    // ===== Operations =====

    /// Prepend a new empty folder. Names are matched case-sensitively.
    pub fn insert_folder(&self, name: &str) -> Result<Self, OrderError> {
        if name.trim().is_empty() {
            return Err(OrderError::EmptyFolderName);
        }
        if self.folder(name).is_some() {
            return Err(OrderError::FolderExists(name.to_string()));
        }
        let mut next = self.clone();
        next.entries.insert(0, OrderEntry::Folder(GroupFolder::new(name)));
        Ok(next)
    }

    /// Move `group` out of `from` (top level when None) into `to` (top level
    /// when None), appending at the end of the destination list.
    pub fn move_to_folder(
        &self,
        group: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, OrderError> {
        for name in from.iter().chain(to.iter()) {
            if self.folder(name).is_none() {
                return Err(OrderError::UnknownFolder(name.to_string()));
            }
        }

        let mut next = self.clone();
        next.remove_everywhere(group);
        match to {
            Some(name) => {
                if let Some(folder) = next.folder_mut(name) {
                    folder.groups.push(group.to_string());
                }
            }
            None => next.entries.push(OrderEntry::group(group)),
        }
        Ok(next)
    }

    fn remove_everywhere(&mut self, group: &str) {
        self.entries.retain(|e| !matches!(e, OrderEntry::Group(id) if id == group));
        for entry in &mut self.entries {
            if let OrderEntry::Folder(f) = entry {
                f.groups.retain(|g| g != group);
            }
        }
    }

    /// Swap `group` with its neighbour inside `folder`. No-op at either end.
    pub fn reorder_within_folder(
        &self,
        folder: &str,
        group: &str,
        direction: Direction,
    ) -> Result<Self, OrderError> {
        let mut next = self.clone();
        let target = next
            .folder_mut(folder)
            .ok_or_else(|| OrderError::UnknownFolder(folder.to_string()))?;
        let idx = target
            .groups
            .iter()
            .position(|g| g == group)
            .ok_or_else(|| OrderError::GroupNotInFolder {
                group: group.to_string(),
                folder: folder.to_string(),
            })?;

        match direction {
            Direction::Up if idx > 0 => target.groups.swap(idx, idx - 1),
            Direction::Down if idx + 1 < target.groups.len() => target.groups.swap(idx, idx + 1),
            _ => {}
        }
        Ok(next)
    }

    /// Remove a folder, appending its members to the end of the top level
    /// in their folder order.
    pub fn remove_folder(&self, name: &str) -> Result<Self, OrderError> {
        let idx = self
            .entries
            .iter()
            .position(|e| matches!(e, OrderEntry::Folder(f) if f.name == name))
            .ok_or_else(|| OrderError::UnknownFolder(name.to_string()))?;

        let mut next = self.clone();
        if let OrderEntry::Folder(folder) = next.entries.remove(idx) {
            next.entries
                .extend(folder.groups.into_iter().map(OrderEntry::Group));
        }
        Ok(next)
    }

    pub fn toggle_collapse(&self, name: &str) -> Result<Self, OrderError> {
        let mut next = self.clone();
        let folder = next
            .folder_mut(name)
            .ok_or_else(|| OrderError::UnknownFolder(name.to_string()))?;
        folder.collapsed = !folder.collapsed;
        Ok(next)
    }

    pub fn set_all_collapsed(&self, collapsed: bool) -> Self {
        let mut next = self.clone();
        for entry in &mut next.entries {
            if let OrderEntry::Folder(f) = entry {
                f.collapsed = collapsed;
            }
        }
        next
    }

    /// Expand the folder holding `group`, if it is collapsed.
    pub fn expand_folder_of(&self, group: &str) -> Self {
        let mut next = self.clone();
        for entry in &mut next.entries {
            if let OrderEntry::Folder(f) = entry {
                if f.contains(group) {
                    f.collapsed = false;
                }
            }
        }
        next
    }

    /// Append joined groups missing from the order (in the given order) and
    /// make sure the home and apps rows exist, at the front when missing.
    /// An empty order is returned unchanged: the first-run default applies.
    pub fn reconcile_membership(&self, joined: &[String]) -> Self {
        if self.is_empty() {
            return self.clone();
        }

        let mut present: HashSet<String> =
            self.all_groups().into_iter().map(str::to_string).collect();
        let mut next = self.clone();

        for group in joined {
            if !is_synthetic(group) && present.insert(group.clone()) {
                next.entries.push(OrderEntry::Group(group.clone()));
            }
        }

        let mut entries: Vec<OrderEntry> = [HOME_ENTRY, APPS_ENTRY]
            .into_iter()
            .filter(|id| !present.contains(*id))
            .map(OrderEntry::group)
            .collect();
        entries.append(&mut next.entries);
        next.entries = entries;
        next
    }
}
