//! Drag-and-drop reordering in the sorter view.
//!
//! A drag is a remove-then-insert: the item leaves the source list at its
//! index and enters the destination list at the destination index. Lists are
//! the top-level order or one folder's member list.

use crate::models::{GroupOrder, OrderEntry, OrderError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropList {
    TopLevel,
    Folder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    pub list: DropList,
    pub index: usize,
}

impl DragLocation {
    pub fn top_level(index: usize) -> Self {
        Self {
            list: DropList::TopLevel,
            index,
        }
    }

    pub fn folder(name: &str, index: usize) -> Self {
        Self {
            list: DropList::Folder(name.to_string()),
            index,
        }
    }
}

fn folder_members<'a>(
    entries: &'a mut [OrderEntry],
    name: &str,
) -> Result<&'a mut Vec<String>, OrderError> {
    entries
        .iter_mut()
        .find_map(|e| match e {
            OrderEntry::Folder(f) if f.name == name => Some(&mut f.groups),
            _ => None,
        })
        .ok_or_else(|| OrderError::UnknownFolder(name.to_string()))
}

/// Apply a drop. A drop with no destination (released outside any list) is
/// the caller's no-op and never reaches here. Folders only move within the
/// top level; dropping one into a folder is rejected.
pub fn apply_drag(
    order: &GroupOrder,
    source: &DragLocation,
    destination: &DragLocation,
) -> Result<GroupOrder, OrderError> {
    let mut next = order.clone();
    let entries = next.entries_mut();

    let item = match &source.list {
        DropList::TopLevel => {
            if source.index >= entries.len() {
                return Err(OrderError::IndexOutOfRange {
                    index: source.index,
                    len: entries.len(),
                });
            }
            if let (OrderEntry::Folder(f), DropList::Folder(_)) =
                (&entries[source.index], &destination.list)
            {
                return Err(OrderError::FolderNesting(f.name.clone()));
            }
            entries.remove(source.index)
        }
        DropList::Folder(name) => {
            let members = folder_members(entries, name)?;
            if source.index >= members.len() {
                return Err(OrderError::IndexOutOfRange {
                    index: source.index,
                    len: members.len(),
                });
            }
            OrderEntry::Group(members.remove(source.index))
        }
    };

    match (&destination.list, item) {
        (DropList::TopLevel, item) => {
            if destination.index > entries.len() {
                return Err(OrderError::IndexOutOfRange {
                    index: destination.index,
                    len: entries.len(),
                });
            }
            entries.insert(destination.index, item);
        }
        (DropList::Folder(name), OrderEntry::Group(id)) => {
            let members = folder_members(entries, name)?;
            if destination.index > members.len() {
                return Err(OrderError::IndexOutOfRange {
                    index: destination.index,
                    len: members.len(),
                });
            }
            members.insert(destination.index, id);
        }
        (DropList::Folder(_), OrderEntry::Folder(f)) => {
            return Err(OrderError::FolderNesting(f.name));
        }
    }

    Ok(next)
}
