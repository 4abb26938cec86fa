use super::channels::Workspace;
use std::collections::HashMap;

/// Collapsed/expanded state of one workspace row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowExpansion {
    Collapsed,
    Expanded,
}

impl RowExpansion {
    /// A row starts expanded only when it, or one of its channels, is selected.
    /// The messages row is always open.
    pub fn initial(workspace: &Workspace, contains_selection: bool) -> Self {
        if contains_selection || *workspace == Workspace::Messages {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    pub fn toggled(self, workspace: &Workspace) -> Self {
        match (self, workspace) {
            (_, Workspace::Messages) => Self::Expanded,
            (Self::Collapsed, _) => Self::Expanded,
            (Self::Expanded, _) => Self::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// Per-row expansion that survives list rebuilds.
///
/// The initial-selection rule is applied once, the first time a row is seen;
/// after that only `toggle` changes a row.
#[derive(Debug, Clone, Default)]
pub struct SidebarExpansions {
    rows: HashMap<Workspace, RowExpansion>,
}

impl SidebarExpansions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, workspace: &Workspace) -> Option<RowExpansion> {
        self.rows.get(workspace).copied()
    }

    /// State for a row, falling back to the initial rule for unseen rows
    pub fn state(&self, workspace: &Workspace, contains_selection: bool) -> RowExpansion {
        self.get(workspace)
            .unwrap_or_else(|| RowExpansion::initial(workspace, contains_selection))
    }

    /// Record the initial state of a row the first time it is rendered
    pub fn observe(&mut self, workspace: &Workspace, contains_selection: bool) -> RowExpansion {
        *self
            .rows
            .entry(workspace.clone())
            .or_insert_with(|| RowExpansion::initial(workspace, contains_selection))
    }

    /// User toggle. A row not recorded yet flips from the state it is shown
    /// in, which depends on whether it holds the selection.
    pub fn toggle(&mut self, workspace: &Workspace, contains_selection: bool) -> RowExpansion {
        let next = self.state(workspace, contains_selection).toggled(workspace);
        self.rows.insert(workspace.clone(), next);
        next
    }
}
