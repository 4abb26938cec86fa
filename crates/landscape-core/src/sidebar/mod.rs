pub mod channels;
pub mod drag;
pub mod expansion;
pub mod materialize;
pub mod navigation;
pub mod ordering;
pub mod unread;

pub use channels::{list_channels, route_for, ChannelItem, ListedChannel, Workspace};
pub use drag::{apply_drag, DragLocation, DropList};
pub use expansion::{RowExpansion, SidebarExpansions};
pub use materialize::{
    build_visible_list, sorter_entries, sorter_order, ChannelRow, FolderRow, ListOptions,
    PendingRow, SidebarRow, SidebarSnapshot, SidebarView, SorterEntry, SorterItem, WorkspaceRow,
};
pub use navigation::{cycle_channels, cycle_index, mark_read, navigate_cycle};
pub use ordering::{ConfirmPrompt, SidebarOrdering};
pub use unread::{FolderSummary, UnreadAggregator};
