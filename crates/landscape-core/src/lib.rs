//! Sidebar engine for the Landscape client: group ordering with folders,
//! unread aggregation, per-conversation drafts and the materialized sidebar list.

pub mod config;
pub mod constants;
pub mod events;
pub mod models;
pub mod sidebar;
pub mod store;
pub mod tracing_setup;

// Re-export the main entry points at crate root for convenience
pub use config::CoreConfig;
pub use events::{Command, CommandDispatcher, PlatformUpdate};
pub use models::{ConversationKey, GroupFolder, GroupOrder, OrderEntry, ResourcePath};
pub use sidebar::{build_visible_list, SidebarOrdering, SidebarView, UnreadAggregator};
pub use store::{DraftStore, LandscapeState, ReplyStore, SettingsStore};
