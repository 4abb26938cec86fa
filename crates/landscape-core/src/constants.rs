//! Application-wide constants
//!
//! Centralized location for synthetic sidebar ids, storage keys and the
//! route prefixes that are used across multiple modules.

/// Synthetic order entry for the home workspace ("My Channels")
pub const HOME_ENTRY: &str = "My Channels";

/// Synthetic order entry for the installed-apps row
pub const APPS_ENTRY: &str = "My Apps";

/// Title shown for the DM workspace row
pub const MESSAGES_TITLE: &str = "Messages";

/// Schema version of every persisted blob. Bumping it wipes all stores on next load.
pub const STORAGE_VERSION: u32 = 3;

// Storage keys (namespaced per ship by `CoreConfig::storage_key`)
pub mod keys {
    /// Unsent chat messages, keyed by conversation
    pub const CHAT_UNSENT: &str = "chat-unsent";
    /// Pending replies, keyed by conversation
    pub const REPLY_UNSENT: &str = "reply-unsent";
    /// Sidebar settings: group order, only-unread flag, list configs
    pub const SIDEBAR_SETTINGS: &str = "sidebar-settings";
}

/// Prefix of per-workspace list config entries
pub const GROUP_CONFIG_PREFIX: &str = "group-config:";

/// List config suffix used by the home and messages workspaces
pub const HOME_CONFIG: &str = "home";

// Route prefixes used when dispatching navigation commands
pub mod routes {
    pub const ROOT: &str = "/~landscape";
    pub const HOME: &str = "/~landscape/home";
    pub const APPS: &str = "/~landscape/apps";
    pub const MESSAGES: &str = "/~landscape/messages";
    pub const DM: &str = "/~landscape/messages/dm";
}
