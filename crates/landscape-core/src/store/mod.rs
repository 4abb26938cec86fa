pub mod blob_store;
pub mod draft_store;
pub mod landscape_state;
pub mod settings_store;
pub mod versioned;

pub use blob_store::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError};
pub use draft_store::{ConversationSlots, DraftStore, ReplyStore};
pub use landscape_state::LandscapeState;
pub use settings_store::{list_config_key, ListConfig, SettingsStore, SidebarSettings, SortMode};
pub use versioned::{load_versioned, save_versioned};
