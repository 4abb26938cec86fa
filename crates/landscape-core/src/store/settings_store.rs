use super::blob_store::{BlobStore, StorageError};
use super::versioned::{load_versioned, save_versioned};
use crate::config::CoreConfig;
use crate::constants::{keys, GROUP_CONFIG_PREFIX, HOME_CONFIG, STORAGE_VERSION};
use crate::models::GroupOrder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

/// Comparator applied to channels inside a workspace listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortMode {
    /// Most recent activity first
    #[default]
    LastUpdated,
    /// Ascending by title, case-insensitive
    Alphabetical,
}

impl SortMode {
    /// Unknown or missing modes fall back to `LastUpdated`
    pub fn parse(s: &str) -> Self {
        match s {
            "alphabetical" => Self::Alphabetical,
            _ => Self::LastUpdated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastUpdated => "lastUpdated",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl From<String> for SortMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SortMode> for String {
    fn from(mode: SortMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Per-workspace listing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    #[serde(default)]
    pub sort_by: SortMode,
    /// Hide channels whose graph the ship has not joined
    #[serde(default)]
    pub hide_unjoined: bool,
}

/// Everything the sidebar persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarSettings {
    #[serde(default)]
    pub group_order: GroupOrder,
    #[serde(default)]
    pub show_only_unread: bool,
    /// Keyed by `group-config:<group path | home>`
    #[serde(default)]
    pub list_configs: HashMap<String, ListConfig>,
}

impl SidebarSettings {
    /// List config of a group workspace, or of home/messages when None
    pub fn list_config(&self, group: Option<&str>) -> ListConfig {
        self.list_configs
            .get(&list_config_key(group))
            .copied()
            .unwrap_or_default()
    }
}

/// Key of the list config for a group workspace, or home when None
pub fn list_config_key(group: Option<&str>) -> String {
    format!("{}{}", GROUP_CONFIG_PREFIX, group.unwrap_or(HOME_CONFIG))
}

/// Storage for sidebar settings (one versioned blob).
///
/// Every setter writes through before returning. A failed write rolls the
/// in-memory value back so memory and disk never disagree.
pub struct SettingsStore {
    storage: Rc<dyn BlobStore>,
    key: String,
    version: u32,
    settings: SidebarSettings,
}

impl SettingsStore {
    pub fn load(storage: Rc<dyn BlobStore>, config: &CoreConfig) -> Self {
        Self::load_with_version(storage, config, STORAGE_VERSION)
    }

    pub fn load_with_version(
        storage: Rc<dyn BlobStore>,
        config: &CoreConfig,
        version: u32,
    ) -> Self {
        let key = config.storage_key(keys::SIDEBAR_SETTINGS);
        let settings = load_versioned(storage.as_ref(), &key, version);
        Self {
            storage,
            key,
            version,
            settings,
        }
    }

    pub fn settings(&self) -> &SidebarSettings {
        &self.settings
    }

    pub fn group_order(&self) -> &GroupOrder {
        &self.settings.group_order
    }

    pub fn show_only_unread(&self) -> bool {
        self.settings.show_only_unread
    }

    pub fn list_config(&self, group: Option<&str>) -> ListConfig {
        self.settings.list_config(group)
    }

    // ===== Mutations =====

    pub fn set_group_order(&mut self, order: GroupOrder) -> Result<(), StorageError> {
        self.update(|s| s.group_order = order)
    }

    pub fn set_show_only_unread(&mut self, value: bool) -> Result<(), StorageError> {
        self.update(|s| s.show_only_unread = value)
    }

    pub fn set_list_config(
        &mut self,
        group: Option<&str>,
        config: ListConfig,
    ) -> Result<(), StorageError> {
        let key = list_config_key(group);
        self.update(|s| {
            s.list_configs.insert(key, config);
        })
    }

    fn update(&mut self, apply: impl FnOnce(&mut SidebarSettings)) -> Result<(), StorageError> {
        let previous = self.settings.clone();
        apply(&mut self.settings);

        if let Err(e) =
            save_versioned(self.storage.as_ref(), &self.key, self.version, &self.settings)
        {
            tracing::warn!("settings store {}: {}", self.key, e);
            // Rollback so the in-memory state matches what is on disk
            self.settings = previous;
            return Err(e);
        }
        Ok(())
    }
}
