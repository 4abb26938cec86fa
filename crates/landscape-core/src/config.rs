use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Core configuration: where durable blobs live and whose they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub data_dir: PathBuf,

    /// Ship name (without `~`) used to namespace storage keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship: Option<String>,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ship: None,
        }
    }

    pub fn with_ship(mut self, ship: &str) -> Self {
        self.ship = Some(ship.trim_start_matches('~').to_string());
        self
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CoreConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Namespace a store name by ship, e.g. `~zod/chat-unsent`.
    pub fn storage_key(&self, name: &str) -> String {
        match &self.ship {
            Some(ship) => format!("~{}/{}", ship, name),
            None => name.to_string(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join("landscape"))
            .unwrap_or_else(|| PathBuf::from("landscape_data"));
        Self::new(data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_storage_key_namespacing() {
        let config = CoreConfig::new("/tmp/x");
        assert_eq!(config.storage_key("chat-unsent"), "chat-unsent");

        let config = config.with_ship("~zod");
        assert_eq!(config.storage_key("chat-unsent"), "~zod/chat-unsent");
    }

    #[test]
    fn test_load_camel_case_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"dataDir": "/var/landscape", "ship": "nec"}"#).unwrap();

        let config = CoreConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/landscape"));
        assert_eq!(config.ship.as_deref(), Some("nec"));
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempdir().unwrap();
        let err = CoreConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
