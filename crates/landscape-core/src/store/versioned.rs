//! Versioned blob envelope shared by every persisted store.
//!
//! Each store persists as `{"version": N, "data": ...}`. On load the blob is
//! discarded and the store starts from its empty default when:
//! - the blob is missing
//! - the blob does not parse as the expected schema
//! - `version` differs from the version the code expects
//!
//! Migration is whole-blob: there is no field-level upgrade path.

use super::blob_store::{BlobStore, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: Option<u32>,
}

/// Load `key`, falling back to `T::default()` on absence, corruption or a
/// version mismatch. Never fails.
pub fn load_versioned<T>(store: &dyn BlobStore, key: &str, expected_version: u32) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("versioned: {}, starting empty", e);
            return T::default();
        }
    };

    let version = serde_json::from_str::<VersionHeader>(&raw)
        .ok()
        .and_then(|p| p.version);
    if version != Some(expected_version) {
        tracing::info!(
            "versioned: {} version mismatch (stored={:?} current={}), discarding",
            key,
            version,
            expected_version
        );
        return T::default();
    }

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) => envelope.data,
        Err(e) => {
            tracing::warn!("versioned: {} is corrupt ({}), discarding", key, e);
            T::default()
        }
    }
}

/// Serialize `data` under the current version and write it through.
pub fn save_versioned<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    version: u32,
    data: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(&Envelope { version, data }).map_err(|source| {
        StorageError::Serialize {
            key: key.to_string(),
            source,
        }
    })?;
    store.put(key, &json)
}
