//! Per-conversation ephemeral composer state: unsent message text and
//! pending reply targets.
//!
//! Both stores keep one slot per conversation id plus a "current" copy of the
//! active conversation's slot, so the composer reads its value without a map
//! lookup per keystroke. Only the map is persisted; the active slot is
//! rebuilt by `switch_active` after every load.

use super::blob_store::{BlobStore, StorageError};
use super::versioned::{load_versioned, save_versioned};
use crate::config::CoreConfig;
use crate::constants::{keys, STORAGE_VERSION};
use crate::models::ChatReply;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;

/// Slot map persisted as one versioned blob. Empty values are not stored.
pub struct ConversationSlots<T> {
    storage: Rc<dyn BlobStore>,
    key: String,
    version: u32,
    active_id: String,
    current: T,
    slots: HashMap<String, T>,
    /// Last persistence error (for surfacing to UI)
    last_error: Option<StorageError>,
}

impl<T> ConversationSlots<T>
where
    T: Clone + Default + PartialEq + Serialize + DeserializeOwned,
{
    pub fn load(storage: Rc<dyn BlobStore>, key: String, version: u32) -> Self {
        let slots: HashMap<String, T> = load_versioned(storage.as_ref(), &key, version);
        Self {
            storage,
            key,
            version,
            active_id: String::new(),
            current: T::default(),
            slots,
            last_error: None,
        }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn get(&self, id: &str) -> T {
        self.slots.get(id).cloned().unwrap_or_default()
    }

    /// Make `id` the active conversation and return its slot
    pub fn switch_active(&mut self, id: &str) -> &T {
        self.active_id = id.to_string();
        self.current = self.get(id);
        &self.current
    }

    /// Overwrite the slot for `id`; an empty value removes it.
    pub fn set(&mut self, id: &str, value: T) {
        if id == self.active_id {
            self.current = value.clone();
        }
        if value == T::default() {
            self.slots.remove(id);
        } else {
            self.slots.insert(id.to_string(), value);
        }
        self.persist();
    }

    pub fn set_current(&mut self, value: T) {
        let id = self.active_id.clone();
        self.set(&id, value);
    }

    pub fn clear(&mut self, id: &str) {
        self.set(id, T::default());
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    fn persist(&mut self) {
        match save_versioned(self.storage.as_ref(), &self.key, self.version, &self.slots) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                tracing::warn!("draft store {}: {}", self.key, e);
                self.last_error = Some(e);
            }
        }
    }
}

/// Unsent message text per conversation.
pub struct DraftStore {
    slots: ConversationSlots<String>,
}

impl DraftStore {
    pub fn load(storage: Rc<dyn BlobStore>, config: &CoreConfig) -> Self {
        Self::load_with_version(storage, config, STORAGE_VERSION)
    }

    pub fn load_with_version(
        storage: Rc<dyn BlobStore>,
        config: &CoreConfig,
        version: u32,
    ) -> Self {
        Self {
            slots: ConversationSlots::load(storage, config.storage_key(keys::CHAT_UNSENT), version),
        }
    }

    /// Draft for a conversation, `""` if none recorded
    pub fn get_draft(&self, conversation_id: &str) -> String {
        self.slots.get(conversation_id)
    }

    pub fn set_draft(&mut self, conversation_id: &str, text: &str) {
        self.slots.set(conversation_id, text.to_string());
    }

    /// Overwrite the active conversation's draft (the per-keystroke path)
    pub fn set_message(&mut self, text: &str) {
        self.slots.set_current(text.to_string());
    }

    pub fn message(&self) -> &str {
        self.slots.current()
    }

    pub fn switch_active(&mut self, conversation_id: &str) -> &str {
        self.slots.switch_active(conversation_id)
    }

    /// Drop the draft after a successful send
    pub fn clear_draft(&mut self, conversation_id: &str) {
        self.slots.clear(conversation_id);
    }

    pub fn active_id(&self) -> &str {
        self.slots.active_id()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.slots.last_error()
    }
}

/// Pending reply target per conversation.
pub struct ReplyStore {
    slots: ConversationSlots<ChatReply>,
}

impl ReplyStore {
    pub fn load(storage: Rc<dyn BlobStore>, config: &CoreConfig) -> Self {
        Self {
            slots: ConversationSlots::load(
                storage,
                config.storage_key(keys::REPLY_UNSENT),
                STORAGE_VERSION,
            ),
        }
    }

    pub fn get_reply(&self, conversation_id: &str) -> ChatReply {
        self.slots.get(conversation_id)
    }

    /// Set the active conversation's reply; None clears it.
    pub fn set_reply(&mut self, reply: Option<ChatReply>) {
        self.slots.set_current(reply.unwrap_or_default());
    }

    pub fn reply(&self) -> &ChatReply {
        self.slots.current()
    }

    pub fn switch_active(&mut self, conversation_id: &str) -> &ChatReply {
        self.slots.switch_active(conversation_id)
    }

    pub fn clear_reply(&mut self, conversation_id: &str) {
        self.slots.clear(conversation_id);
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.slots.last_error()
    }
}
