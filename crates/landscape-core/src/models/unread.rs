use super::{ConversationKey, NotificationKey};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Unread state of one conversation, as maintained by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadEntry {
    pub count: u64,
    /// Un-acknowledged items that are tracked individually (thread replies, comments)
    #[serde(default)]
    pub last_items: Vec<String>,
    /// Timestamp (ms) of the last activity, drives the last-update sort
    #[serde(default)]
    pub last: u64,
}

impl UnreadEntry {
    pub fn total(&self) -> u64 {
        self.count.saturating_add(self.last_items.len() as u64)
    }
}

/// Sparse unread index: conversations without an entry have nothing unread.
#[derive(Debug, Clone, Default)]
pub struct UnreadIndex {
    entries: HashMap<ConversationKey, UnreadEntry>,
}

impl UnreadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ConversationKey) -> Option<&UnreadEntry> {
        self.entries.get(key)
    }

    /// Unread total for a conversation, 0 when absent
    pub fn total(&self, key: &ConversationKey) -> u64 {
        self.entries.get(key).map(UnreadEntry::total).unwrap_or(0)
    }

    pub fn last_updated(&self, key: &ConversationKey) -> u64 {
        self.entries.get(key).map(|e| e.last).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConversationKey, &UnreadEntry)> {
        self.entries.iter()
    }

    // ===== Mutations =====

    pub fn set(&mut self, key: ConversationKey, entry: UnreadEntry) {
        self.entries.insert(key, entry);
    }

    /// Apply a count delta; the count saturates at zero.
    pub fn apply_delta(&mut self, key: ConversationKey, delta: i64, last: Option<u64>) {
        let entry = self.entries.entry(key).or_default();
        entry.count = if delta >= 0 {
            entry.count.saturating_add(delta as u64)
        } else {
            entry.count.saturating_sub(delta.unsigned_abs())
        };
        if let Some(last) = last {
            entry.last = entry.last.max(last);
        }
    }

    /// Mark a conversation read, keeping its last-activity timestamp
    pub fn clear(&mut self, key: &ConversationKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.count = 0;
            entry.last_items.clear();
        }
    }
}

/// Unseen notification buckets (mentions and messages).
pub type UnseenSet = HashSet<NotificationKey>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_counts_items() {
        let entry = UnreadEntry {
            count: 2,
            last_items: vec!["x".to_string()],
            last: 0,
        };
        assert_eq!(entry.total(), 3);
    }

    #[test]
    fn test_total_saturates() {
        let entry = UnreadEntry {
            count: u64::MAX,
            last_items: vec!["x".to_string()],
            last: 0,
        };
        assert_eq!(entry.total(), u64::MAX);
    }

    #[test]
    fn test_delta_saturates() {
        let mut index = UnreadIndex::new();
        let key = ConversationKey::dm("nec");

        index.apply_delta(key.clone(), 3, Some(10));
        index.apply_delta(key.clone(), -5, Some(4));

        assert_eq!(index.total(&key), 0);
        assert_eq!(index.last_updated(&key), 10);
    }

    #[test]
    fn test_clear_keeps_timestamp() {
        let mut index = UnreadIndex::new();
        let key = ConversationKey::dm("nec");
        index.set(
            key.clone(),
            UnreadEntry {
                count: 4,
                last_items: vec!["a".to_string()],
                last: 99,
            },
        );

        index.clear(&key);

        assert_eq!(index.total(&key), 0);
        assert_eq!(index.last_updated(&key), 99);
        assert_eq!(index.total(&ConversationKey::dm("zod")), 0);
    }
}
