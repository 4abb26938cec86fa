//! Unread aggregation over the association table.
//!
//! Pure functions of (associations, unread index, unseen set); nothing is
//! cached here, so callers may memoize per render but must rebuild the
//! aggregator whenever any input changes.

use crate::constants::{APPS_ENTRY, HOME_ENTRY};
use crate::models::{
    Associations, ChannelAssociation, ConversationKey, GroupFolder, NotificationKind,
    ResourcePath, UnreadIndex, UnseenSet,
};

#[derive(Debug, Clone, Copy)]
pub struct UnreadAggregator<'a> {
    associations: &'a Associations,
    unreads: &'a UnreadIndex,
    unseen: &'a UnseenSet,
}

/// Aggregate state of a folder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderSummary {
    pub unread_count: u64,
    pub has_notification: bool,
}

impl<'a> UnreadAggregator<'a> {
    pub fn new(
        associations: &'a Associations,
        unreads: &'a UnreadIndex,
        unseen: &'a UnseenSet,
    ) -> Self {
        Self {
            associations,
            unreads,
            unseen,
        }
    }

    pub fn channel_unread_count(&self, resource: &ResourcePath) -> u64 {
        self.unreads.total(&ConversationKey::Channel(resource.clone()))
    }

    pub fn dm_unread_count(&self, ship: &str) -> u64 {
        self.unreads.total(&ConversationKey::dm(ship))
    }

    pub fn channel_has_mention(&self, resource: &ResourcePath) -> bool {
        self.unseen
            .iter()
            .any(|n| n.kind == NotificationKind::Mention && n.channel() == Some(resource))
    }

    /// Unsynced channels (no metadata yet) contribute nothing.
    fn synced_total<'b>(&self, channels: impl Iterator<Item = &'b ChannelAssociation>) -> u64 {
        channels
            .filter(|c| c.metadata.is_some())
            .map(|c| self.channel_unread_count(&c.resource))
            .fold(0, u64::saturating_add)
    }

    /// Sum of unread totals over the channels of `group`
    pub fn unread_count_for_group(&self, group: &str) -> u64 {
        self.synced_total(self.associations.channels_in_group(group))
    }

    /// Sum over channels of hidden groups, which make up the home workspace
    pub fn unread_count_for_home(&self) -> u64 {
        self.synced_total(
            self.associations
                .channels
                .values()
                .filter(|c| self.associations.is_hidden_group(&c.group)),
        )
    }

    /// Sum over every DM conversation in the index
    pub fn unread_count_for_dms(&self) -> u64 {
        self.unreads
            .iter()
            .filter(|(key, _)| key.is_dm())
            .map(|(_, entry)| entry.total())
            .fold(0, u64::saturating_add)
    }

    /// Whether any unseen mention belongs to a channel of `group`
    pub fn has_notification(&self, group: &str) -> bool {
        self.unseen.iter().any(|n| {
            n.kind == NotificationKind::Mention
                && n.channel().and_then(|c| self.associations.group_of(c)) == Some(group)
        })
    }

    fn home_has_notification(&self) -> bool {
        self.unseen.iter().any(|n| {
            n.kind == NotificationKind::Mention
                && n.channel()
                    .and_then(|c| self.associations.group_of(c))
                    .map(|g| self.associations.is_hidden_group(g))
                    .unwrap_or(false)
        })
    }

    /// Unread count of an order entry id, resolving the synthetic rows
    pub fn unread_count_for_entry(&self, id: &str) -> u64 {
        match id {
            HOME_ENTRY => self.unread_count_for_home(),
            APPS_ENTRY => 0,
            group => self.unread_count_for_group(group),
        }
    }

    pub fn has_notification_for_entry(&self, id: &str) -> bool {
        match id {
            HOME_ENTRY => self.home_has_notification(),
            APPS_ENTRY => false,
            group => self.has_notification(group),
        }
    }

    pub fn folder_summary(&self, folder: &GroupFolder) -> FolderSummary {
        folder
            .groups
            .iter()
            .fold(FolderSummary::default(), |acc, group| FolderSummary {
                unread_count: acc
                    .unread_count
                    .saturating_add(self.unread_count_for_entry(group)),
                has_notification: acc.has_notification || self.has_notification_for_entry(group),
            })
    }
}
