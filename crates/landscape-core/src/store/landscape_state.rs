use crate::events::PlatformUpdate;
use crate::models::{Associations, JoinApp, Membership, UnreadIndex, UnseenSet};
use crate::sidebar::{SidebarSnapshot, UnreadAggregator};
use tracing::{debug, warn};

/// Snapshot of everything the platform has pushed so far.
///
/// Constructed once at startup and handed to whatever needs it; mutated only
/// through `apply`, so every reader between two updates sees the same state.
#[derive(Debug, Clone, Default)]
pub struct LandscapeState {
    pub associations: Associations,
    pub membership: Membership,
    pub unreads: UnreadIndex,
    pub unseen: UnseenSet,
}

impl LandscapeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: PlatformUpdate) {
        debug!("applying platform update: {:?}", update);
        match update {
            PlatformUpdate::GroupAssociation(group) => self.associations.upsert_group(group),
            PlatformUpdate::GroupAssociationRemoved(group) => {
                self.associations.remove_group(&group)
            }
            PlatformUpdate::ChannelAssociation(channel) => {
                self.associations.upsert_channel(channel)
            }
            PlatformUpdate::ChannelAssociationRemoved(resource) => {
                self.associations.remove_channel(&resource)
            }

            PlatformUpdate::UnreadSet { key, entry } => self.unreads.set(key, entry),
            PlatformUpdate::UnreadDelta { key, delta, last } => {
                self.unreads.apply_delta(key, delta, last)
            }
            PlatformUpdate::UnreadCleared(key) => {
                self.unreads.clear(&key);
                self.unseen.retain(|n| n.conversation != key);
            }
            PlatformUpdate::UnseenAdded(key) => {
                self.unseen.insert(key);
            }
            PlatformUpdate::UnseenRemoved(key) => {
                self.unseen.remove(&key);
            }

            PlatformUpdate::GroupJoined(group) => {
                self.membership.pending_joins.remove(&group);
                self.membership.add_joined_group(&group);
            }
            PlatformUpdate::GroupLeft(group) => self.membership.remove_joined_group(&group),
            PlatformUpdate::JoinProgress { id, app, progress } => {
                self.membership.apply_join_progress(&id, app, progress)
            }
            PlatformUpdate::InviteReceived { id, app } => {
                match app {
                    JoinApp::Groups => self.membership.invites.insert(id),
                    JoinApp::Graph => self.membership.chat_invites.insert(id),
                };
            }
            PlatformUpdate::InviteRemoved { id, app } => {
                match app {
                    JoinApp::Groups => self.membership.invites.remove(&id),
                    JoinApp::Graph => self.membership.chat_invites.remove(&id),
                };
            }

            PlatformUpdate::DmInbox(ships) => {
                self.membership.dm_inbox = ships
                    .iter()
                    .map(|s| s.trim_start_matches('~').to_string())
                    .collect();
            }
            PlatformUpdate::DmRequested(ship) => {
                let ship = ship.trim_start_matches('~').to_string();
                if !self.membership.dm_inbox.contains(&ship) {
                    self.membership.pending_dms.insert(ship);
                }
            }
            PlatformUpdate::DmAccepted(ship) => self.membership.accept_dm(&ship),
            PlatformUpdate::DmDeclined(ship) => {
                self.membership.pending_dms.remove(ship.trim_start_matches('~'));
            }
            PlatformUpdate::GraphJoined(resource) => {
                self.membership.chat_invites.remove(&resource);
                self.membership.joined_graphs.insert(resource);
            }
            PlatformUpdate::GraphLeft(resource) => {
                self.membership.joined_graphs.remove(&resource);
            }
        }
    }

    /// Add an unseen notification given in the hark key spelling.
    /// Keys that do not parse are logged and skipped.
    pub fn apply_legacy_unseen(&mut self, key: &str) {
        match PlatformUpdate::unseen_from_legacy(key) {
            Ok(update) => self.apply(update),
            Err(e) => warn!("skipping unseen notification: {}", e),
        }
    }

    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = PlatformUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    pub fn snapshot(&self) -> SidebarSnapshot<'_> {
        SidebarSnapshot {
            associations: &self.associations,
            membership: &self.membership,
            unreads: &self.unreads,
            unseen: &self.unseen,
        }
    }

    pub fn aggregator(&self) -> UnreadAggregator<'_> {
        UnreadAggregator::new(&self.associations, &self.unreads, &self.unseen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ChannelAssociation, ConversationKey, GroupAssociation, JoinProgress, NotificationKey,
        ResourcePath, UnreadEntry,
    };

    fn group(id: &str) -> GroupAssociation {
        GroupAssociation {
            group: id.to_string(),
            title: id.to_string(),
            hidden: false,
            invite_only: false,
        }
    }

    #[test]
    fn test_join_flow_never_pending_and_joined() {
        let mut state = LandscapeState::new();
        let id = "/ship/~zod/g".to_string();

        state.apply(PlatformUpdate::InviteReceived {
            id: id.clone(),
            app: JoinApp::Groups,
        });
        state.apply(PlatformUpdate::JoinProgress {
            id: id.clone(),
            app: JoinApp::Groups,
            progress: JoinProgress::Started,
        });
        assert_eq!(state.membership.pending_groups(), vec![id.clone()]);
        assert!(!state.membership.is_joined(&id));

        state.apply(PlatformUpdate::JoinProgress {
            id: id.clone(),
            app: JoinApp::Groups,
            progress: JoinProgress::Done,
        });
        assert!(state.membership.pending_groups().is_empty());
        assert!(state.membership.is_joined(&id));
    }

    #[test]
    fn test_unread_cleared_drops_mentions() {
        let mut state = LandscapeState::new();
        let chat = ResourcePath::new("zod", "chat");
        let key = ConversationKey::Channel(chat.clone());

        state.apply_all([
            PlatformUpdate::GroupAssociation(group("/ship/~zod/g")),
            PlatformUpdate::ChannelAssociation(ChannelAssociation {
                resource: chat.clone(),
                group: "/ship/~zod/g".to_string(),
                metadata: None,
            }),
            PlatformUpdate::UnreadSet {
                key: key.clone(),
                entry: UnreadEntry {
                    count: 2,
                    last_items: vec![],
                    last: 5,
                },
            },
            PlatformUpdate::UnseenAdded(NotificationKey::mention(chat)),
        ]);
        assert!(state.aggregator().has_notification("/ship/~zod/g"));

        state.apply(PlatformUpdate::UnreadCleared(key.clone()));

        assert_eq!(state.unreads.total(&key), 0);
        assert!(!state.aggregator().has_notification("/ship/~zod/g"));
    }

    #[test]
    fn test_dm_request_and_accept() {
        let mut state = LandscapeState::new();
        state.apply(PlatformUpdate::DmInbox(vec!["~nec".to_string()]));
        state.apply(PlatformUpdate::DmRequested("~nec".to_string()));
        assert!(state.membership.pending_dms.is_empty());

        state.apply(PlatformUpdate::DmRequested("~bus".to_string()));
        assert!(state.membership.pending_dms.contains("bus"));

        state.apply(PlatformUpdate::DmAccepted("~bus".to_string()));
        assert!(state.membership.dm_inbox.contains("bus"));
        assert!(state.membership.pending_dms.is_empty());
    }

    #[test]
    fn test_unseen_from_legacy_key() {
        let update =
            PlatformUpdate::unseen_from_legacy("landscape/graph/~zod/chat/mention").unwrap();
        assert_eq!(
            update,
            PlatformUpdate::UnseenAdded(NotificationKey::mention(ResourcePath::new("zod", "chat")))
        );
        assert!(PlatformUpdate::unseen_from_legacy("garbage").is_err());

        let mut state = LandscapeState::new();
        state.apply_legacy_unseen("garbage");
        state.apply_legacy_unseen("landscape/graph/~zod/chat/mention");
        assert_eq!(state.unseen.len(), 1);
    }
}
