use crate::models::{
    ChannelAssociation, ConversationKey, GroupAssociation, JoinApp, JoinProgress, NotificationKey,
    ResourceParseError, ResourcePath, UnreadEntry,
};

/// Inbound update pushed by the platform. Applied to `LandscapeState` one at
/// a time; each application is a single synchronous turn.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformUpdate {
    GroupAssociation(GroupAssociation),
    /// Group metadata removed, along with its channels
    GroupAssociationRemoved(String),
    ChannelAssociation(ChannelAssociation),
    ChannelAssociationRemoved(ResourcePath),

    UnreadSet {
        key: ConversationKey,
        entry: UnreadEntry,
    },
    UnreadDelta {
        key: ConversationKey,
        delta: i64,
        last: Option<u64>,
    },
    /// Conversation acknowledged (read) elsewhere
    UnreadCleared(ConversationKey),
    UnseenAdded(NotificationKey),
    UnseenRemoved(NotificationKey),

    GroupJoined(String),
    GroupLeft(String),
    JoinProgress {
        id: String,
        app: JoinApp,
        progress: JoinProgress,
    },
    InviteReceived {
        id: String,
        app: JoinApp,
    },
    InviteRemoved {
        id: String,
        app: JoinApp,
    },

    /// Full DM inbox replacement (ships without `~`)
    DmInbox(Vec<String>),
    DmRequested(String),
    DmAccepted(String),
    DmDeclined(String),
    GraphJoined(String),
    GraphLeft(String),
}

impl PlatformUpdate {
    /// Build an `UnseenAdded` from the hark key spelling
    pub fn unseen_from_legacy(key: &str) -> Result<Self, ResourceParseError> {
        NotificationKey::parse_legacy(key).map(Self::UnseenAdded)
    }
}

/// Outbound poke-style request, handled by the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate the client to a route
    Navigate(String),
    /// Acknowledge every unread item of a conversation
    MarkRead(ConversationKey),
}

/// Opaque capability for issuing commands to the platform.
pub trait CommandDispatcher {
    fn dispatch(&self, command: Command);
}
