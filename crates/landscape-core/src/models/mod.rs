pub mod association;
pub mod draft;
pub mod group_order;
pub mod membership;
pub mod resource;
pub mod unread;

pub use association::{
    Associations, ChannelAssociation, ChannelMetadata, ChannelModule, GroupAssociation,
};
pub use draft::{quote_reply, ChatReply, PostContent};
pub use group_order::{is_synthetic, Direction, GroupFolder, GroupOrder, OrderEntry, OrderError};
pub use membership::{JoinApp, JoinProgress, Membership, PendingJoin};
pub use resource::{
    ConversationKey, NotificationKey, NotificationKind, ResourceParseError, ResourcePath,
};
pub use unread::{UnreadEntry, UnreadIndex, UnseenSet};
