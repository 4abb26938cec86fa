//! Channel listings inside a workspace row.

use super::materialize::SidebarSnapshot;
use crate::constants::routes;
use crate::models::{ChannelModule, ConversationKey, ResourcePath};
use crate::store::{ListConfig, SortMode};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// What a top-level sidebar row opens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Workspace {
    /// Channels of hidden (unmanaged) groups
    Home,
    Group(String),
    /// DMs plus pending DMs and group chats
    Messages,
}

impl Workspace {
    /// Group path used to look up the list config (None for home/messages)
    pub fn config_group(&self) -> Option<&str> {
        match self {
            Self::Group(id) => Some(id.as_str()),
            Self::Home | Self::Messages => None,
        }
    }

    pub fn route(&self) -> String {
        match self {
            Self::Home => routes::HOME.to_string(),
            Self::Group(id) => format!("{}{}", routes::ROOT, id),
            Self::Messages => routes::MESSAGES.to_string(),
        }
    }
}

/// One conversation listed under a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelItem {
    Channel(ResourcePath),
    /// Remote ship, without `~`
    Dm(String),
}

impl ChannelItem {
    pub fn conversation(&self) -> ConversationKey {
        match self {
            Self::Channel(path) => ConversationKey::Channel(path.clone()),
            Self::Dm(ship) => ConversationKey::dm(ship),
        }
    }
}

impl fmt::Display for ChannelItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(path) => path.fmt(f),
            Self::Dm(ship) => write!(f, "~{}", ship),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedChannel {
    pub item: ChannelItem,
    pub title: String,
    pub module: Option<ChannelModule>,
    /// Awaiting a join or DM acceptance
    pub pending: bool,
    /// Whether the ship has joined the underlying graph (always true for DMs)
    pub joined: bool,
    /// Last activity, from the unread index
    pub last: u64,
}

fn compare_titles(a: &ListedChannel, b: &ListedChannel) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.item.cmp(&b.item))
}

/// Comparator for a sort mode.
pub fn compare(mode: SortMode, a: &ListedChannel, b: &ListedChannel) -> Ordering {
    match mode {
        SortMode::LastUpdated => b
            .pending
            .cmp(&a.pending)
            .then_with(|| b.last.cmp(&a.last))
            .then_with(|| compare_titles(a, b)),
        SortMode::Alphabetical => compare_titles(a, b),
    }
}

/// Unsorted, unfiltered items of a workspace.
pub fn workspace_items(
    snapshot: &SidebarSnapshot<'_>,
    workspace: &Workspace,
) -> Vec<ListedChannel> {
    let membership = snapshot.membership;
    let listed = |resource: &ResourcePath, pending: bool| {
        let association = snapshot.associations.channel(resource);
        ListedChannel {
            item: ChannelItem::Channel(resource.clone()),
            title: association
                .map(|c| c.title())
                .unwrap_or_else(|| resource.to_string()),
            module: association.and_then(|c| c.metadata.as_ref()).map(|m| m.module),
            pending,
            joined: membership.joined_graphs.contains(&resource.to_string()),
            last: snapshot
                .unreads
                .last_updated(&ConversationKey::Channel(resource.clone())),
        }
    };

    match workspace {
        Workspace::Group(group) => snapshot
            .associations
            .channels_in_group(group)
            .map(|c| listed(&c.resource, false))
            .collect(),
        Workspace::Home => snapshot
            .associations
            .channels
            .values()
            .filter(|c| snapshot.associations.is_hidden_group(&c.group))
            .map(|c| listed(&c.resource, false))
            .collect(),
        Workspace::Messages => {
            let dms = membership
                .dm_inbox
                .iter()
                .map(|ship| (ship, false))
                .chain(
                    membership
                        .pending_dms
                        .iter()
                        .filter(|ship| !membership.dm_inbox.contains(*ship))
                        .map(|ship| (ship, true)),
                )
                .map(|(ship, pending)| ListedChannel {
                    item: ChannelItem::Dm(ship.clone()),
                    title: format!("~{}", ship),
                    module: Some(ChannelModule::Chat),
                    pending,
                    joined: true,
                    last: snapshot.unreads.last_updated(&ConversationKey::dm(ship)),
                });

            let chats = membership
                .pending_chats()
                .into_iter()
                .filter_map(|path| match ResourcePath::parse(&path) {
                    Ok(resource) => Some(listed(&resource, true)),
                    Err(e) => {
                        debug!("skipping pending chat: {}", e);
                        None
                    }
                })
                .collect::<Vec<_>>();

            dms.chain(chats).collect()
        }
    }
}

/// Items of a workspace, filtered and sorted according to its list config.
pub fn list_channels(
    snapshot: &SidebarSnapshot<'_>,
    workspace: &Workspace,
    config: ListConfig,
) -> Vec<ListedChannel> {
    let mut items: Vec<ListedChannel> = workspace_items(snapshot, workspace)
        .into_iter()
        .filter(|c| !config.hide_unjoined || c.joined || c.pending)
        .collect();
    items.sort_by(|a, b| compare(config.sort_by, a, b));
    items
}

/// Route that opens a listed item inside its workspace.
pub fn route_for(workspace: &Workspace, channel: &ListedChannel) -> String {
    match &channel.item {
        ChannelItem::Dm(ship) => format!("{}/~{}", routes::DM, ship),
        ChannelItem::Channel(_) if channel.pending => routes::MESSAGES.to_string(),
        ChannelItem::Channel(resource) => {
            let module = channel.module.unwrap_or(ChannelModule::Chat).as_str();
            let action = if channel.joined { "resource" } else { "join" };
            format!("{}/{}/{}{}", workspace.route(), action, module, resource)
        }
    }
}
