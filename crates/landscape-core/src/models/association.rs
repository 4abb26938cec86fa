use super::ResourcePath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Module a channel is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelModule {
    Chat,
    Publish,
    Link,
    Post,
}

impl ChannelModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Publish => "publish",
            Self::Link => "link",
            Self::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    pub title: String,
    pub module: ChannelModule,
}

/// Association binding a channel to its parent group.
/// `metadata` is None until the metadata store has synced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAssociation {
    pub resource: ResourcePath,
    pub group: String,
    pub metadata: Option<ChannelMetadata>,
}

impl ChannelAssociation {
    /// Display title, falling back to the bare resource path
    pub fn title(&self) -> String {
        match &self.metadata {
            Some(m) if !m.title.is_empty() => m.title.clone(),
            _ => self.resource.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAssociation {
    pub group: String,
    pub title: String,
    /// Hidden (unmanaged) groups back the home workspace instead of getting their own row
    #[serde(default)]
    pub hidden: bool,
    /// Invite-only groups render locked
    #[serde(default)]
    pub invite_only: bool,
}

/// Association table: group and channel metadata pushed by the platform.
#[derive(Debug, Clone, Default)]
pub struct Associations {
    pub groups: HashMap<String, GroupAssociation>,
    pub channels: HashMap<ResourcePath, ChannelAssociation>,
}

impl Associations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, id: &str) -> Option<&GroupAssociation> {
        self.groups.get(id)
    }

    pub fn channel(&self, resource: &ResourcePath) -> Option<&ChannelAssociation> {
        self.channels.get(resource)
    }

    /// Parent group of a channel, if the association is known
    pub fn group_of(&self, resource: &ResourcePath) -> Option<&str> {
        self.channels.get(resource).map(|c| c.group.as_str())
    }

    pub fn channels_in_group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a ChannelAssociation> + 'a {
        self.channels.values().filter(move |c| c.group == group)
    }

    pub fn is_hidden_group(&self, group: &str) -> bool {
        self.groups.get(group).map(|g| g.hidden).unwrap_or(false)
    }

    // ===== Mutations =====

    pub fn upsert_group(&mut self, association: GroupAssociation) {
        self.groups.insert(association.group.clone(), association);
    }

    pub fn upsert_channel(&mut self, association: ChannelAssociation) {
        self.channels.insert(association.resource.clone(), association);
    }

    /// Drop a group and every channel associated with it
    pub fn remove_group(&mut self, group: &str) {
        self.groups.remove(group);
        self.channels.retain(|_, c| c.group != group);
    }

    pub fn remove_channel(&mut self, resource: &ResourcePath) {
        self.channels.remove(resource);
    }
}
