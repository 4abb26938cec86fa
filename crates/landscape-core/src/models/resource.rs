//! Structured conversation keys.
//!
//! The platform pushes keys as strings (`/ship/~zod/chat`, `/graph/~zod/chat`,
//! `landscape/graph/~zod/chat/mention`). They are parsed once at the boundary
//! into these types; everything past the boundary compares fields, not strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceParseError {
    #[error("resource path must look like /ship/~host/name, got {0:?}")]
    MalformedPath(String),
    #[error("ship name must start with '~', got {0:?}")]
    MissingSig(String),
    #[error("unknown notification key {0:?}")]
    UnknownNotification(String),
}

/// A channel (graph) resource: host ship plus resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourcePath {
    /// Host ship, without the leading `~`
    pub ship: String,
    pub name: String,
}

impl ResourcePath {
    pub fn new(ship: &str, name: &str) -> Self {
        Self {
            ship: ship.trim_start_matches('~').to_string(),
            name: name.to_string(),
        }
    }

    /// Parse `/ship/~host/name` or the graph-store spelling `/graph/~host/name`.
    pub fn parse(path: &str) -> Result<Self, ResourceParseError> {
        let mut parts = path.trim_start_matches('/').splitn(3, '/');
        let prefix = parts.next().unwrap_or_default();
        let ship = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();

        if !matches!(prefix, "ship" | "graph") || name.is_empty() || name.contains('/') {
            return Err(ResourceParseError::MalformedPath(path.to_string()));
        }
        let ship = ship
            .strip_prefix('~')
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ResourceParseError::MissingSig(ship.to_string()))?;

        Ok(Self::new(ship, name))
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/ship/~{}/{}", self.ship, self.name)
    }
}

/// Anything that can carry unread state: a group-backed channel or a DM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConversationKey {
    Channel(ResourcePath),
    /// DM keyed by the remote party, without the leading `~`
    Dm(String),
}

impl ConversationKey {
    pub fn dm(ship: &str) -> Self {
        Self::Dm(ship.trim_start_matches('~').to_string())
    }

    /// Parse a channel path or a `~ship` DM identifier.
    pub fn parse(key: &str) -> Result<Self, ResourceParseError> {
        match key.strip_prefix('~') {
            Some(ship) if !ship.is_empty() && !ship.contains('/') => Ok(Self::dm(ship)),
            Some(_) => Err(ResourceParseError::MalformedPath(key.to_string())),
            None => ResourcePath::parse(key).map(Self::Channel),
        }
    }

    pub fn is_dm(&self) -> bool {
        matches!(self, Self::Dm(_))
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(path) => path.fmt(f),
            Self::Dm(ship) => write!(f, "~{}", ship),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Mention,
    Message,
}

/// An unseen notification bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationKey {
    pub conversation: ConversationKey,
    pub kind: NotificationKind,
}

impl NotificationKey {
    pub fn mention(channel: ResourcePath) -> Self {
        Self {
            conversation: ConversationKey::Channel(channel),
            kind: NotificationKind::Mention,
        }
    }

    /// Parse the hark spelling `landscape/graph/~host/name/mention`.
    pub fn parse_legacy(key: &str) -> Result<Self, ResourceParseError> {
        let rest = key
            .trim_start_matches('/')
            .strip_prefix("landscape")
            .ok_or_else(|| ResourceParseError::UnknownNotification(key.to_string()))?;

        let (path, kind) = if let Some(path) = rest.strip_suffix("/mention") {
            (path, NotificationKind::Mention)
        } else if let Some(path) = rest.strip_suffix("/message") {
            (path, NotificationKind::Message)
        } else {
            return Err(ResourceParseError::UnknownNotification(key.to_string()));
        };

        Ok(Self {
            conversation: ConversationKey::Channel(ResourcePath::parse(path)?),
            kind,
        })
    }

    pub fn channel(&self) -> Option<&ResourcePath> {
        match &self.conversation {
            ConversationKey::Channel(path) => Some(path),
            ConversationKey::Dm(_) => None,
        }
    }
}
