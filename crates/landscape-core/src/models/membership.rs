use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Progress of a join request, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinProgress {
    Requested,
    Started,
    Done,
    Abort,
}

impl JoinProgress {
    /// Still waiting on the host
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Requested | Self::Started)
    }
}

/// Which agent a pending join belongs to: a group, or a bare group chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinApp {
    Groups,
    Graph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingJoin {
    pub app: JoinApp,
    pub progress: JoinProgress,
}

/// Membership state of the local ship.
///
/// `joined_groups` keeps discovery order so newly joined groups land at the
/// end of the sidebar order in the order they were seen.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    joined_groups: Vec<String>,
    pub pending_joins: HashMap<String, PendingJoin>,
    /// Group invites, keyed by group id
    pub invites: HashSet<String>,
    /// Group-chat invites (graph app), keyed by resource path
    pub chat_invites: HashSet<String>,
    /// Ships with an active DM
    pub dm_inbox: HashSet<String>,
    /// Ships whose DM request awaits acceptance
    pub pending_dms: HashSet<String>,
    /// Graphs (channels) the ship has joined, keyed by resource path
    pub joined_graphs: HashSet<String>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Getters =====

    pub fn joined_groups(&self) -> &[String] {
        &self.joined_groups
    }

    pub fn is_joined(&self, group: &str) -> bool {
        self.joined_groups.iter().any(|g| g == group)
    }

    /// Group ids awaiting a join: invites plus non-aborted group joins,
    /// minus anything already joined. Sorted for stable rendering.
    pub fn pending_groups(&self) -> Vec<String> {
        let mut pending: Vec<String> = self
            .invites
            .iter()
            .chain(
                self.pending_joins
                    .iter()
                    .filter(|(_, p)| p.app == JoinApp::Groups && p.progress != JoinProgress::Abort)
                    .map(|(id, _)| id),
            )
            .filter(|id| !self.is_joined(id))
            .cloned()
            .collect();
        pending.sort();
        pending.dedup();
        pending
    }

    /// Group chats awaiting a join (graph app joins and chat invites)
    pub fn pending_chats(&self) -> Vec<String> {
        let mut pending: Vec<String> = self
            .chat_invites
            .iter()
            .chain(
                self.pending_joins
                    .iter()
                    .filter(|(_, p)| p.app == JoinApp::Graph && p.progress != JoinProgress::Abort)
                    .map(|(id, _)| id),
            )
            .filter(|id| !self.joined_graphs.contains(*id))
            .cloned()
            .collect();
        pending.sort();
        pending.dedup();
        pending
    }

    pub fn join_progress(&self, id: &str) -> Option<JoinProgress> {
        self.pending_joins.get(id).map(|p| p.progress)
    }

    // ===== Mutations =====

    pub fn add_joined_group(&mut self, group: &str) {
        if !self.is_joined(group) {
            self.joined_groups.push(group.to_string());
        }
        self.invites.remove(group);
    }

    pub fn remove_joined_group(&mut self, group: &str) {
        self.joined_groups.retain(|g| g != group);
    }

    /// Apply a join-progress transition. `Done` moves the id from pending to
    /// joined within this one call, so no snapshot ever shows it as both.
    pub fn apply_join_progress(&mut self, id: &str, app: JoinApp, progress: JoinProgress) {
        match progress {
            JoinProgress::Requested | JoinProgress::Started => {
                self.pending_joins
                    .insert(id.to_string(), PendingJoin { app, progress });
            }
            JoinProgress::Done => {
                self.pending_joins.remove(id);
                match app {
                    JoinApp::Groups => self.add_joined_group(id),
                    JoinApp::Graph => {
                        self.chat_invites.remove(id);
                        self.joined_graphs.insert(id.to_string());
                    }
                }
            }
            JoinProgress::Abort => {
                self.pending_joins.remove(id);
            }
        }
    }

    /// Accept a pending DM request
    pub fn accept_dm(&mut self, ship: &str) {
        let ship = ship.trim_start_matches('~');
        self.pending_dms.remove(ship);
        self.dm_inbox.insert(ship.to_string());
    }
}
