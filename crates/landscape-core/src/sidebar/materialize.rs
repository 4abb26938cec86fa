//! List Materialization: membership, order and unread state combined into
//! the render-ready sidebar.
//!
//! Everything here is a pure function of its inputs. Ids that cannot be
//! resolved (left groups, groups without metadata) are skipped at render
//! time only; the stored order is never modified from here.

use super::channels::{list_channels, ChannelItem, ListedChannel, Workspace};
use super::drag::DragLocation;
use super::expansion::SidebarExpansions;
use super::unread::{FolderSummary, UnreadAggregator};
use crate::constants::{APPS_ENTRY, HOME_ENTRY, MESSAGES_TITLE};
use crate::models::{
    Associations, GroupAssociation, GroupFolder, GroupOrder, Membership, OrderEntry, UnreadIndex,
    UnseenSet,
};
use crate::store::SidebarSettings;

/// Borrowed view of the pushed platform data for one materialization pass.
#[derive(Debug, Clone, Copy)]
pub struct SidebarSnapshot<'a> {
    pub associations: &'a Associations,
    pub membership: &'a Membership,
    pub unreads: &'a UnreadIndex,
    pub unseen: &'a UnseenSet,
}

impl<'a> SidebarSnapshot<'a> {
    pub fn aggregator(&self) -> UnreadAggregator<'a> {
        UnreadAggregator::new(self.associations, self.unreads, self.unseen)
    }

    /// A group gets its own row only while joined, known and not hidden
    pub fn resolve_group(&self, id: &str) -> Option<&'a GroupAssociation> {
        self.associations
            .group(id)
            .filter(|g| !g.hidden && self.membership.is_joined(id))
    }

    /// Joined groups by title (case-insensitive), ties broken by id
    pub fn joined_groups_alphabetical(&self) -> Vec<&'a GroupAssociation> {
        let mut groups: Vec<&GroupAssociation> = self
            .membership
            .joined_groups()
            .iter()
            .filter_map(|id| self.resolve_group(id))
            .collect();
        groups.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.group.cmp(&b.group))
        });
        groups
    }

    /// First-run order: home, then joined groups alphabetically
    pub fn default_order(&self) -> GroupOrder {
        let groups: Vec<String> = self
            .joined_groups_alphabetical()
            .into_iter()
            .map(|g| g.group.clone())
            .collect();
        GroupOrder::seeded(&groups)
    }

    fn entry_title(&self, id: &str) -> Option<String> {
        match id {
            HOME_ENTRY | APPS_ENTRY => Some(id.to_string()),
            _ => self.associations.group(id).map(group_title),
        }
    }
}

fn group_title(group: &GroupAssociation) -> String {
    if group.title.is_empty() {
        group.group.clone()
    } else {
        group.title.clone()
    }
}

/// Per-pass rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions<'a> {
    pub selected_workspace: Option<&'a Workspace>,
    pub selected_channel: Option<&'a ChannelItem>,
    /// The initial loading timeout has elapsed
    pub loading_timed_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRow {
    pub channel: ListedChannel,
    pub unread_count: u64,
    pub has_notification: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRow {
    pub workspace: Workspace,
    pub title: String,
    pub unread_count: u64,
    pub has_notification: bool,
    /// The workspace or one of its channels is selected
    pub selected: bool,
    /// Invite-only group
    pub locked: bool,
    pub expanded: bool,
    pub channels: Vec<ChannelRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub name: String,
    /// Stored flag
    pub collapsed: bool,
    /// Open on screen: not collapsed, or holding the selection
    pub expanded: bool,
    pub summary: FolderSummary,
    pub contains_selection: bool,
    pub rows: Vec<SidebarRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub id: String,
    pub title: String,
    /// A join is requested or running
    pub joining: bool,
    /// Invite nobody has acted on yet
    pub has_notification: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Workspace(WorkspaceRow),
    Apps,
    Folder(FolderRow),
    Pending(PendingRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    /// Nothing joined yet and the loading timeout is still running
    Loading,
    Ready(Vec<SidebarRow>),
}

impl SidebarView {
    pub fn rows(&self) -> &[SidebarRow] {
        match self {
            Self::Loading => &[],
            Self::Ready(rows) => rows,
        }
    }
}

struct Materializer<'s, 'a> {
    snapshot: &'s SidebarSnapshot<'a>,
    settings: &'s SidebarSettings,
    options: &'s ListOptions<'s>,
    expansions: &'s SidebarExpansions,
    aggregator: UnreadAggregator<'a>,
}

impl<'s, 'a> Materializer<'s, 'a> {
    fn only_unread(&self) -> bool {
        self.settings.show_only_unread
    }

    fn visible(&self, row: &WorkspaceRow) -> bool {
        !self.only_unread() || row.unread_count > 0 || row.selected
    }

    fn workspace_row(&self, workspace: Workspace, title: String, locked: bool) -> WorkspaceRow {
        let config = self.settings.list_config(workspace.config_group());
        let mut channels: Vec<ChannelRow> = list_channels(self.snapshot, &workspace, config)
            .into_iter()
            .map(|channel| {
                let unread_count = self.snapshot.unreads.total(&channel.item.conversation());
                let has_notification = match &channel.item {
                    ChannelItem::Channel(resource) => self.aggregator.channel_has_mention(resource),
                    ChannelItem::Dm(_) => false,
                };
                let selected = self.options.selected_channel == Some(&channel.item);
                ChannelRow {
                    channel,
                    unread_count,
                    has_notification,
                    selected,
                }
            })
            .collect();

        let selected = self.options.selected_workspace == Some(&workspace)
            || channels.iter().any(|c| c.selected);
        if self.only_unread() {
            channels.retain(|c| c.unread_count > 0 || c.selected);
        }

        let (unread_count, has_notification) = match &workspace {
            Workspace::Home => (
                self.aggregator.unread_count_for_home(),
                self.aggregator.has_notification_for_entry(HOME_ENTRY),
            ),
            Workspace::Group(id) => (
                self.aggregator.unread_count_for_group(id),
                self.aggregator.has_notification(id),
            ),
            Workspace::Messages => (self.aggregator.unread_count_for_dms(), false),
        };

        let expanded = self.expansions.state(&workspace, selected).is_expanded();

        WorkspaceRow {
            workspace,
            title,
            unread_count,
            has_notification,
            selected,
            locked,
            expanded,
            channels,
        }
    }

    /// Row for a bare order id, None when it does not resolve
    fn entry_row(&self, id: &str) -> Option<SidebarRow> {
        match id {
            APPS_ENTRY => Some(SidebarRow::Apps),
            HOME_ENTRY => Some(SidebarRow::Workspace(self.workspace_row(
                Workspace::Home,
                HOME_ENTRY.to_string(),
                false,
            ))),
            _ => self.snapshot.resolve_group(id).map(|g| {
                SidebarRow::Workspace(self.workspace_row(
                    Workspace::Group(g.group.clone()),
                    group_title(g),
                    g.invite_only,
                ))
            }),
        }
    }

    /// Only-unread: zero-count rows vanish unless selected; apps has no count
    fn keep(&self, row: &SidebarRow) -> bool {
        match row {
            SidebarRow::Workspace(w) => self.visible(w),
            SidebarRow::Apps | SidebarRow::Pending(_) => !self.only_unread(),
            SidebarRow::Folder(f) => {
                !self.only_unread() || f.summary.unread_count > 0 || f.contains_selection
            }
        }
    }

    fn folder_row(&self, folder: &GroupFolder) -> SidebarRow {
        let rows: Vec<SidebarRow> = folder
            .groups
            .iter()
            .filter_map(|id| self.entry_row(id))
            .collect();
        let contains_selection = rows
            .iter()
            .any(|r| matches!(r, SidebarRow::Workspace(w) if w.selected));

        SidebarRow::Folder(FolderRow {
            name: folder.name.clone(),
            collapsed: folder.collapsed,
            expanded: !folder.collapsed || contains_selection,
            summary: self.aggregator.folder_summary(folder),
            contains_selection,
            rows: rows.into_iter().filter(|r| self.keep(r)).collect(),
        })
    }

    fn pending_rows(&self) -> Vec<SidebarRow> {
        let membership = self.snapshot.membership;
        membership
            .pending_groups()
            .into_iter()
            .filter(|id| self.snapshot.associations.group(id).is_none())
            .map(|id| {
                let progress = membership.join_progress(&id);
                SidebarRow::Pending(PendingRow {
                    title: id.clone(),
                    joining: progress.map(|p| p.is_in_flight()).unwrap_or(false),
                    has_notification: progress.is_none(),
                    id,
                })
            })
            .collect()
    }

    fn build(&self) -> Vec<SidebarRow> {
        let stored = &self.settings.group_order;
        // Joined groups the stored order has not caught up with yet are
        // appended at the top level; storage itself is left alone.
        let order = if stored.is_empty() {
            self.snapshot.default_order()
        } else {
            stored.reconcile_membership(self.snapshot.membership.joined_groups())
        };

        let mut rows: Vec<SidebarRow> = order
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                OrderEntry::Group(id) => self.entry_row(id),
                OrderEntry::Folder(folder) => Some(self.folder_row(folder)),
            })
            .collect();
        rows.extend(self.pending_rows());
        rows.push(SidebarRow::Workspace(self.workspace_row(
            Workspace::Messages,
            MESSAGES_TITLE.to_string(),
            false,
        )));

        rows.retain(|r| self.keep(r));
        rows
    }
}

/// Pin the state of every workspace row that is on screen, so later passes
/// no longer apply the initial selection rule to it.
fn record_displayed(expansions: &mut SidebarExpansions, rows: &[SidebarRow]) {
    for row in rows {
        match row {
            SidebarRow::Workspace(w) => {
                expansions.observe(&w.workspace, w.selected);
            }
            SidebarRow::Folder(f) if f.expanded => record_displayed(expansions, &f.rows),
            SidebarRow::Folder(_) | SidebarRow::Apps | SidebarRow::Pending(_) => {}
        }
    }
}

/// Build the sidebar for the current snapshot and settings.
///
/// Uses the stored order when there is one, the default order otherwise.
/// Joined groups missing from a stored order are appended at the top level.
/// Pending group rows follow the ordered rows, and the messages row comes
/// last. With `show_only_unread` set, rows with nothing unread are dropped
/// unless they hold the selection.
///
/// Workspace rows shown for the first time are recorded in `expansions`
/// with their initial state.
pub fn build_visible_list(
    snapshot: &SidebarSnapshot<'_>,
    settings: &SidebarSettings,
    options: &ListOptions<'_>,
    expansions: &mut SidebarExpansions,
) -> SidebarView {
    if snapshot.joined_groups_alphabetical().is_empty() && !options.loading_timed_out {
        return SidebarView::Loading;
    }

    let rows = Materializer {
        snapshot,
        settings,
        options,
        expansions: &*expansions,
        aggregator: snapshot.aggregator(),
    }
    .build();
    record_displayed(expansions, &rows);
    SidebarView::Ready(rows)
}

/// One editable row of the sorter, addressed by its position in the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorterItem {
    pub id: String,
    pub title: String,
    pub location: DragLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SorterEntry {
    Group(SorterItem),
    Folder {
        name: String,
        collapsed: bool,
        location: DragLocation,
        groups: Vec<SorterItem>,
    },
}

/// Order the sorter edits: the stored order, or the default when empty.
pub fn sorter_order(snapshot: &SidebarSnapshot<'_>, stored: &GroupOrder) -> GroupOrder {
    if stored.is_empty() {
        snapshot.default_order()
    } else {
        stored.clone()
    }
}

/// Rows of the sorter for `order`. Entries whose title cannot be resolved
/// are omitted; locations still point into `order`.
pub fn sorter_entries(snapshot: &SidebarSnapshot<'_>, order: &GroupOrder) -> Vec<SorterEntry> {
    order
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            OrderEntry::Group(id) => snapshot.entry_title(id).map(|title| {
                SorterEntry::Group(SorterItem {
                    id: id.clone(),
                    title,
                    location: DragLocation::top_level(index),
                })
            }),
            OrderEntry::Folder(folder) => Some(SorterEntry::Folder {
                name: folder.name.clone(),
                collapsed: folder.collapsed,
                location: DragLocation::top_level(index),
                groups: folder
                    .groups
                    .iter()
                    .enumerate()
                    .filter_map(|(i, id)| {
                        snapshot.entry_title(id).map(|title| SorterItem {
                            id: id.clone(),
                            title,
                            location: DragLocation::folder(&folder.name, i),
                        })
                    })
                    .collect(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ChannelAssociation, ChannelMetadata, ChannelModule, ConversationKey, JoinApp,
        JoinProgress, NotificationKey, ResourcePath, UnreadEntry,
    };
    use crate::sidebar::expansion::RowExpansion;

    const A: &str = "/ship/~zod/a";
    const B: &str = "/ship/~zod/b";
    const C: &str = "/ship/~zod/c";

    struct Fixture {
        associations: Associations,
        membership: Membership,
        unreads: UnreadIndex,
        unseen: UnseenSet,
    }

    impl Fixture {
        fn snapshot(&self) -> SidebarSnapshot<'_> {
            SidebarSnapshot {
                associations: &self.associations,
                membership: &self.membership,
                unreads: &self.unreads,
                unseen: &self.unseen,
            }
        }

        fn set_unread(&mut self, channel: &str, count: u64) {
            self.unreads.set(
                ConversationKey::Channel(ResourcePath::new("zod", channel)),
                UnreadEntry {
                    count,
                    last_items: vec![],
                    last: 1,
                },
            );
        }
    }

    fn fixture() -> Fixture {
        let mut associations = Associations::new();
        for (id, title, channel) in [
            (A, "beta", "a-chat"),
            (B, "Alpha", "b-chat"),
            (C, "gamma", "c-chat"),
        ] {
            associations.upsert_group(GroupAssociation {
                group: id.to_string(),
                title: title.to_string(),
                hidden: false,
                invite_only: id == C,
            });
            associations.upsert_channel(ChannelAssociation {
                resource: ResourcePath::new("zod", channel),
                group: id.to_string(),
                metadata: Some(ChannelMetadata {
                    title: channel.to_string(),
                    module: ChannelModule::Chat,
                }),
            });
        }

        let mut membership = Membership::new();
        for id in [A, B, C] {
            membership.add_joined_group(id);
        }

        Fixture {
            associations,
            membership,
            unreads: UnreadIndex::new(),
            unseen: UnseenSet::new(),
        }
    }

    fn ids(view: &SidebarView) -> Vec<String> {
        view.rows().iter().map(row_id).collect()
    }

    fn row_id(row: &SidebarRow) -> String {
        match row {
            SidebarRow::Workspace(w) => match &w.workspace {
                Workspace::Home => HOME_ENTRY.to_string(),
                Workspace::Group(id) => id.clone(),
                Workspace::Messages => MESSAGES_TITLE.to_string(),
            },
            SidebarRow::Apps => APPS_ENTRY.to_string(),
            SidebarRow::Folder(f) => format!("folder:{}", f.name),
            SidebarRow::Pending(p) => format!("pending:{}", p.id),
        }
    }

    /// One pass with fresh row state
    fn build(f: &Fixture, settings: &SidebarSettings, options: &ListOptions<'_>) -> SidebarView {
        build_visible_list(&f.snapshot(), settings, options, &mut SidebarExpansions::new())
    }

    fn ready() -> ListOptions<'static> {
        ListOptions {
            loading_timed_out: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_order_alphabetical() {
        let f = fixture();
        let view = build(&f, &SidebarSettings::default(), &ready());

        assert_eq!(ids(&view), vec![HOME_ENTRY, B, A, C, MESSAGES_TITLE]);
    }

    #[test]
    fn test_stored_order_drops_unresolved() {
        let mut f = fixture();
        f.membership.remove_joined_group(C);
        let settings = SidebarSettings {
            group_order: GroupOrder::from_entries(vec![
                OrderEntry::group(C),
                OrderEntry::group(APPS_ENTRY),
                OrderEntry::group("/ship/~zod/unknown"),
                OrderEntry::group(A),
                OrderEntry::group(HOME_ENTRY),
            ]),
            ..Default::default()
        };

        let view = build(&f, &settings, &ready());

        // B is joined but missing from the order, so it trails at the top level
        assert_eq!(ids(&view), vec![APPS_ENTRY, A, HOME_ENTRY, B, MESSAGES_TITLE]);
        // Storage is untouched
        assert_eq!(settings.group_order.len(), 5);
    }

    #[test]
    fn test_loading_until_timeout() {
        let mut f = fixture();
        for id in [A, B, C] {
            f.membership.remove_joined_group(id);
        }
        let settings = SidebarSettings::default();

        assert_eq!(
            build(&f, &settings, &ListOptions::default()),
            SidebarView::Loading
        );
        assert!(matches!(
            build(&f, &settings, &ready()),
            SidebarView::Ready(_)
        ));

        // Populated data wins even before the timeout
        f.membership.add_joined_group(A);
        assert!(matches!(
            build(&f, &settings, &ListOptions::default()),
            SidebarView::Ready(_)
        ));
    }

    #[test]
    fn test_only_unread_keeps_selection() {
        let mut f = fixture();
        f.set_unread("a-chat", 2);
        let settings = SidebarSettings {
            show_only_unread: true,
            ..Default::default()
        };
        let selected = Workspace::Group(C.to_string());
        let options = ListOptions {
            selected_workspace: Some(&selected),
            ..ready()
        };

        let view = build(&f, &settings, &options);

        assert_eq!(ids(&view), vec![A, C]);
        let SidebarRow::Workspace(c) = &view.rows()[1] else {
            panic!("expected a workspace row");
        };
        assert!(c.selected && c.locked && c.expanded);
        assert_eq!(c.unread_count, 0);
    }

    #[test]
    fn test_only_unread_folder_rules() {
        let mut f = fixture();
        f.set_unread("b-chat", 1);
        let folders = GroupOrder::from_entries(vec![
            OrderEntry::Folder(GroupFolder {
                name: "busy".to_string(),
                collapsed: true,
                groups: vec![A.to_string(), B.to_string()],
            }),
            OrderEntry::Folder(GroupFolder {
                name: "quiet".to_string(),
                collapsed: true,
                groups: vec![C.to_string()],
            }),
            OrderEntry::group(APPS_ENTRY),
        ]);
        let settings = SidebarSettings {
            group_order: folders,
            show_only_unread: true,
            ..Default::default()
        };

        let view = build(&f, &settings, &ready());
        assert_eq!(ids(&view), vec!["folder:busy"]);
        let SidebarRow::Folder(busy) = &view.rows()[0] else {
            panic!("expected a folder row");
        };
        assert_eq!(busy.summary.unread_count, 1);
        assert!(!busy.expanded);
        assert_eq!(busy.rows.iter().map(row_id).collect::<Vec<_>>(), vec![B]);

        // A selected group keeps its folder visible and opens it
        let selected = Workspace::Group(C.to_string());
        let options = ListOptions {
            selected_workspace: Some(&selected),
            ..ready()
        };
        let view = build(&f, &settings, &options);
        assert_eq!(ids(&view), vec!["folder:busy", "folder:quiet"]);
        let SidebarRow::Folder(quiet) = &view.rows()[1] else {
            panic!("expected a folder row");
        };
        assert!(quiet.contains_selection && quiet.expanded && quiet.collapsed);
    }

    #[test]
    fn test_only_unread_filters_channels() {
        let mut f = fixture();
        f.associations.upsert_channel(ChannelAssociation {
            resource: ResourcePath::new("zod", "a-quiet"),
            group: A.to_string(),
            metadata: None,
        });
        f.set_unread("a-chat", 3);
        f.unseen
            .insert(NotificationKey::mention(ResourcePath::new("zod", "a-chat")));
        let settings = SidebarSettings {
            show_only_unread: true,
            ..Default::default()
        };

        let view = build(&f, &settings, &ready());
        let SidebarRow::Workspace(a) = &view.rows()[0] else {
            panic!("expected a workspace row");
        };
        assert!(a.has_notification);
        assert_eq!(a.channels.len(), 1);
        assert!(a.channels[0].has_notification);
        assert_eq!(a.channels[0].unread_count, 3);
    }

    #[test]
    fn test_pending_rows() {
        let mut f = fixture();
        f.membership.invites.insert("/ship/~nec/invited".to_string());
        f.membership
            .apply_join_progress("/ship/~nec/joining", JoinApp::Groups, JoinProgress::Started);
        // Known associations are not pending rows
        f.membership.invites.insert(A.to_string());

        let view = build(&f, &SidebarSettings::default(), &ready());
        let pending: Vec<&PendingRow> = view
            .rows()
            .iter()
            .filter_map(|r| match r {
                SidebarRow::Pending(p) => Some(p),
                _ => None,
            })
            .collect();

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, "/ship/~nec/invited");
        assert!(pending[0].has_notification && !pending[0].joining);
        assert!(pending[1].joining && !pending[1].has_notification);
    }

    #[test]
    fn test_messages_row() {
        let mut f = fixture();
        f.membership.dm_inbox.insert("nec".to_string());
        f.unreads.set(
            ConversationKey::dm("nec"),
            UnreadEntry {
                count: 2,
                last_items: vec![],
                last: 3,
            },
        );

        let view = build(&f, &SidebarSettings::default(), &ready());
        let Some(SidebarRow::Workspace(messages)) = view.rows().last() else {
            panic!("expected the messages row last");
        };
        assert_eq!(messages.unread_count, 2);
        assert!(messages.expanded);
        assert_eq!(messages.channels[0].channel.item, ChannelItem::Dm("nec".to_string()));
    }

    #[test]
    fn test_joined_groups_missing_from_order_are_appended() {
        let mut f = fixture();
        const D: &str = "/ship/~nec/d";
        f.associations.upsert_group(GroupAssociation {
            group: D.to_string(),
            title: "delta".to_string(),
            hidden: false,
            invite_only: false,
        });
        f.membership.add_joined_group(D);
        let settings = SidebarSettings {
            group_order: GroupOrder::from_entries(vec![
                OrderEntry::Folder(GroupFolder {
                    name: "f".to_string(),
                    collapsed: false,
                    groups: vec![B.to_string()],
                }),
                OrderEntry::group(A),
                OrderEntry::group(HOME_ENTRY),
            ]),
            ..Default::default()
        };

        let view = build(&f, &settings, &ready());

        assert_eq!(ids(&view), vec![APPS_ENTRY, "folder:f", A, HOME_ENTRY, C, D, MESSAGES_TITLE]);
        let SidebarRow::Folder(folder) = &view.rows()[1] else {
            panic!("expected a folder row");
        };
        assert_eq!(folder.rows.iter().map(row_id).collect::<Vec<_>>(), vec![B]);
        assert_eq!(settings.group_order.len(), 3);
    }

    fn expanded(view: &SidebarView) -> Vec<bool> {
        view.rows()
            .iter()
            .filter_map(|r| match r {
                SidebarRow::Workspace(w) => Some(w.expanded),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_user_toggle_overrides_initial() {
        let f = fixture();
        let settings = SidebarSettings::default();
        let mut expansions = SidebarExpansions::new();

        let view = build_visible_list(&f.snapshot(), &settings, &ready(), &mut expansions);
        // home, B, A, C, messages
        assert_eq!(expanded(&view), vec![false, false, false, false, true]);

        expansions.toggle(&Workspace::Group(A.to_string()), false);
        let view = build_visible_list(&f.snapshot(), &settings, &ready(), &mut expansions);
        assert_eq!(expanded(&view), vec![false, false, true, false, true]);
    }

    #[test]
    fn test_selected_row_opens_once_and_stays_open() {
        let f = fixture();
        let settings = SidebarSettings::default();
        let mut expansions = SidebarExpansions::new();
        let a = Workspace::Group(A.to_string());
        let selected = ListOptions {
            selected_workspace: Some(&a),
            ..ready()
        };

        let view = build_visible_list(&f.snapshot(), &settings, &selected, &mut expansions);
        assert_eq!(expanded(&view), vec![false, false, true, false, true]);

        // Selection moves elsewhere; A keeps its state
        let view = build_visible_list(&f.snapshot(), &settings, &ready(), &mut expansions);
        assert_eq!(expanded(&view), vec![false, false, true, false, true]);

        // Collapsing it by hand sticks even while it is selected again
        assert_eq!(expansions.toggle(&a, false), RowExpansion::Collapsed);
        let view = build_visible_list(&f.snapshot(), &settings, &selected, &mut expansions);
        assert_eq!(expanded(&view), vec![false, false, false, false, true]);
    }

    #[test]
    fn test_rows_in_closed_folders_are_not_recorded() {
        let f = fixture();
        let settings = SidebarSettings {
            group_order: GroupOrder::from_entries(vec![
                OrderEntry::group(HOME_ENTRY),
                OrderEntry::group(APPS_ENTRY),
                OrderEntry::Folder(GroupFolder {
                    name: "f".to_string(),
                    collapsed: true,
                    groups: vec![A.to_string(), B.to_string(), C.to_string()],
                }),
            ]),
            ..Default::default()
        };
        let mut expansions = SidebarExpansions::new();

        build_visible_list(&f.snapshot(), &settings, &ready(), &mut expansions);
        assert!(expansions.get(&Workspace::Home).is_some());
        assert!(expansions.get(&Workspace::Group(A.to_string())).is_none());

        // Selecting a member opens the folder, and the row then starts expanded
        let a = Workspace::Group(A.to_string());
        let options = ListOptions {
            selected_workspace: Some(&a),
            ..ready()
        };
        build_visible_list(&f.snapshot(), &settings, &options, &mut expansions);
        assert_eq!(expansions.get(&a), Some(RowExpansion::Expanded));
    }

    #[test]
    fn test_sorter_entries() {
        let f = fixture();
        let seeded = sorter_order(&f.snapshot(), &GroupOrder::new());
        assert_eq!(seeded.all_groups(), vec![HOME_ENTRY, B, A, C]);

        let order = GroupOrder::from_entries(vec![
            OrderEntry::Folder(GroupFolder {
                name: "f".to_string(),
                collapsed: false,
                groups: vec!["/ship/~zod/gone".to_string(), A.to_string()],
            }),
            OrderEntry::group("/ship/~zod/gone2"),
            OrderEntry::group(APPS_ENTRY),
        ]);
        let entries = sorter_entries(&f.snapshot(), &order);

        assert_eq!(entries.len(), 2);
        let SorterEntry::Folder { groups, .. } = &entries[0] else {
            panic!("expected a folder");
        };
        assert_eq!(groups[0].title, "beta");
        assert_eq!(groups[0].location, DragLocation::folder("f", 1));
        assert_eq!(
            entries[1],
            SorterEntry::Group(SorterItem {
                id: APPS_ENTRY.to_string(),
                title: APPS_ENTRY.to_string(),
                location: DragLocation::top_level(2),
            })
        );
    }
}
