use super::channels::{route_for, ChannelItem, ListedChannel, Workspace};
use crate::events::{Command, CommandDispatcher};
use tracing::debug;

/// Index after stepping once from `current` in a list of `len` items,
/// wrapping in both directions.
///
/// A missing `current` steps onto the first item going forward and onto
/// the last item going backward. Returns None for an empty list.
pub fn cycle_index(len: usize, current: Option<usize>, backward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (current, backward) {
        (None, false) => 0,
        (None, true) => len - 1,
        (Some(i), false) => (i as i64 + 1).rem_euclid(len as i64) as usize,
        (Some(i), true) => (i as i64 - 1).rem_euclid(len as i64) as usize,
    };
    Some(next)
}

/// Next (or previous) channel of a materialized listing.
pub fn cycle_channels<'c>(
    items: &'c [ListedChannel],
    selected: Option<&ChannelItem>,
    backward: bool,
) -> Option<&'c ListedChannel> {
    let current = selected.and_then(|s| items.iter().position(|c| &c.item == s));
    cycle_index(items.len(), current, backward).and_then(|i| items.get(i))
}

/// Cycle and navigate there through the dispatcher.
/// Returns the newly selected item, or None when there was nothing to cycle.
pub fn navigate_cycle(
    workspace: &Workspace,
    items: &[ListedChannel],
    selected: Option<&ChannelItem>,
    backward: bool,
    dispatcher: &dyn CommandDispatcher,
) -> Option<ChannelItem> {
    let next = cycle_channels(items, selected, backward)?;
    let route = route_for(workspace, next);
    debug!("cycling to {} ({})", next.item, route);
    dispatcher.dispatch(Command::Navigate(route));
    Some(next.item.clone())
}

/// Acknowledge everything unread in a conversation.
pub fn mark_read(item: &ChannelItem, dispatcher: &dyn CommandDispatcher) {
    dispatcher.dispatch(Command::MarkRead(item.conversation()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationKey, ResourcePath};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<Command>>,
    }

    impl CommandDispatcher for Recorder {
        fn dispatch(&self, command: Command) {
            self.sent.borrow_mut().push(command);
        }
    }

    fn dm(ship: &str) -> ListedChannel {
        ListedChannel {
            item: ChannelItem::Dm(ship.to_string()),
            title: format!("~{}", ship),
            module: None,
            pending: false,
            joined: true,
            last: 0,
        }
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle_index(3, Some(2), false), Some(0));
        assert_eq!(cycle_index(3, Some(0), true), Some(2));
        assert_eq!(cycle_index(3, Some(1), false), Some(2));
        assert_eq!(cycle_index(1, Some(0), false), Some(0));
        assert_eq!(cycle_index(1, Some(0), true), Some(0));
    }

    #[test]
    fn test_cycle_forward_then_back_returns() {
        for len in 1..=12 {
            for i in 0..len {
                let forward = cycle_index(len, Some(i), false).unwrap();
                assert_eq!(cycle_index(len, Some(forward), true), Some(i), "len {} at {}", len, i);
            }
        }
    }

    #[test]
    fn test_cycle_empty_and_unselected() {
        assert_eq!(cycle_index(0, None, false), None);
        assert_eq!(cycle_index(0, Some(0), true), None);
        assert_eq!(cycle_index(4, None, false), Some(0));
        assert_eq!(cycle_index(4, None, true), Some(3));
    }

    #[test]
    fn test_cycle_channels_by_item() {
        let items = vec![dm("nec"), dm("bus"), dm("wet")];
        let selected = ChannelItem::Dm("wet".to_string());

        let next = cycle_channels(&items, Some(&selected), false).unwrap();
        assert_eq!(next.item, ChannelItem::Dm("nec".to_string()));
        assert!(cycle_channels(&[], Some(&selected), false).is_none());
    }

    #[test]
    fn test_navigate_cycle_dispatches_route() {
        let items = vec![dm("nec"), dm("bus")];
        let recorder = Recorder::default();

        let next = navigate_cycle(&Workspace::Messages, &items, None, true, &recorder);

        assert_eq!(next, Some(ChannelItem::Dm("bus".to_string())));
        assert_eq!(
            recorder.sent.borrow().as_slice(),
            &[Command::Navigate("/~landscape/messages/dm/~bus".to_string())]
        );

        assert!(navigate_cycle(&Workspace::Messages, &[], None, false, &recorder).is_none());
        assert_eq!(recorder.sent.borrow().len(), 1);
    }

    #[test]
    fn test_mark_read() {
        let recorder = Recorder::default();
        mark_read(
            &ChannelItem::Channel(ResourcePath::new("zod", "chat")),
            &recorder,
        );
        assert_eq!(
            recorder.sent.borrow().as_slice(),
            &[Command::MarkRead(ConversationKey::Channel(ResourcePath::new("zod", "chat")))]
        );
    }
}
