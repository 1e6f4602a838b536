//! Root-to-message paths.

use std::collections::HashSet;

use tracing::{debug, instrument, trace, warn};

use crate::boxed::{BoxLayout, render_box};
use crate::error::{Error, Result};
use crate::message::{Message, MessageId};
use crate::store::MessageStore;
use crate::text::{Block, Emphasis, Line, Span, Tone};

/// Returns the messages from the root of `message`'s tree down to `message`
/// itself, root first.
///
/// The walk follows `parent_id` links and fails once it has looked up more
/// ancestors than the store holds. `message` itself need not be stored.
#[instrument(skip_all, fields(id = %message.id))]
pub fn resolve_path<S: MessageStore>(message: &Message, store: &S) -> Result<Vec<Message>> {
    let limit = store.len().map_err(Error::store)?;
    let start = message.id;

    let mut path = vec![message.clone()];
    let mut current = message.parent_id.map(|parent| (message.id, parent));

    while let Some((child, parent)) = current {
        let Some(next) = store.get_by_id(parent).map_err(Error::store)? else {
            warn!(%child, %parent, "dangling parent reference");
            return Err(Error::DanglingParent { child, parent });
        };

        trace!(id = %next.id, "visited ancestor");
        current = next.parent_id.map(|grandparent| (next.id, grandparent));
        path.push(next);

        // Each stored message can be an ancestor once, never more.
        if path.len() - 1 > limit {
            warn!(%start, limit, "parent chain does not terminate");
            return Err(Error::CycleDetected { start, limit });
        }
    }

    path.reverse();
    debug!(len = path.len(), "resolved path");
    Ok(path)
}

/// Fails with the traversal error of the first stored message that the
/// forest walk did not reach from a root.
pub(crate) fn ensure_reached<S: MessageStore>(store: &S, reached: &HashSet<MessageId>) -> Result<()> {
    for message in store.get_all().map_err(Error::store)? {
        if reached.contains(&message.id) {
            continue;
        }
        resolve_path(&message, store)?;
        warn!(id = %message.id, "rooted message missing from its parent's children");
    }
    Ok(())
}

/// Renders a resolved path as boxes joined by downward arrows.
///
/// The last message is the one the path leads to and is drawn selected.
pub fn render_path(path: &[Message]) -> Block {
    let layout = BoxLayout::default();
    let mut block = Block::new();

    block.push(Span::styled(
        format!("Conversation path: {} messages", path.len()),
        Emphasis::new(Tone::Accent).bold(),
    ));
    block.push(Line::new());

    for (idx, message) in path.iter().enumerate() {
        let is_last = idx + 1 == path.len();
        block.extend(render_box(message, &layout, is_last));

        if !is_last {
            block.push(Span::styled("    ↓", Emphasis::new(Tone::Muted)));
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MessageId, Speaker};
    use crate::store::MemoryStore;

    fn chain() -> MemoryStore {
        MemoryStore::from_messages([
            Message::root(1, Speaker::User, "Hello"),
            Message::reply(2, 1, Speaker::Assistant, "Hi there"),
            Message::reply(3, 2, Speaker::User, "How are you?"),
            Message::reply(4, 2, Speaker::User, "Different question"),
        ])
        .unwrap()
    }

    fn get(store: &MemoryStore, id: u64) -> Message {
        store.get_by_id(MessageId(id)).unwrap().unwrap()
    }

    #[test]
    fn root_resolves_to_itself() {
        let store = chain();
        let path = resolve_path(&get(&store, 1), &store).unwrap();

        assert_eq!(path, vec![get(&store, 1)]);
    }

    #[test]
    fn path_runs_root_first() {
        let store = chain();
        let path = resolve_path(&get(&store, 4), &store).unwrap();

        let ids: Vec<u64> = path.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        for pair in path.windows(2) {
            assert_eq!(pair[1].parent_id, Some(pair[0].id));
        }
    }

    #[test]
    fn full_length_chain_is_not_a_cycle() {
        let store = MemoryStore::from_messages([
            Message::root(1, Speaker::User, "a"),
            Message::reply(2, 1, Speaker::Assistant, "b"),
            Message::reply(3, 2, Speaker::User, "c"),
        ])
        .unwrap();

        assert_eq!(resolve_path(&get(&store, 3), &store).unwrap().len(), 3);
    }

    #[test]
    fn missing_parent_is_reported() {
        let mut store = chain();
        store.remove(MessageId(2));

        let err = resolve_path(&get(&store, 3), &store).unwrap_err();
        assert!(matches!(
            err,
            Error::DanglingParent {
                child: MessageId(3),
                parent: MessageId(2)
            }
        ));
    }

    #[test]
    fn two_message_cycle_is_reported() {
        let store = MemoryStore::from_messages([
            Message::reply(1, 2, Speaker::User, "a"),
            Message::reply(2, 1, Speaker::Assistant, "b"),
        ])
        .unwrap();

        let err = resolve_path(&get(&store, 1), &store).unwrap_err();
        assert!(matches!(err, Error::CycleDetected { start: MessageId(1), limit: 2 }));
    }

    #[test]
    fn unstored_message_may_extend_a_full_chain() {
        let store = MemoryStore::from_messages([
            Message::root(1, Speaker::User, "a"),
            Message::reply(2, 1, Speaker::Assistant, "b"),
            Message::reply(3, 2, Speaker::User, "c"),
        ])
        .unwrap();
        let draft = Message::reply(4, 3, Speaker::Assistant, "not yet stored");

        let ids: Vec<u64> = resolve_path(&draft, &store).unwrap().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn unreached_messages_report_their_traversal_error() {
        let mut store = chain();
        store.remove(MessageId(2));

        let reached: HashSet<MessageId> = [MessageId(1)].into();
        let err = ensure_reached(&store, &reached).unwrap_err();
        assert!(matches!(
            err,
            Error::DanglingParent {
                child: MessageId(3),
                parent: MessageId(2)
            }
        ));

        let all: HashSet<MessageId> = [1, 3, 4].map(MessageId).into();
        assert!(ensure_reached(&store, &all).is_ok());
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let store = MemoryStore::from_messages([Message::reply(1, 1, Speaker::User, "me")]).unwrap();

        let err = resolve_path(&get(&store, 1), &store).unwrap_err();
        assert!(matches!(err, Error::CycleDetected { .. }));
    }

    #[test]
    fn render_path_joins_boxes_with_arrows() {
        let store = chain();
        let path = resolve_path(&get(&store, 3), &store).unwrap();
        let lines = render_path(&path).plain_lines();

        assert_eq!(lines[0], "Conversation path: 3 messages");
        assert_eq!(lines.iter().filter(|l| l.trim() == "↓").count(), 2);
        assert_eq!(lines.iter().filter(|l| l.starts_with('┌')).count(), 3);
        assert!(lines.last().unwrap().starts_with('└'));
    }

    #[test]
    fn render_path_selects_last_message() {
        let store = chain();
        let path = resolve_path(&get(&store, 2), &store).unwrap();
        let block = render_path(&path);

        let bold_borders: Vec<String> = block
            .lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.emphasis.bold && s.text.starts_with('┌')))
            .map(Line::plain)
            .collect();
        assert_eq!(bold_borders.len(), 1);
    }
}
