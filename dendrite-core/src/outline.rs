//! One-line-per-message outline of a forest, plus the single-message detail
//! view.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::flowchart::Placement;
use crate::message::{Message, MessageId};
use crate::path::ensure_reached;
use crate::store::MessageStore;
use crate::text::{Block, Emphasis, Line, Span, Tone};

/// Label text is cut to this many characters.
pub const LABEL_MAX_CHARS: usize = 40;
/// Title of the outline's synthetic top node.
pub const OUTLINE_TITLE: &str = "Chat History";

/// Short label for a message: icon, time and the start of its content.
///
/// Content longer than [`LABEL_MAX_CHARS`] is cut and suffixed with `...`;
/// newlines become spaces so the label stays on one line.
pub fn message_label(message: &Message, selected: bool) -> Line {
    let mut content: String = message
        .content
        .chars()
        .take(LABEL_MAX_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if message.content.chars().nth(LABEL_MAX_CHARS).is_some() {
        content.push_str("...");
    }

    let emphasis = if selected {
        Emphasis::new(Tone::Accent).bold()
    } else {
        Emphasis::new(message.speaker.tone()).bold()
    };

    Line::new()
        .with(Span::plain(format!("{} ", message.speaker.icon())))
        .with(Span::styled(
            format!("[{}] ", message.short_time()),
            Emphasis::new(Tone::Muted),
        ))
        .with(Span::styled(content, emphasis))
}

/// Renders every tree as an indented outline under a `Chat History` node.
///
/// Messages no root leads to fail the outline, as in
/// [`FlowchartBuilder::build`](crate::FlowchartBuilder::build).
#[instrument(skip_all, fields(selected = ?selected))]
pub fn render_outline<S: MessageStore>(store: &S, selected: Option<MessageId>) -> Result<Block> {
    let roots = store.get_roots().map_err(Error::store)?;
    let limit = store.len().map_err(Error::store)?;

    let mut walk = OutlineWalk {
        store,
        limit,
        selected,
        out: Block::new(),
        reached: HashSet::new(),
    };
    walk.out.push(Span::styled(OUTLINE_TITLE, Emphasis::new(Tone::Accent).bold()));

    for (idx, root) in roots.iter().enumerate() {
        walk.node(root, Placement::among(idx, roots.len()), "", 0)?;
    }

    if walk.reached.len() < limit {
        ensure_reached(store, &walk.reached)?;
    }

    debug!(lines = walk.out.len(), "built outline");
    Ok(walk.out)
}

struct OutlineWalk<'a, S> {
    store: &'a S,
    limit: usize,
    selected: Option<MessageId>,
    out: Block,
    reached: HashSet<MessageId>,
}

impl<S: MessageStore> OutlineWalk<'_, S> {
    fn node(&mut self, message: &Message, placement: Placement, prefix: &str, depth: usize) -> Result<()> {
        if depth >= self.limit {
            warn!(id = %message.id, depth, "outline deeper than store");
            return Err(Error::CycleDetected {
                start: message.id,
                limit: self.limit,
            });
        }

        self.reached.insert(message.id);

        let label = message_label(message, self.selected == Some(message.id));
        self.out.push(label.prefixed(Span::styled(
            format!("{prefix}{}", placement.connector()),
            Emphasis::new(Tone::Muted),
        )));

        let children = self.store.get_children(message.id).map_err(Error::store)?;
        let child_prefix = format!("{prefix}{}", placement.continuation());
        for (idx, child) in children.iter().enumerate() {
            self.node(child, Placement::among(idx, children.len()), &child_prefix, depth + 1)?;
        }
        Ok(())
    }
}

/// Full view of one message: speaker, full timestamp, ids, then the content
/// verbatim.
pub fn render_detail(message: &Message) -> Block {
    let tone = message.speaker.tone();
    let parent = match message.parent_id {
        Some(id) => id.to_string(),
        None => "Root".to_string(),
    };

    let mut block = Block::new();
    block.push(Span::styled(
        format!("{} {}", message.speaker.icon(), message.speaker.title()),
        Emphasis::new(tone).bold(),
    ));
    block.push(Span::styled(
        message.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        Emphasis::new(Tone::Muted),
    ));
    block.push(Span::styled(
        format!("Message ID: {} | Parent: {}", message.id, parent),
        Emphasis::new(Tone::Muted),
    ));
    block.push(Line::new());
    for line in message.content.lines() {
        block.push(line);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Speaker;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn at(h: u32, m: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, h, m, 30).unwrap()
    }

    #[test]
    fn label_keeps_short_content() {
        let msg = Message::root(1, Speaker::User, "How do I read a file?").at(at(14, 3));
        assert_eq!(message_label(&msg, false).plain(), "👤 [14:03] How do I read a file?");
    }

    #[test]
    fn label_truncates_long_content() {
        let content = "x".repeat(41);
        let msg = Message::root(1, Speaker::Assistant, content).at(at(8, 0));

        assert_eq!(
            message_label(&msg, false).plain(),
            format!("🤖 [08:00] {}...", "x".repeat(40))
        );
    }

    #[test]
    fn label_at_limit_has_no_ellipsis() {
        let msg = Message::root(1, Speaker::User, "y".repeat(40)).at(at(8, 0));
        assert!(!message_label(&msg, false).plain().ends_with("..."));
    }

    #[test]
    fn label_flattens_newlines() {
        let msg = Message::root(1, Speaker::User, "one\ntwo").at(at(8, 0));
        assert_eq!(message_label(&msg, false).plain(), "👤 [08:00] one two");
    }

    #[test]
    fn outline_draws_guides() {
        let store = MemoryStore::from_messages([
            Message::root(1, Speaker::User, "a").at(at(9, 0)),
            Message::reply(2, 1, Speaker::Assistant, "b").at(at(9, 1)),
            Message::reply(3, 1, Speaker::Assistant, "c").at(at(9, 2)),
            Message::root(4, Speaker::User, "d").at(at(9, 3)),
        ])
        .unwrap();

        let lines = render_outline(&store, Some(MessageId(3))).unwrap().plain_lines();
        assert_eq!(
            lines,
            vec![
                "Chat History",
                "├── 👤 [09:00] a",
                "│   ├── 🤖 [09:01] b",
                "│   └── 🤖 [09:02] c",
                "└── 👤 [09:03] d",
            ]
        );
    }

    #[test]
    fn outline_highlights_selection() {
        let store = MemoryStore::from_messages([Message::root(1, Speaker::User, "a")]).unwrap();
        let block = render_outline(&store, Some(MessageId(1))).unwrap();

        let label = block.lines[1].spans.last().unwrap();
        assert_eq!(label.emphasis.tone, Tone::Accent);
    }

    #[test]
    fn empty_outline_has_only_title() {
        let block = render_outline(&MemoryStore::new(), None).unwrap();
        assert_eq!(block.plain_lines(), vec![OUTLINE_TITLE]);
    }

    #[test]
    fn outline_rejects_orphans() {
        let mut store = MemoryStore::from_messages([
            Message::root(1, Speaker::User, "a"),
            Message::reply(2, 1, Speaker::Assistant, "b"),
            Message::reply(3, 2, Speaker::User, "c"),
        ])
        .unwrap();
        store.remove(MessageId(2));

        assert!(matches!(
            render_outline(&store, None),
            Err(Error::DanglingParent { child: MessageId(3), .. })
        ));
    }

    #[test]
    fn detail_shows_ids_and_content() {
        let msg = Message::reply(4, 3, Speaker::Assistant, "line one\n\n    indented").at(at(23, 59));
        let lines = render_detail(&msg).plain_lines();

        assert_eq!(
            lines,
            vec![
                "🤖 Assistant",
                "2024-02-29 23:59:30",
                "Message ID: 4 | Parent: 3",
                "",
                "line one",
                "",
                "    indented",
            ]
        );
    }

    #[test]
    fn detail_marks_roots() {
        let msg = Message::root(1, Speaker::User, "hi");
        assert_eq!(render_detail(&msg).plain_lines()[2], "Message ID: 1 | Parent: Root");
    }
}
