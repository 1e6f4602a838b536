//! Flowchart rendering of a whole conversation forest.
//!
//! Each message is drawn as a box. Children hang below their parent, joined
//! by the usual tree guides:
//!
//! ```text
//! ┌──────┐
//! │ root │
//! └──────┘
//! ├── ┌──────┐
//! │   │ a    │
//! │   └──────┘
//! └── ┌──────┐
//!     │ b    │
//!     └──────┘
//! ```

use std::collections::HashSet;

use tracing::{debug, instrument, trace, warn};

use crate::boxed::{BoxLayout, render_box};
use crate::error::{Error, Result};
use crate::message::{Message, MessageId};
use crate::path::ensure_reached;
use crate::store::MessageStore;
use crate::text::{Block, Emphasis, Line, Span, Tone};

/// Width of the rule drawn between two trees.
pub const DIVIDER_WIDTH: usize = 60;
const BANNER_WIDTH: usize = 50;
const BANNER_TITLE: &str = "CONVERSATION FLOW DIAGRAM";

/// Where a node sits among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Root,
    Middle,
    Last,
}

impl Placement {
    pub(crate) fn among(index: usize, count: usize) -> Self {
        if index + 1 == count {
            Placement::Last
        } else {
            Placement::Middle
        }
    }

    /// Glyph on the node's first line.
    pub fn connector(self) -> &'static str {
        match self {
            Placement::Root => "",
            Placement::Middle => "├── ",
            Placement::Last => "└── ",
        }
    }

    /// Glyph on the node's remaining lines and on all of its descendants.
    pub fn continuation(self) -> &'static str {
        match self {
            Placement::Root => "",
            Placement::Middle => "│   ",
            Placement::Last => "    ",
        }
    }
}

/// Builds the flowchart of every tree in a store.
#[derive(Debug, Clone, Default)]
pub struct FlowchartBuilder {
    layout: BoxLayout,
    selected: Option<MessageId>,
}

impl FlowchartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the stock compact or detailed box layout.
    pub fn compact(self, compact: bool) -> Self {
        self.layout(BoxLayout::for_mode(compact))
    }

    pub fn layout(mut self, layout: BoxLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Highlights the message with this id, if present.
    pub fn selected(mut self, selected: Option<MessageId>) -> Self {
        self.selected = selected;
        self
    }

    /// Renders all roots in store order, with a divider between trees.
    ///
    /// Every stored message must hang below some root. A message whose
    /// ancestry breaks off fails the whole chart with the error
    /// [`resolve_path`](crate::resolve_path) gives for it: a missing parent
    /// is [`Error::DanglingParent`], a parent loop [`Error::CycleDetected`].
    /// A tree deeper than the store is large is also a cycle.
    #[instrument(skip_all, fields(selected = ?self.selected, compact = self.layout.is_compact()))]
    pub fn build<S: MessageStore>(&self, store: &S) -> Result<Block> {
        let roots = store.get_roots().map_err(Error::store)?;
        let limit = store.len().map_err(Error::store)?;

        let mut walk = Walk {
            builder: self,
            store,
            limit,
            out: Block::new(),
            reached: HashSet::new(),
        };

        for (idx, root) in roots.iter().enumerate() {
            if idx > 0 {
                walk.out.push(Line::new());
                walk.out.push(Span::styled(
                    "─".repeat(DIVIDER_WIDTH),
                    Emphasis::new(Tone::Muted),
                ));
                walk.out.push(Line::new());
            }
            walk.node(root, Placement::Root, "", 0)?;
        }

        if walk.reached.len() < limit {
            ensure_reached(store, &walk.reached)?;
        }

        debug!(trees = roots.len(), nodes = walk.reached.len(), "built flowchart");
        Ok(walk.out)
    }
}

struct Walk<'a, S> {
    builder: &'a FlowchartBuilder,
    store: &'a S,
    limit: usize,
    out: Block,
    reached: HashSet<MessageId>,
}

impl<S: MessageStore> Walk<'_, S> {
    fn node(&mut self, message: &Message, placement: Placement, prefix: &str, depth: usize) -> Result<()> {
        if depth >= self.limit {
            warn!(id = %message.id, depth, "flowchart deeper than store");
            return Err(Error::CycleDetected {
                start: message.id,
                limit: self.limit,
            });
        }
        trace!(id = %message.id, depth, "rendering node");
        self.reached.insert(message.id);

        let selected = self.builder.selected == Some(message.id);
        let rendered = render_box(message, &self.builder.layout, selected);

        for (idx, line) in rendered.lines.into_iter().enumerate() {
            let guide = if idx == 0 {
                placement.connector()
            } else {
                placement.continuation()
            };
            self.out.push(line.prefixed(Span::plain(format!("{prefix}{guide}"))));
        }

        let children = self.store.get_children(message.id).map_err(Error::store)?;
        let child_prefix = format!("{prefix}{}", placement.continuation());
        for (idx, child) in children.iter().enumerate() {
            let placement = Placement::among(idx, children.len());
            self.node(child, placement, &child_prefix, depth + 1)?;
        }

        Ok(())
    }
}

/// Renders every tree in `store`. Shorthand for [`FlowchartBuilder`].
pub fn render_forest<S: MessageStore>(
    store: &S,
    selected: Option<MessageId>,
    compact: bool,
) -> Result<Block> {
    FlowchartBuilder::new()
        .compact(compact)
        .selected(selected)
        .build(store)
}

/// The double-ruled title shown above a flowchart, followed by a blank line.
pub fn banner() -> Block {
    let accent = Emphasis::new(Tone::Accent).bold();
    let rule = "═".repeat(BANNER_WIDTH);
    let left = 10;
    let right = BANNER_WIDTH - left - BANNER_TITLE.len();

    let mut block = Block::new();
    block.push(Span::styled(format!("╔{rule}╗"), accent));
    block.push(Span::styled(
        format!("║{}{BANNER_TITLE}{}║", " ".repeat(left), " ".repeat(right)),
        accent,
    ));
    block.push(Span::styled(format!("╚{rule}╝"), accent));
    block.push(Line::new());
    block
}
