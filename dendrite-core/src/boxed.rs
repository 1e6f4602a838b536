//! Bordered message boxes.
//!
//! ```text
//! ┌───────────────────────┐
//! │ 👤 USER                │
//! │ 09:41 (ID:1)          │
//! ├───────────────────────┤
//! │ Hello                 │
//! └───────────────────────┘
//! ```

use std::num::NonZeroUsize;

use crate::error::{Error, Result};
use crate::message::Message;
use crate::text::{Block, Emphasis, Line, Span, Tone};
use crate::wrap::Wrap;

/// Content budget for detailed boxes.
pub const DEFAULT_MAX_WIDTH: usize = 50;
/// Content budget for compact boxes.
pub const COMPACT_MAX_WIDTH: usize = 30;
/// Boxes are never narrower than this.
pub const MIN_BOX_WIDTH: usize = 25;

/// Columns taken by `│ ` and ` │`.
const BORDER_WIDTH: usize = 4;
/// Width lost to the trailing `...` when a compact box is truncated.
const ELLIPSIS_RESERVE: usize = 7;
/// Compact boxes show at most this many content lines.
const COMPACT_LINES: usize = 2;

/// Sizing and truncation policy for message boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxLayout {
    max_width: usize,
    compact: bool,
}

impl BoxLayout {
    /// A detailed layout with a custom content budget.
    ///
    /// Budgets must leave room for the borders and the compact ellipsis;
    /// anything below 8 is rejected.
    pub fn new(max_width: usize) -> Result<Self> {
        if max_width <= ELLIPSIS_RESERVE {
            return Err(Error::InvalidWidth(max_width));
        }
        Ok(Self {
            max_width,
            compact: false,
        })
    }

    /// The stock layout for the given mode: 50 columns, or 30 when compact.
    pub fn for_mode(compact: bool) -> Self {
        let max_width = if compact {
            COMPACT_MAX_WIDTH
        } else {
            DEFAULT_MAX_WIDTH
        };
        Self { max_width, compact }
    }

    /// Switches truncation to at most two content lines.
    pub fn compact(self, compact: bool) -> Self {
        Self { compact, ..self }
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    fn wrap_width(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_width - BORDER_WIDTH).unwrap_or(NonZeroUsize::MIN)
    }

    fn content_lines(&self, content: &str) -> Vec<String> {
        let wrapped = Wrap::new(content, self.wrap_width());
        if !self.compact {
            return wrapped.collect();
        }

        let mut lines: Vec<String> = wrapped.take(COMPACT_LINES + 1).collect();
        if lines.len() > COMPACT_LINES {
            lines.truncate(COMPACT_LINES);
            let keep = self.max_width - ELLIPSIS_RESERVE;
            if let Some(last) = lines.last_mut() {
                if last.chars().count() > keep {
                    *last = last.chars().take(keep).collect::<String>() + "...";
                }
            }
        }
        lines
    }
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::for_mode(false)
    }
}

/// Renders `message` as a bordered box.
///
/// Every line of the result has the same number of characters. Borders and
/// the header take the speaker's tone, bold when `selected`.
pub fn render_box(message: &Message, layout: &BoxLayout, selected: bool) -> Block {
    let frame = {
        let emphasis = Emphasis::new(message.speaker.tone());
        if selected { emphasis.bold() } else { emphasis }
    };
    let muted = Emphasis::new(Tone::Muted);

    let header = format!(
        "{} {}",
        message.speaker.icon(),
        message.speaker.as_str().to_uppercase()
    );
    let timestamp = format!("{} (ID:{})", message.short_time(), message.id);
    let content = layout.content_lines(&message.content);

    let widest = content
        .iter()
        .map(|line| line.chars().count())
        .chain([header.chars().count(), timestamp.chars().count()])
        .max()
        .unwrap_or(0);
    let width = (widest + BORDER_WIDTH).max(MIN_BOX_WIDTH);

    let rule = "─".repeat(width - 2);
    let row = |text: &str, emphasis: Emphasis| {
        let padding = width - BORDER_WIDTH - text.chars().count();
        Line::new()
            .with(Span::styled("│ ", frame))
            .with(Span::styled(text, emphasis))
            .with(Span::plain(" ".repeat(padding)))
            .with(Span::styled(" │", frame))
    };

    let mut block = Block::new();
    block.push(Span::styled(format!("┌{}┐", rule), frame));
    block.push(row(&header, frame));
    block.push(row(&timestamp, muted));
    block.push(Span::styled(format!("├{}┤", rule), frame));
    for line in &content {
        block.push(row(line, Emphasis::PLAIN));
    }
    block.push(Span::styled(format!("└{}┘", rule), frame));
    block
}
