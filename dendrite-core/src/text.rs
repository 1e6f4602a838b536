//! Styled text produced by the renderers.
//!
//! A [`Block`] is a list of [`Line`]s, each made of [`Span`]s. Emphasis is
//! metadata only: the plain text of a block is fully determined by its span
//! texts, and a plain-text consumer can ignore styling entirely.

use std::fmt;

/// Colour family of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    #[default]
    Plain,
    User,
    Assistant,
    /// Timestamps, dividers and other secondary text.
    Muted,
    /// Banners and headings.
    Accent,
}

/// Visual emphasis attached to a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Emphasis {
    pub tone: Tone,
    pub bold: bool,
}

impl Emphasis {
    pub const PLAIN: Emphasis = Emphasis {
        tone: Tone::Plain,
        bold: false,
    };

    pub fn new(tone: Tone) -> Self {
        Self { tone, bold: false }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Emphasis::PLAIN)
    }

    pub fn styled(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a span. Empty spans are dropped.
    pub fn push(&mut self, span: Span) {
        if !span.text.is_empty() {
            self.spans.push(span);
        }
    }

    /// Builder form of [`Line::push`].
    pub fn with(mut self, span: Span) -> Self {
        self.push(span);
        self
    }

    /// Returns this line with `span` inserted before all existing spans.
    pub fn prefixed(mut self, span: Span) -> Self {
        if !span.text.is_empty() {
            self.spans.insert(0, span);
        }
        self
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }

    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Line::new().with(span)
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::from(Span::plain(text))
    }
}

/// A rendered text block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<Line>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, other: Block) {
        self.lines.extend(other.lines);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Plain text, one `\n`-terminated row per line.
    pub fn plain(&self) -> String {
        self.to_string()
    }

    /// Plain text of each line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain).collect()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            for span in &line.spans {
                f.write_str(&span.text)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spans_are_dropped() {
        let line = Line::new()
            .with(Span::plain(""))
            .with(Span::plain("a"))
            .prefixed(Span::plain(""));
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn char_len_counts_chars_not_bytes() {
        let line = Line::from("┌──┐");
        assert_eq!(line.char_len(), 4);
        assert_eq!(line.plain().len(), 12);
    }

    #[test]
    fn block_display_terminates_every_line() {
        let mut block = Block::new();
        block.push("one");
        block.push(Line::new());
        block.push(Line::from(Span::styled("two", Emphasis::new(Tone::User).bold())));

        assert_eq!(block.plain(), "one\n\ntwo\n");
        assert_eq!(block.plain_lines(), vec!["one", "", "two"]);
    }
}
