//! Greedy word wrapping.

use std::num::NonZeroUsize;
use std::str::SplitWhitespace;

use crate::error::{Error, Result};

/// Wraps `text` into lines of at most `width` characters.
///
/// Words are separated by any whitespace, newlines included, and joined by a
/// single space. A word longer than `width` gets a line of its own and is
/// not split. Text without words yields a single empty line.
///
/// Widths are character counts, not terminal columns.
pub fn wrap(text: &str, width: usize) -> Result<Wrap<'_>> {
    let width = NonZeroUsize::new(width).ok_or(Error::InvalidWidth(width))?;
    Ok(Wrap::new(text, width))
}

/// Collects [`wrap`] into owned lines.
pub fn wrap_lines(text: &str, width: usize) -> Result<Vec<String>> {
    Ok(wrap(text, width)?.collect())
}

/// Lazy iterator over wrapped lines. See [`wrap`].
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    words: SplitWhitespace<'a>,
    /// Word that overflowed the previous line.
    carry: Option<&'a str>,
    width: usize,
    emitted: bool,
    done: bool,
}

impl<'a> Wrap<'a> {
    pub(crate) fn new(text: &'a str, width: NonZeroUsize) -> Self {
        Self {
            words: text.split_whitespace(),
            carry: None,
            width: width.get(),
            emitted: false,
            done: false,
        }
    }
}

impl Iterator for Wrap<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut line = String::new();
        let mut length = 0;
        let mut count = 0;

        loop {
            let Some(word) = self.carry.take().or_else(|| self.words.next()) else {
                self.done = true;
                if count == 0 && self.emitted {
                    return None;
                }
                self.emitted = true;
                return Some(line);
            };

            let word_length = word.chars().count();
            // `count` stands in for the separating spaces already on the line.
            if count == 0 || length + word_length + count <= self.width {
                if count > 0 {
                    line.push(' ');
                }
                line.push_str(word);
                length += word_length;
                count += 1;
            } else {
                self.carry = Some(word);
                self.emitted = true;
                return Some(line);
            }
        }
    }
}

impl std::iter::FusedIterator for Wrap<'_> {}
