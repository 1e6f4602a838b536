use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::style::{Attribute, Color, ContentStyle};
use dendrite_core::{Block, Emphasis, Tone};

fn style_for(emphasis: Emphasis) -> ContentStyle {
    let mut style = ContentStyle::new();
    match emphasis.tone {
        Tone::Plain => {}
        Tone::User => style.foreground_color = Some(Color::Cyan),
        Tone::Assistant => style.foreground_color = Some(Color::Green),
        Tone::Muted => style.attributes.set(Attribute::Dim),
        Tone::Accent => style.foreground_color = Some(Color::Blue),
    }
    if emphasis.bold {
        style.attributes.set(Attribute::Bold);
    }
    style
}

/// Renders a block as terminal text, with ANSI styling when `color` is set.
pub fn to_terminal(block: &Block, color: bool) -> String {
    if !color {
        return block.plain();
    }

    let mut out = String::new();
    for line in &block.lines {
        for span in &line.spans {
            if span.emphasis == Emphasis::PLAIN {
                out.push_str(&span.text);
            } else {
                let _ = write!(out, "{}", style_for(span.emphasis).apply(&span.text));
            }
        }
        out.push('\n');
    }
    out
}

pub fn print_block(block: &Block, color: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(to_terminal(block, color).as_bytes())?;
    stdout.flush()
}
