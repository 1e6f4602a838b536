//! Dendrite renders branching conversation histories as text.
//!
//! Core concepts:
//! - **Message**: one turn of a conversation, optionally replying to a parent
//! - **MessageStore**: read access to messages by id, as roots, or as children
//! - **Path**: the chain of messages from a root down to one message
//! - **Flowchart**: every tree of a store drawn as boxes joined by tree guides
//! - **Block**: rendered output, lines of spans carrying optional emphasis
//!
//! # Example
//!
//! ```
//! use dendrite_core::{MemoryStore, Message, MessageId, MessageStore, Speaker};
//! use dendrite_core::{render_forest, resolve_path};
//!
//! let store = MemoryStore::from_messages([
//!     Message::root(1, Speaker::User, "Hello"),
//!     Message::reply(2, 1, Speaker::Assistant, "Hi there"),
//! ])
//! .unwrap();
//!
//! let leaf = store.get_by_id(MessageId(2)).unwrap().unwrap();
//! let path = resolve_path(&leaf, &store).unwrap();
//! assert_eq!(path.len(), 2);
//!
//! let chart = render_forest(&store, Some(MessageId(2)), false).unwrap();
//! assert!(chart.plain().contains("└── ┌"));
//! ```
//!
//! # Widths
//!
//! All widths are counted in characters, not terminal columns. The speaker
//! icons are emoji that most terminals draw two columns wide, so box borders
//! on header lines may appear shifted by one column.

mod boxed;
mod error;
mod flowchart;
mod message;
mod outline;
mod path;
mod store;
mod text;
mod wrap;

pub use boxed::{BoxLayout, COMPACT_MAX_WIDTH, DEFAULT_MAX_WIDTH, MIN_BOX_WIDTH, render_box};
pub use error::{Error, Result};
pub use flowchart::{DIVIDER_WIDTH, FlowchartBuilder, Placement, banner, render_forest};
pub use message::{Message, MessageId, Speaker};
pub use outline::{LABEL_MAX_CHARS, OUTLINE_TITLE, message_label, render_detail, render_outline};
pub use path::{render_path, resolve_path};
pub use store::{MemoryStore, MessageStore};
pub use text::{Block, Emphasis, Line, Span, Tone};
pub use wrap::{Wrap, wrap, wrap_lines};
