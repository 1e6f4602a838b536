use std::path::Path;

use chrono::{Duration, Utc};
use dendrite_core::{MemoryStore, Message, Speaker};

use crate::error::DndError;

/// Opens the message file, or the sample conversation when there is none.
pub fn open_store(path: Option<&Path>) -> Result<MemoryStore, DndError> {
    match path {
        Some(path) => load_messages(path),
        None => Ok(MemoryStore::from_messages(sample_messages())?),
    }
}

/// Reads a JSON array of messages, keeping file order.
pub fn load_messages(path: &Path) -> Result<MemoryStore, DndError> {
    let content = std::fs::read_to_string(path)?;
    let messages: Vec<Message> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = messages.len(), "loaded messages");
    Ok(MemoryStore::from_messages(messages)?)
}

/// A small branching conversation: one question, then two follow-ups that
/// take the chat in different directions.
pub fn sample_messages() -> Vec<Message> {
    let turns = [
        (1, None, Speaker::User, "Hello, can you help me with Python?"),
        (
            2,
            Some(1),
            Speaker::Assistant,
            "Of course! I'd be happy to help with Python. What specific topic do you need help with?",
        ),
        (3, Some(2), Speaker::User, "How do I read a file?"),
        (
            4,
            Some(3),
            Speaker::Assistant,
            "You can use the open() function with a context manager:\n\nwith open(\"file.txt\", \"r\") as f:\n    content = f.read()",
        ),
        (5, Some(2), Speaker::User, "Actually, can you help with lists instead?"),
        (
            6,
            Some(5),
            Speaker::Assistant,
            "Sure! Lists in Python are versatile data structures. You can create them with square brackets: my_list = [1, 2, 3]",
        ),
        (7, Some(6), Speaker::User, "How do I add items to a list?"),
        (
            8,
            Some(7),
            Speaker::Assistant,
            "You can use append() to add items: my_list.append(4), or extend() for multiple items, or insert() for specific positions.",
        ),
    ];

    let start = Utc::now() - Duration::minutes(turns.len() as i64);
    turns
        .into_iter()
        .enumerate()
        .map(|(i, (id, parent, speaker, content))| {
            let message = match parent {
                Some(parent) => Message::reply(id, parent, speaker, content),
                None => Message::root(id, speaker, content),
            };
            message.at(start + Duration::minutes(i as i64))
        })
        .collect()
}
