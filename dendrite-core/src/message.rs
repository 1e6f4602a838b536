use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::Tone;

/// Identifier of a message within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        MessageId(id)
    }
}

impl FromStr for MessageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(MessageId)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Icon shown in box headers and outline labels.
    pub fn icon(self) -> &'static str {
        match self {
            Speaker::User => "👤",
            Speaker::Assistant => "🤖",
        }
    }

    /// Capitalised name, e.g. `User`.
    pub fn title(self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        }
    }

    /// Lower-case name as stored, e.g. `user`.
    pub fn as_str(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Speaker::User => Tone::User,
            Speaker::Assistant => Tone::Assistant,
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "assistant" => Ok(Speaker::Assistant),
            _ => Err(format!("unknown speaker: {}", s)),
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation forest.
///
/// Messages reference their parent by id. A message without a parent is the
/// root of its own tree; children are discovered through the store, never
/// held directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub parent_id: Option<MessageId>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub speaker: Speaker,
    pub content: String,
}

impl Message {
    /// Creates a root message stamped with the current time.
    pub fn root(id: u64, speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            id: MessageId(id),
            parent_id: None,
            timestamp: Utc::now(),
            speaker,
            content: content.into(),
        }
    }

    /// Creates a reply to `parent` stamped with the current time.
    pub fn reply(id: u64, parent: u64, speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            parent_id: Some(MessageId(parent)),
            ..Self::root(id, speaker, content)
        }
    }

    /// Replaces the timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// `HH:MM`, as shown in boxes and outline labels.
    pub fn short_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
