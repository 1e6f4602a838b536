use dendrite_core::MessageId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DndError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse message file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] dendrite_core::Error),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),
}
