use crate::message::MessageId;

/// Error type for traversal, wrapping and store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("message {child} references missing parent {parent}")]
    DanglingParent { child: MessageId, parent: MessageId },
    #[error("ancestry of message {start} does not reach a root within {limit} steps")]
    CycleDetected { start: MessageId, limit: usize },
    #[error("invalid width: {0}")]
    InvalidWidth(usize),
    #[error("duplicate message id: {0}")]
    DuplicateId(MessageId),
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a backend error from a [`MessageStore`](crate::MessageStore).
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Store(Box::new(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
