use std::convert::Infallible;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{Error, Result};
use crate::message::{Message, MessageId};

/// Read access to a collection of messages.
///
/// Implementations return owned snapshots; the renderers never mutate what
/// they receive. Sequences are in insertion order, which is the order
/// siblings are drawn in.
pub trait MessageStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves a message by id, or None if not present.
    fn get_by_id(&self, id: MessageId) -> Result<Option<Message>, Self::Error>;

    /// All messages without a parent.
    fn get_roots(&self) -> Result<Vec<Message>, Self::Error>;

    /// Direct children of `id`.
    fn get_children(&self, id: MessageId) -> Result<Vec<Message>, Self::Error>;

    /// Every message, roots and replies alike.
    fn get_all(&self) -> Result<Vec<Message>, Self::Error>;

    /// Total number of messages. Bounds ancestry walks and recursion depth.
    fn len(&self) -> Result<usize, Self::Error>;

    fn is_empty(&self) -> Result<bool, Self::Error> {
        Ok(self.len()? == 0)
    }
}

impl<S: MessageStore + ?Sized> MessageStore for &S {
    type Error = S::Error;

    fn get_by_id(&self, id: MessageId) -> Result<Option<Message>, Self::Error> {
        (**self).get_by_id(id)
    }

    fn get_roots(&self) -> Result<Vec<Message>, Self::Error> {
        (**self).get_roots()
    }

    fn get_children(&self, id: MessageId) -> Result<Vec<Message>, Self::Error> {
        (**self).get_children(id)
    }

    fn get_all(&self) -> Result<Vec<Message>, Self::Error> {
        (**self).get_all()
    }

    fn len(&self) -> Result<usize, Self::Error> {
        (**self).len()
    }
}

/// An in-memory store that keeps messages in insertion order.
///
/// Parent references are not validated on insert, so dangling or cyclic
/// data can be represented; traversal reports it.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    messages: IndexMap<MessageId, Message>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from messages in the given order.
    pub fn from_messages(messages: impl IntoIterator<Item = Message>) -> Result<Self> {
        let mut store = Self::new();
        for message in messages {
            store.insert(message)?;
        }
        Ok(store)
    }

    /// Appends a message. Ids must be unique.
    pub fn insert(&mut self, message: Message) -> Result<()> {
        match self.messages.entry(message.id) {
            Entry::Occupied(_) => Err(Error::DuplicateId(message.id)),
            Entry::Vacant(slot) => {
                slot.insert(message);
                Ok(())
            }
        }
    }

    /// Removes a message, keeping the order of the rest. Children are left
    /// pointing at the removed id.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        self.messages.shift_remove(&id)
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }
}

impl MessageStore for MemoryStore {
    type Error = Infallible;

    fn get_by_id(&self, id: MessageId) -> Result<Option<Message>, Self::Error> {
        Ok(self.messages.get(&id).cloned())
    }

    fn get_roots(&self) -> Result<Vec<Message>, Self::Error> {
        Ok(self
            .messages
            .values()
            .filter(|m| m.parent_id.is_none())
            .cloned()
            .collect())
    }

    fn get_children(&self, id: MessageId) -> Result<Vec<Message>, Self::Error> {
        Ok(self
            .messages
            .values()
            .filter(|m| m.parent_id == Some(id))
            .cloned()
            .collect())
    }

    fn get_all(&self) -> Result<Vec<Message>, Self::Error> {
        Ok(self.messages.values().cloned().collect())
    }

    fn len(&self) -> Result<usize, Self::Error> {
        Ok(self.messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Speaker;

    fn ids(messages: &[Message]) -> Vec<u64> {
        messages.iter().map(|m| m.id.0).collect()
    }

    #[test]
    fn memory_store_get_by_id() {
        let store = MemoryStore::from_messages([Message::root(1, Speaker::User, "hi")]).unwrap();

        assert_eq!(store.get_by_id(MessageId(1)).unwrap().unwrap().content, "hi");
        assert_eq!(store.get_by_id(MessageId(2)).unwrap(), None);
    }

    #[test]
    fn memory_store_rejects_duplicate_ids() {
        let mut store = MemoryStore::new();
        store.insert(Message::root(1, Speaker::User, "a")).unwrap();

        let err = store.insert(Message::root(1, Speaker::User, "b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(MessageId(1))));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn memory_store_keeps_insertion_order() {
        let store = MemoryStore::from_messages([
            Message::root(9, Speaker::User, "first root"),
            Message::reply(5, 9, Speaker::Assistant, "b"),
            Message::root(2, Speaker::User, "second root"),
            Message::reply(3, 9, Speaker::Assistant, "c"),
            Message::reply(1, 9, Speaker::Assistant, "d"),
        ])
        .unwrap();

        assert_eq!(ids(&store.get_roots().unwrap()), vec![9, 2]);
        assert_eq!(ids(&store.get_children(MessageId(9)).unwrap()), vec![5, 3, 1]);
        assert!(store.get_children(MessageId(2)).unwrap().is_empty());
        assert_eq!(ids(&store.get_all().unwrap()), vec![9, 5, 2, 3, 1]);
    }

    #[test]
    fn memory_store_remove_leaves_children_dangling() {
        let mut store = MemoryStore::from_messages([
            Message::root(1, Speaker::User, "a"),
            Message::reply(2, 1, Speaker::Assistant, "b"),
        ])
        .unwrap();

        assert!(store.remove(MessageId(1)).is_some());
        assert!(store.remove(MessageId(1)).is_none());

        let child = store.get_by_id(MessageId(2)).unwrap().unwrap();
        assert_eq!(child.parent_id, Some(MessageId(1)));
        assert!(store.get_roots().unwrap().is_empty());
    }
}
