use thiserror::Error;

use crate::Item;

/// The collection being ordered, as seen from the engine.
///
/// The host owns the items. The engine only reads a snapshot through
/// [`list_items`](Self::list_items) and moves items with
/// [`swap_to_position`](Self::swap_to_position); it never holds on to them
/// between passes. Merged items must already be deduplicated.
pub trait BufferHost {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The current items, in their current order.
    fn list_items(&self) -> Result<Vec<Item>, Self::Error>;

    /// Exchange the item identified by `id` with the item at 1-based
    /// `position`.
    fn swap_to_position(&mut self, id: &str, position: usize) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no item with id '{0}'")]
    UnknownItem(String),

    #[error("position {position} out of range for {len} items")]
    PositionOutOfRange { position: usize, len: usize },
}

/// An in-memory host with transposition semantics.
///
/// Useful for tests, dry runs, and for hosts that keep their own list and
/// only want the final order.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    items: Vec<Item>,
}

impl MemoryHost {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Build a host whose ids are the names themselves.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Item::new).collect())
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(Item::name).collect()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl BufferHost for MemoryHost {
    type Error = HostError;

    fn list_items(&self) -> Result<Vec<Item>, Self::Error> {
        Ok(self.items.clone())
    }

    fn swap_to_position(&mut self, id: &str, position: usize) -> Result<(), Self::Error> {
        let len = self.items.len();
        if position == 0 || position > len {
            return Err(HostError::PositionOutOfRange { position, len });
        }
        let current = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| HostError::UnknownItem(id.to_owned()))?;
        self.items.swap(current, position - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_a_transposition() {
        let mut host = MemoryHost::from_names(["a", "b", "c", "d"]);
        host.swap_to_position("d", 1).unwrap();
        assert_eq!(host.names(), ["d", "b", "c", "a"]);
    }

    #[test]
    fn swap_with_self_is_noop() {
        let mut host = MemoryHost::from_names(["a", "b"]);
        host.swap_to_position("b", 2).unwrap();
        assert_eq!(host.names(), ["a", "b"]);
    }

    #[test]
    fn swap_rejects_bad_position() {
        let mut host = MemoryHost::from_names(["a"]);
        assert_eq!(
            host.swap_to_position("a", 0),
            Err(HostError::PositionOutOfRange { position: 0, len: 1 })
        );
        assert_eq!(
            host.swap_to_position("a", 2),
            Err(HostError::PositionOutOfRange { position: 2, len: 1 })
        );
    }

    #[test]
    fn swap_rejects_unknown_id() {
        let mut host = MemoryHost::from_names(["a"]);
        assert_eq!(
            host.swap_to_position("z", 1),
            Err(HostError::UnknownItem("z".into()))
        );
    }

    #[test]
    fn push_and_remove() {
        let mut host = MemoryHost::default();
        host.push(Item::new("core.weechat"));
        host.push(Item::new("irc.server.libera"));
        assert!(host.remove("core.weechat").is_some());
        assert!(host.remove("core.weechat").is_none());
        assert_eq!(host.names(), ["irc.server.libera"]);
    }
}
