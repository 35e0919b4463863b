//! SlotTable: storage of slot callables keyed by generational handles.
//!
//! The table owns every callable connected through it. Invocation is driven by
//! [`ObjectGraph::invoke`](crate::object::ObjectGraph::invoke): the callable is
//! checked out of its entry for the duration of the call, so the call itself may
//! borrow the whole graph (including this table) mutably.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::meta::Var;
use crate::object::{Component, ObjectGraph, ObjectId};

new_key_type! {
    /// Key of one callable inside a [`SlotTable`].
    pub struct SlotKey;

    /// Identifies a [`SlotTable`] owned by an [`ObjectGraph`].
    pub struct TableId;
}

/// Opaque token for one connected callable.
///
/// Removing the callable invalidates the handle for good: a later insertion
/// into the same slot produces a different handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    table: TableId,
    key: SlotKey,
}

impl Handle {
    pub(crate) fn new(table: TableId, key: SlotKey) -> Self {
        Self { table, key }
    }

    /// The table holding the callable.
    pub fn table(self) -> TableId {
        self.table
    }

    /// The key of the callable inside its table.
    pub fn key(self) -> SlotKey {
        self.key
    }
}

/// A stored callable.
pub enum Callable {
    /// Receives the whole graph.
    Free(Box<dyn FnMut(&mut ObjectGraph, &[Var])>),
    /// Receives the component of the entry's receiver. Returns `false` when the
    /// component is not of the type the slot was connected with.
    Member(Box<dyn FnMut(&mut dyn Component, &[Var]) -> bool>),
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Free(_) => f.write_str("Callable::Free"),
            Callable::Member(_) => f.write_str("Callable::Member"),
        }
    }
}

/// Result of [`SlotTable::checkout`].
#[derive(Debug)]
pub enum Checkout {
    /// No entry for the key: the handle is stale.
    Missing,
    /// The callable is already checked out by an invocation further up the stack.
    Busy,
    /// The callable, moved out of its entry, and the receiver it is bound to.
    Ready {
        callable: Callable,
        receiver: Option<ObjectId>,
    },
}

struct SlotEntry {
    receiver: Option<ObjectId>,
    /// `None` while checked out.
    callable: Option<Callable>,
}

/// A table of slot callables.
pub struct SlotTable {
    slots: SlotMap<SlotKey, SlotEntry>,
}

impl SlotTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    /// Create an empty table with room for `capacity` callables.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Store a callable, optionally bound to a receiver object.
    pub fn insert(&mut self, receiver: Option<ObjectId>, callable: Callable) -> SlotKey {
        self.slots.insert(SlotEntry {
            receiver,
            callable: Some(callable),
        })
    }

    /// Drop the callable behind `key`. Returns `false` if it was already gone.
    ///
    /// Removing a checked-out callable is allowed; it is dropped once its
    /// invocation returns.
    pub fn remove(&mut self, key: SlotKey) -> bool {
        self.slots.remove(key).is_some()
    }

    /// Whether `key` still resolves to a callable.
    pub fn contains(&self, key: SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    /// The receiver the callable behind `key` is bound to.
    pub fn receiver(&self, key: SlotKey) -> Option<ObjectId> {
        self.slots.get(key).and_then(|entry| entry.receiver)
    }

    /// Move the callable out of its entry for invocation.
    pub fn checkout(&mut self, key: SlotKey) -> Checkout {
        match self.slots.get_mut(key) {
            None => Checkout::Missing,
            Some(entry) => match entry.callable.take() {
                None => Checkout::Busy,
                Some(callable) => Checkout::Ready {
                    callable,
                    receiver: entry.receiver,
                },
            },
        }
    }

    /// Return a checked-out callable to its entry.
    ///
    /// If the entry was removed while the callable was out, the callable is
    /// dropped instead.
    pub fn checkin(&mut self, key: SlotKey, callable: Callable) {
        if let Some(entry) = self.slots.get_mut(key) {
            debug_assert!(entry.callable.is_none(), "slot {key:?} was not checked out");
            entry.callable = Some(callable);
        }
    }

    /// Number of stored callables.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table holds no callable.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SlotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotTable")
            .field("len", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callable {
        Callable::Free(Box::new(|_: &mut ObjectGraph, _: &[Var]| {}))
    }

    fn object_id() -> ObjectId {
        let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
        ids.insert(())
    }

    #[test]
    fn new_table_is_empty() {
        let table = SlotTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn insert_and_remove() {
        let mut table = SlotTable::with_capacity(4);
        let key = table.insert(None, noop());
        assert!(table.contains(key));
        assert_eq!(table.len(), 1);
        assert!(table.remove(key));
        assert!(!table.contains(key));
        assert!(!table.remove(key));
    }

    #[test]
    fn removed_key_is_never_reused() {
        let mut table = SlotTable::new();
        let first = table.insert(None, noop());
        table.remove(first);
        let second = table.insert(None, noop());
        assert_ne!(first, second);
        assert!(!table.contains(first));
        assert!(matches!(table.checkout(first), Checkout::Missing));
    }

    #[test]
    fn receiver_binding() {
        let mut table = SlotTable::new();
        let receiver = object_id();
        let bound = table.insert(Some(receiver), noop());
        let unbound = table.insert(None, noop());
        assert_eq!(table.receiver(bound), Some(receiver));
        assert_eq!(table.receiver(unbound), None);
    }

    #[test]
    fn checkout_marks_busy_until_checkin() {
        let mut table = SlotTable::new();
        let key = table.insert(None, noop());
        let Checkout::Ready { callable, receiver } = table.checkout(key) else {
            panic!("expected a ready callable");
        };
        assert_eq!(receiver, None);
        assert!(matches!(table.checkout(key), Checkout::Busy));
        table.checkin(key, callable);
        assert!(matches!(table.checkout(key), Checkout::Ready { .. }));
    }

    #[test]
    fn checkin_after_remove_drops_callable() {
        let mut table = SlotTable::new();
        let key = table.insert(None, noop());
        let Checkout::Ready { callable, .. } = table.checkout(key) else {
            panic!("expected a ready callable");
        };
        assert!(table.remove(key));
        table.checkin(key, callable);
        assert!(!table.contains(key));
        assert!(table.is_empty());
    }

    #[test]
    fn debug_output() {
        let mut table = SlotTable::new();
        table.insert(None, noop());
        assert_eq!(format!("{table:?}"), "SlotTable { len: 1 }");
        assert_eq!(format!("{:?}", noop()), "Callable::Free");
    }
}
