//! Per-object connection bookkeeping.

use smallvec::SmallVec;

use crate::dispatch::{Handle, TableId};
use crate::meta::Signal;

/// One connection registered on an emitter: fire `handle` when `signal` is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionEntry {
    pub signal: Signal,
    pub handle: Handle,
}

/// Connection cache of one object, allocated on first connection.
///
/// - `registered`: entries to invoke when this object emits, in connection
///   order. Their handles are released when the object is destroyed.
/// - `owned`: handles this object receives through another object's
///   connection. Also released when this object is destroyed, so no slot
///   outlives its receiver.
#[derive(Debug, Clone)]
pub struct ConnectionCache {
    registered: Vec<ConnectionEntry>,
    owned: SmallVec<[Handle; 4]>,
    table: TableId,
}

impl ConnectionCache {
    pub(crate) fn new(table: TableId) -> Self {
        Self {
            registered: Vec::new(),
            owned: SmallVec::new(),
            table,
        }
    }

    /// Slot table new connections of this object are stored in.
    pub fn table(&self) -> TableId {
        self.table
    }

    pub(crate) fn set_table(&mut self, table: TableId) {
        self.table = table;
    }

    /// Registered entries in connection order.
    pub fn registered(&self) -> &[ConnectionEntry] {
        &self.registered
    }

    /// Handles owned as a receiver.
    pub fn owned(&self) -> &[Handle] {
        &self.owned
    }

    /// Whether the cache records nothing.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty() && self.owned.is_empty()
    }

    pub(crate) fn register(&mut self, signal: Signal, handle: Handle) {
        self.registered.push(ConnectionEntry { signal, handle });
    }

    pub(crate) fn own(&mut self, handle: Handle) {
        self.owned.push(handle);
    }

    /// Forget one owned handle. Returns `false` if it was not owned.
    pub(crate) fn disown(&mut self, handle: Handle) -> bool {
        match self.owned.iter().position(|owned| *owned == handle) {
            Some(position) => {
                self.owned.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Remove the first entry matching `(signal, handle)`.
    pub(crate) fn unregister(&mut self, signal: Signal, handle: Handle) -> bool {
        let entry = ConnectionEntry { signal, handle };
        match self.registered.iter().position(|e| *e == entry) {
            Some(position) => {
                self.registered.remove(position);
                true
            }
            None => false,
        }
    }

    /// Remove every entry of `signal`, returning their handles.
    pub(crate) fn unregister_signal(&mut self, signal: Signal) -> Vec<Handle> {
        let mut handles = Vec::new();
        self.registered.retain(|entry| {
            if entry.signal == signal {
                handles.push(entry.handle);
                false
            } else {
                true
            }
        });
        handles
    }

    /// Handles of every entry of `signal`, in connection order.
    pub(crate) fn matching(&self, signal: Signal) -> SmallVec<[Handle; 8]> {
        self.registered
            .iter()
            .filter(|entry| entry.signal == signal)
            .map(|entry| entry.handle)
            .collect()
    }

    /// Drop the entries of `signal` whose handle is in `stale`, in one
    /// compaction pass. Returns the number of entries removed.
    pub(crate) fn prune(&mut self, signal: Signal, stale: &[Handle]) -> usize {
        let before = self.registered.len();
        self.registered
            .retain(|entry| entry.signal != signal || !stale.contains(&entry.handle));
        before - self.registered.len()
    }

    /// Empty the cache, returning owned handles followed by registered ones.
    /// The same handle may appear more than once.
    pub(crate) fn take_all(&mut self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self.owned.drain(..).collect();
        handles.extend(self.registered.drain(..).map(|entry| entry.handle));
        handles
    }
}
