//! Graph configuration.

use crate::tree::{OrphanPolicy, DEFAULT_CAPACITY};

/// Configuration of an [`ObjectGraph`](crate::object::ObjectGraph).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Node slots reserved by every tree the graph creates.
    pub tree_capacity: usize,
    /// Callables reserved by every slot table the graph creates.
    pub slot_capacity: usize,
    /// Orphan policy of every tree the graph creates.
    pub orphan_policy: OrphanPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            tree_capacity: DEFAULT_CAPACITY,
            slot_capacity: 64,
            orphan_policy: OrphanPolicy::ReparentToRoot,
        }
    }
}

impl GraphConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tree capacity (builder).
    pub fn with_tree_capacity(mut self, capacity: usize) -> Self {
        self.tree_capacity = capacity;
        self
    }

    /// Set the slot table capacity (builder).
    pub fn with_slot_capacity(mut self, capacity: usize) -> Self {
        self.slot_capacity = capacity;
        self
    }

    /// Set the orphan policy (builder).
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }
}
