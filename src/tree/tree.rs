//! Tree operations: add, remove, reparent, flag updates, walks.

use super::node::{Index, Node, NodeFlags, NULL_INDEX, ROOT_INDEX};
use crate::meta::HashedName;
use crate::object::ObjectId;

/// Number of node slots reserved by [`Tree::new`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// What happens to the children of a removed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Former children move under [`ROOT_INDEX`], keeping their own subtrees.
    #[default]
    ReparentToRoot,
    /// The whole subtree is removed with the node.
    Cascade,
}

/// A tree of nodes stored in one vector for fast scans.
///
/// Indices are stable for a node's lifetime; references into the tree are
/// invalidated by any structural mutation. Index `0` is a root node without
/// object, present from construction until the tree is dropped.
///
/// Three dirty flags record that something changed since a consumer last
/// cleared them: the topology (or ids and role flags), the enabled states and
/// the visible states. The tree only ever sets them.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    free_list: Vec<Index>,
    orphan_policy: OrphanPolicy,
    tree_dirty: bool,
    enabled_dirty: bool,
    visible_dirty: bool,
}

impl Tree {
    /// Create a tree with [`DEFAULT_CAPACITY`] reserved slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a tree reserving room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(None, 0, NULL_INDEX, NodeFlags::empty()));
        Self {
            nodes,
            free_list: Vec::new(),
            orphan_policy: OrphanPolicy::default(),
            tree_dirty: false,
            enabled_dirty: false,
            visible_dirty: false,
        }
    }

    /// Set the orphan policy (builder).
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// The policy applied to the children of removed nodes.
    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Change the policy applied to the children of removed nodes.
    pub fn set_orphan_policy(&mut self, policy: OrphanPolicy) {
        self.orphan_policy = policy;
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, and (debug) if it is on the free list.
    pub fn get(&self, index: Index) -> &Node {
        let node = &self.nodes[index as usize];
        debug_assert!(node.live, "node {index} is not live");
        node
    }

    /// Mutable access to a node. Same preconditions as [`Tree::get`].
    ///
    /// Mutating through this reference does not set any dirty flag.
    pub fn get_mut(&mut self, index: Index) -> &mut Node {
        let node = &mut self.nodes[index as usize];
        debug_assert!(node.live, "node {index} is not live");
        node
    }

    /// Checked access: `None` for free or out-of-range indices.
    pub fn try_get(&self, index: Index) -> Option<&Node> {
        self.nodes.get(index as usize).filter(|node| node.live)
    }

    /// Whether `index` refers to a live node.
    pub fn contains(&self, index: Index) -> bool {
        self.try_get(index).is_some()
    }

    /// Add a node under `parent`, reusing a freed index when one is available.
    ///
    /// With [`NULL_INDEX`] as `parent` the node is parentless: it is live and
    /// addressable but not linked into the tree. Never invalidates an
    /// existing index.
    pub fn add(
        &mut self,
        parent: Index,
        object: Option<ObjectId>,
        id: HashedName,
        flags: NodeFlags,
    ) -> Index {
        debug_assert!(
            parent == NULL_INDEX || self.contains(parent),
            "parent node {parent} is not live"
        );
        let node = Node::new(object, id, parent, flags);
        let index = match self.free_list.pop() {
            Some(index) => {
                self.nodes[index as usize] = node;
                index
            }
            None => {
                let index = Index::try_from(self.nodes.len())
                    .ok()
                    .filter(|&index| index != NULL_INDEX)
                    .expect("tree index space exhausted");
                self.nodes.push(node);
                index
            }
        };
        if parent != NULL_INDEX {
            self.nodes[parent as usize].children.push(index);
        }
        self.set_all_dirty_flags();
        index
    }

    /// Remove a node and put its index on the free list.
    ///
    /// Former children are handled by the [`OrphanPolicy`]. The root node
    /// cannot be removed.
    pub fn remove(&mut self, index: Index) {
        assert_ne!(index, ROOT_INDEX, "the root node cannot be removed");
        debug_assert!(self.contains(index), "node {index} is not live");

        self.unlink(index);
        let children = std::mem::take(&mut self.nodes[index as usize].children);
        match self.orphan_policy {
            OrphanPolicy::ReparentToRoot => {
                for &child in &children {
                    self.nodes[child as usize].parent = ROOT_INDEX;
                }
                self.nodes[ROOT_INDEX as usize]
                    .children
                    .extend(children.iter().copied());
            }
            OrphanPolicy::Cascade => {
                let mut stack: Vec<Index> = children.to_vec();
                while let Some(current) = stack.pop() {
                    let node = &mut self.nodes[current as usize];
                    stack.extend(node.children.iter().copied());
                    node.clear();
                    self.free_list.push(current);
                }
            }
        }
        self.nodes[index as usize].clear();
        self.free_list.push(index);
        self.set_all_dirty_flags();
    }

    /// Move `index` (with its subtree) under `parent`. The node keeps its id.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` is `index` itself or one of its descendants.
    pub fn set_parent(&mut self, index: Index, parent: Index) {
        debug_assert!(self.contains(index), "node {index} is not live");
        debug_assert!(self.contains(parent), "parent node {parent} is not live");
        debug_assert!(
            index != parent && !self.is_ancestor(index, parent),
            "reparenting node {index} under {parent} would create a cycle"
        );

        self.unlink(index);
        self.nodes[index as usize].parent = parent;
        self.nodes[parent as usize].children.push(index);
        self.set_all_dirty_flags();
    }

    /// Rename a node.
    pub fn set_id(&mut self, index: Index, id: HashedName) {
        self.get_mut(index).id = id;
        self.tree_dirty = true;
    }

    /// Replace a node's role flags.
    pub fn set_flags(&mut self, index: Index, flags: NodeFlags) {
        self.get_mut(index).flags = flags;
        self.tree_dirty = true;
    }

    /// Change a node's enabled state and set the enabled dirty flag.
    pub fn set_enabled(&mut self, index: Index, enabled: bool) {
        self.get_mut(index).enabled = enabled;
        self.enabled_dirty = true;
    }

    /// Change a node's visible state and set the visible dirty flag.
    pub fn set_visible(&mut self, index: Index, visible: bool) {
        self.get_mut(index).visible = visible;
        self.visible_dirty = true;
    }

    /// Whether `ancestor` is a strict ancestor of `index`.
    pub fn is_ancestor(&self, ancestor: Index, index: Index) -> bool {
        let mut current = self.get(index).parent;
        while current != NULL_INDEX {
            if current == ancestor {
                return true;
            }
            current = self.get(current).parent;
        }
        false
    }

    /// Ancestors of `index`, nearest first, ending at the root node.
    pub fn ancestors(&self, index: Index) -> Vec<Index> {
        let mut result = Vec::new();
        let mut current = self.get(index).parent;
        while current != NULL_INDEX {
            result.push(current);
            current = self.get(current).parent;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: Index) -> Vec<Index> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let Some(node) = self.try_get(current) else {
                continue;
            };
            result.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        result
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether the tree holds nothing but its root node.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Number of slots, live or free.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over `(index, node)` for every live node, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.live)
            .map(|(index, node)| (index as Index, node))
    }

    /// Whether topology, ids or role flags changed since the flag was cleared.
    pub fn is_tree_dirty(&self) -> bool {
        self.tree_dirty
    }

    /// Set or clear the topology dirty flag.
    pub fn set_tree_dirty_flag(&mut self, value: bool) {
        self.tree_dirty = value;
    }

    /// Whether an enabled state changed since the flag was cleared.
    pub fn is_enabled_dirty(&self) -> bool {
        self.enabled_dirty
    }

    /// Set or clear the enabled dirty flag.
    pub fn set_enabled_dirty_flag(&mut self, value: bool) {
        self.enabled_dirty = value;
    }

    /// Whether a visible state changed since the flag was cleared.
    pub fn is_visible_dirty(&self) -> bool {
        self.visible_dirty
    }

    /// Set or clear the visible dirty flag.
    pub fn set_visible_dirty_flag(&mut self, value: bool) {
        self.visible_dirty = value;
    }

    /// Clear all three dirty flags.
    pub fn clear_dirty_flags(&mut self) {
        self.tree_dirty = false;
        self.enabled_dirty = false;
        self.visible_dirty = false;
    }

    fn set_all_dirty_flags(&mut self) {
        self.tree_dirty = true;
        self.enabled_dirty = true;
        self.visible_dirty = true;
    }

    /// Detach `index` from its parent's children list.
    fn unlink(&mut self, index: Index) {
        let parent = self.nodes[index as usize].parent;
        if parent != NULL_INDEX {
            self.nodes[parent as usize]
                .children
                .retain(|child| *child != index);
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
