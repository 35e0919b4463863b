//! Node types: Index, NodeFlags, Node.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::meta::HashedName;
use crate::object::ObjectId;

/// Index of a node inside a [`Tree`](super::Tree).
///
/// Stable for the lifetime of the node. Freed indices are reused by later
/// insertions.
pub type Index = u32;

/// Index of the root node every tree is created with. The root node has no object.
pub const ROOT_INDEX: Index = 0;

/// Sentinel for "no node".
pub const NULL_INDEX: Index = Index::MAX;

/// Child index list. Most nodes have a handful of children.
pub type Children = SmallVec<[Index; 6]>;

bitflags! {
    /// Role flags of a node. The tree stores them; it attaches no behaviour to them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u16 {
        const MOUSE_HANDLER = 1;
        const KEY_HANDLER = 1 << 1;
        const DRAW_HANDLER = 1 << 2;
    }
}

/// One entry of the node arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) object: Option<ObjectId>,
    pub(crate) id: HashedName,
    pub(crate) parent: Index,
    pub(crate) enabled: bool,
    pub(crate) visible: bool,
    pub(crate) flags: NodeFlags,
    pub(crate) children: Children,
    pub(crate) live: bool,
}

impl Node {
    pub(crate) fn new(
        object: Option<ObjectId>,
        id: HashedName,
        parent: Index,
        flags: NodeFlags,
    ) -> Self {
        Self {
            object,
            id,
            parent,
            enabled: true,
            visible: true,
            flags,
            children: Children::new(),
            live: true,
        }
    }

    /// Reset to the free state. Keeps the children allocation for reuse.
    pub(crate) fn clear(&mut self) {
        self.object = None;
        self.id = 0;
        self.parent = NULL_INDEX;
        self.enabled = false;
        self.visible = false;
        self.flags = NodeFlags::empty();
        self.children.clear();
        self.live = false;
    }

    /// The object this node represents. `None` for the root node.
    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    /// Application-chosen name. Not unique.
    pub fn id(&self) -> HashedName {
        self.id
    }

    /// Parent index, or [`NULL_INDEX`].
    pub fn parent(&self) -> Index {
        self.parent
    }

    /// Whether the node is linked under a parent node.
    pub fn has_parent(&self) -> bool {
        self.parent != NULL_INDEX
    }

    /// Disabled nodes stop event propagation.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hidden nodes stop render propagation.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Role flags of the node.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Child indices in insertion order.
    pub fn children(&self) -> &[Index] {
        &self.children
    }

    /// Whether the slot holds a node (as opposed to sitting on the free list).
    pub fn is_live(&self) -> bool {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::hash;

    #[test]
    fn new_defaults() {
        let node = Node::new(None, hash("a"), ROOT_INDEX, NodeFlags::KEY_HANDLER);
        assert_eq!(node.object(), None);
        assert_eq!(node.id(), hash("a"));
        assert_eq!(node.parent(), ROOT_INDEX);
        assert!(node.has_parent());
        assert!(node.is_enabled());
        assert!(node.is_visible());
        assert_eq!(node.flags(), NodeFlags::KEY_HANDLER);
        assert!(node.children().is_empty());
        assert!(node.is_live());
    }

    #[test]
    fn clear_resets() {
        let mut node = Node::new(None, hash("a"), 3, NodeFlags::all());
        node.children.push(4);
        node.clear();
        assert_eq!(node.id(), 0);
        assert_eq!(node.parent(), NULL_INDEX);
        assert!(!node.has_parent());
        assert!(node.children().is_empty());
        assert!(node.flags().is_empty());
        assert!(!node.is_live());
    }

    #[test]
    fn flags_combine() {
        let flags = NodeFlags::MOUSE_HANDLER | NodeFlags::DRAW_HANDLER;
        assert!(flags.contains(NodeFlags::MOUSE_HANDLER));
        assert!(!flags.contains(NodeFlags::KEY_HANDLER));
        assert_eq!(NodeFlags::default(), NodeFlags::empty());
    }
}
