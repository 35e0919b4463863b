//! Name lookup: global scan and scoped search.

use super::node::{Index, NULL_INDEX, ROOT_INDEX};
use super::tree::Tree;
use crate::meta::HashedName;

impl Tree {
    /// Find the first live node named `id`, in index order.
    ///
    /// Ids may collide; the lowest index wins regardless of depth. The root
    /// node never matches. Returns [`NULL_INDEX`] on a miss.
    pub fn find(&self, id: HashedName) -> Index {
        self.iter()
            .find(|&(index, node)| index != ROOT_INDEX && node.id() == id)
            .map_or(NULL_INDEX, |(index, _)| index)
    }

    /// Find a node named `id` visible from `from`.
    ///
    /// Tests `from` itself, then its direct children, then walks up: each
    /// ancestor is tested, followed by that ancestor's direct children. Deeper
    /// descendants of `from` or of its ancestors are never searched. First
    /// match wins; returns [`NULL_INDEX`] on a miss.
    pub fn find_in_scope(&self, id: HashedName, from: Index) -> Index {
        if self.matches(from, id) {
            return from;
        }
        if let Some(child) = self.find_child(from, id) {
            return child;
        }
        let mut current = self.get(from).parent();
        while current != NULL_INDEX {
            if self.matches(current, id) {
                return current;
            }
            if let Some(child) = self.find_child(current, id) {
                return child;
            }
            current = self.get(current).parent();
        }
        NULL_INDEX
    }

    fn find_child(&self, index: Index, id: HashedName) -> Option<Index> {
        self.get(index)
            .children()
            .iter()
            .copied()
            .find(|&child| self.matches(child, id))
    }

    fn matches(&self, index: Index, id: HashedName) -> bool {
        index != ROOT_INDEX && self.get(index).id() == id
    }
}
