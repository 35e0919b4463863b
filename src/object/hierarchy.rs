//! Tree membership of objects: attach, reparent, detach, node accessors and
//! scoped lookup.
//!
//! An object's membership is only trusted while the node it points at is live
//! and still refers back to the object. Anything else reads as detached.

use super::graph::{Membership, ObjectGraph, ObjectId, Release, TreeId};
use super::signals::{
    CHILDREN_COUNT_CHANGED, ENABLED_CHANGED, ID_CHANGED, PARENT_CHANGED, VISIBLE_CHANGED,
};
use crate::error::GraphError;
use crate::meta::HashedName;
use crate::tree::{Index, Node, NodeFlags, OrphanPolicy, NULL_INDEX, ROOT_INDEX};

impl ObjectGraph {
    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Where `object` is attached, if anywhere.
    pub fn membership(&self, object: ObjectId) -> Option<Membership> {
        let membership = self.objects.get(object)?.membership?;
        let node = self.trees.get(membership.tree)?.try_get(membership.index)?;
        (node.object() == Some(object)).then_some(membership)
    }

    /// Whether `object` is attached to a tree.
    pub fn is_attached(&self, object: ObjectId) -> bool {
        self.membership(object).is_some()
    }

    /// The tree `object` is attached to.
    pub fn tree_of(&self, object: ObjectId) -> Option<TreeId> {
        self.membership(object).map(|membership| membership.tree)
    }

    /// Node index of `object`, or [`NULL_INDEX`] when detached.
    pub fn index_of(&self, object: ObjectId) -> Index {
        self.membership(object)
            .map_or(NULL_INDEX, |membership| membership.index)
    }

    /// The object at `index` of `tree`.
    pub fn object_at(&self, tree: TreeId, index: Index) -> Option<ObjectId> {
        self.trees.get(tree)?.try_get(index)?.object()
    }

    fn node(&self, object: ObjectId) -> Option<&Node> {
        let membership = self.membership(object)?;
        Some(self.trees[membership.tree].get(membership.index))
    }

    fn attached_node(&self, object: ObjectId) -> &Node {
        self.node(object)
            .unwrap_or_else(|| panic!("object {object:?} is not attached to a tree"))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The parent object. `None` when detached or attached directly under the
    /// tree's root node.
    pub fn parent(&self, object: ObjectId) -> Option<ObjectId> {
        let membership = self.membership(object)?;
        let tree = &self.trees[membership.tree];
        tree.try_get(tree.get(membership.index).parent())?.object()
    }

    /// Whether `object` has a parent object.
    pub fn has_parent(&self, object: ObjectId) -> bool {
        self.parent(object).is_some()
    }

    /// Like [`ObjectGraph::parent`], for an object known to be attached.
    ///
    /// # Panics
    ///
    /// Panics if `object` is detached.
    pub fn parent_unchecked(&self, object: ObjectId) -> Option<ObjectId> {
        assert!(
            self.is_attached(object),
            "object {object:?} is not attached to a tree"
        );
        self.parent(object)
    }

    /// Node id of `object`; `0` when detached.
    pub fn id(&self, object: ObjectId) -> HashedName {
        self.node(object).map_or(0, Node::id)
    }

    /// Node id of an object known to be attached.
    ///
    /// # Panics
    ///
    /// Panics if `object` is detached.
    pub fn id_unchecked(&self, object: ObjectId) -> HashedName {
        self.attached_node(object).id()
    }

    /// Enabled state of `object`; `false` when detached.
    pub fn enabled(&self, object: ObjectId) -> bool {
        self.node(object).is_some_and(Node::is_enabled)
    }

    /// Enabled state of an object known to be attached.
    ///
    /// # Panics
    ///
    /// Panics if `object` is detached.
    pub fn enabled_unchecked(&self, object: ObjectId) -> bool {
        self.attached_node(object).is_enabled()
    }

    /// Visible state of `object`; `false` when detached.
    pub fn visible(&self, object: ObjectId) -> bool {
        self.node(object).is_some_and(Node::is_visible)
    }

    /// Visible state of an object known to be attached.
    ///
    /// # Panics
    ///
    /// Panics if `object` is detached.
    pub fn visible_unchecked(&self, object: ObjectId) -> bool {
        self.attached_node(object).is_visible()
    }

    /// Role flags of `object`; empty when detached.
    pub fn flags(&self, object: ObjectId) -> NodeFlags {
        self.node(object).map_or(NodeFlags::empty(), Node::flags)
    }

    /// Number of child nodes of `object`; `0` when detached.
    pub fn children_count(&self, object: ObjectId) -> usize {
        self.node(object).map_or(0, |node| node.children().len())
    }

    /// The object of the `position`-th child node of `object`.
    pub fn child(&self, object: ObjectId, position: usize) -> Option<ObjectId> {
        let membership = self.membership(object)?;
        let tree = &self.trees[membership.tree];
        let index = *tree.get(membership.index).children().get(position)?;
        tree.get(index).object()
    }

    /// Child objects of `object`, in child order.
    pub fn children(&self, object: ObjectId) -> Vec<ObjectId> {
        let Some(membership) = self.membership(object) else {
            return Vec::new();
        };
        let tree = &self.trees[membership.tree];
        tree.get(membership.index)
            .children()
            .iter()
            .filter_map(|&index| tree.get(index).object())
            .collect()
    }

    /// Find the object named `id` in the scope of `object`: itself, its
    /// children, then each ancestor and that ancestor's children.
    pub fn find(&self, object: ObjectId, id: HashedName) -> Option<ObjectId> {
        let membership = self.membership(object)?;
        let tree = &self.trees[membership.tree];
        tree.try_get(tree.find_in_scope(id, membership.index))?
            .object()
    }

    /// Find the first object named `id` anywhere in the tree of `object`.
    pub fn find_global(&self, object: ObjectId, id: HashedName) -> Option<ObjectId> {
        let tree = &self.trees[self.tree_of(object)?];
        tree.try_get(tree.find(id))?.object()
    }

    // -----------------------------------------------------------------------
    // Node state
    // -----------------------------------------------------------------------

    /// Rename `object`, emitting `ID_CHANGED` if the id changed.
    /// Returns `false` when detached or unchanged.
    pub fn set_id(&mut self, object: ObjectId, id: HashedName) -> bool {
        let Some(membership) = self.membership(object) else {
            return false;
        };
        let tree = &mut self.trees[membership.tree];
        if tree.get(membership.index).id() == id {
            return false;
        }
        tree.set_id(membership.index, id);
        self.emit(object, ID_CHANGED, &[]);
        true
    }

    /// Enable or disable `object`, emitting `ENABLED_CHANGED` if the state
    /// changed. Returns `false` when detached or unchanged.
    pub fn set_enabled(&mut self, object: ObjectId, enabled: bool) -> bool {
        let Some(membership) = self.membership(object) else {
            return false;
        };
        let tree = &mut self.trees[membership.tree];
        if tree.get(membership.index).is_enabled() == enabled {
            return false;
        }
        tree.set_enabled(membership.index, enabled);
        self.emit(object, ENABLED_CHANGED, &[]);
        true
    }

    /// Show or hide `object`, emitting `VISIBLE_CHANGED` if the state
    /// changed. Returns `false` when detached or unchanged.
    pub fn set_visible(&mut self, object: ObjectId, visible: bool) -> bool {
        let Some(membership) = self.membership(object) else {
            return false;
        };
        let tree = &mut self.trees[membership.tree];
        if tree.get(membership.index).is_visible() == visible {
            return false;
        }
        tree.set_visible(membership.index, visible);
        self.emit(object, VISIBLE_CHANGED, &[]);
        true
    }

    /// Replace the role flags of `object`. No signal is emitted. Returns `false`
    /// when detached or unchanged.
    pub fn set_flags(&mut self, object: ObjectId, flags: NodeFlags) -> bool {
        let Some(membership) = self.membership(object) else {
            return false;
        };
        let tree = &mut self.trees[membership.tree];
        if tree.get(membership.index).flags() == flags {
            return false;
        }
        tree.set_flags(membership.index, flags);
        true
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Make `parent` the parent of `object`, keeping the object's id.
    ///
    /// A detached object is added to the parent's tree; an object in another
    /// tree is detached from it first.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is detached, or is `object` or one of its descendants.
    pub fn set_parent(&mut self, object: ObjectId, parent: ObjectId) {
        let target = self.parent_slot(parent);
        self.place(object, target, None);
    }

    /// Like [`ObjectGraph::set_parent`], also renaming `object` to `id`.
    pub fn set_parent_with_id(&mut self, object: ObjectId, parent: ObjectId, id: HashedName) {
        let target = self.parent_slot(parent);
        self.place(object, target, Some(id));
    }

    /// Attach `object` as `id` under node `parent` of `tree`. Use
    /// [`ROOT_INDEX`] to attach at the top of the tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree does not exist, `parent` is not live, or the move
    /// would create a cycle.
    pub fn attach(&mut self, object: ObjectId, tree: TreeId, parent: Index, id: HashedName) {
        self.place(object, Membership { tree, index: parent }, Some(id));
    }

    /// Checked variant of [`ObjectGraph::attach`]. A parent node inside the
    /// object's own subtree is reported as [`GraphError::InvalidIndex`].
    pub fn try_attach(
        &mut self,
        object: ObjectId,
        tree: TreeId,
        parent: Index,
        id: HashedName,
    ) -> Result<(), GraphError> {
        if !self.contains(object) {
            return Err(GraphError::UnknownObject(object));
        }
        let Some(target) = self.trees.get(tree) else {
            return Err(GraphError::UnknownTree(tree));
        };
        if !target.contains(parent) {
            return Err(GraphError::InvalidIndex(parent));
        }
        if let Some(current) = self.membership(object) {
            if current.tree == tree
                && (current.index == parent || target.is_ancestor(current.index, parent))
            {
                return Err(GraphError::InvalidIndex(parent));
            }
        }
        self.attach(object, tree, parent, id);
        Ok(())
    }

    /// Remove `object` from its tree.
    ///
    /// Child objects are moved under the tree root or detached with it,
    /// depending on the tree's orphan policy.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not attached.
    pub fn detach(&mut self, object: ObjectId) {
        assert!(
            self.is_attached(object),
            "object {object:?} is not attached to a tree"
        );
        self.unlink(object, Release::Detach, true);
    }

    /// Checked variant of [`ObjectGraph::detach`].
    pub fn try_detach(&mut self, object: ObjectId) -> Result<(), GraphError> {
        if !self.contains(object) {
            return Err(GraphError::UnknownObject(object));
        }
        if !self.is_attached(object) {
            return Err(GraphError::NotAttached(object));
        }
        self.unlink(object, Release::Detach, true);
        Ok(())
    }

    fn parent_slot(&self, parent: ObjectId) -> Membership {
        self.membership(parent)
            .unwrap_or_else(|| panic!("parent {parent:?} is not attached to a tree"))
    }

    fn place(&mut self, object: ObjectId, target: Membership, id: Option<HashedName>) {
        assert!(self.contains(object), "object {object:?} does not exist");
        assert!(
            self.trees
                .get(target.tree)
                .is_some_and(|tree| tree.contains(target.index)),
            "parent node {} of {:?} is not live",
            target.index,
            target.tree
        );

        match self.membership(object) {
            Some(current) if current.tree == target.tree => {
                self.move_within(object, current, target.index, id);
            }
            Some(current) => {
                let id = id.unwrap_or_else(|| self.trees[current.tree].get(current.index).id());
                self.unlink(object, Release::Detach, false);
                self.insert(object, target, id);
            }
            None => self.insert(object, target, id.unwrap_or(0)),
        }
    }

    fn move_within(
        &mut self,
        object: ObjectId,
        current: Membership,
        parent: Index,
        id: Option<HashedName>,
    ) {
        let tree = &mut self.trees[current.tree];
        assert!(
            current.index != parent && !tree.is_ancestor(current.index, parent),
            "moving {object:?} under node {parent} would create a cycle"
        );

        let renamed = match id {
            Some(id) if id != tree.get(current.index).id() => {
                tree.set_id(current.index, id);
                true
            }
            _ => false,
        };

        let old_parent = tree.get(current.index).parent();
        if old_parent != parent {
            let old_object = tree.get(old_parent).object();
            tree.set_parent(current.index, parent);
            let new_object = tree.get(parent).object();
            log::debug!("moved {object:?} from node {old_parent} to node {parent}");
            self.notify_parent_changed(object, old_object, new_object, true);
        }
        if renamed {
            self.emit(object, ID_CHANGED, &[]);
        }
    }

    fn insert(&mut self, object: ObjectId, target: Membership, id: HashedName) {
        let tree = &mut self.trees[target.tree];
        let index = tree.add(target.index, Some(object), id, NodeFlags::empty());
        let parent = tree.get(target.index).object();
        self.objects[object].membership = Some(Membership {
            tree: target.tree,
            index,
        });
        log::debug!("attached {object:?} at node {index} of {:?}", target.tree);
        self.notify_parent_changed(object, None, parent, true);
    }

    /// Take `object` out of its tree. `notify_self` controls the object's own
    /// hook and `PARENT_CHANGED`; the old parent is always notified.
    pub(crate) fn unlink(&mut self, object: ObjectId, release: Release, notify_self: bool) {
        self.release_children(object, release);

        // Slots run while releasing the children may have moved the object.
        let Some(membership) = self.membership(object) else {
            return;
        };
        let tree = &mut self.trees[membership.tree];
        let parent_index = tree.get(membership.index).parent();
        let parent = tree.try_get(parent_index).and_then(Node::object);
        tree.remove(membership.index);
        if let Some(data) = self.objects.get_mut(object) {
            data.membership = None;
        }
        log::debug!("detached {object:?} from {:?}", membership.tree);
        self.notify_parent_changed(object, parent, None, notify_self);
    }

    fn release_children(&mut self, object: ObjectId, release: Release) {
        let Some(membership) = self.membership(object) else {
            return;
        };
        let tree = &self.trees[membership.tree];
        let children: Vec<Index> = tree.get(membership.index).children().to_vec();
        if children.is_empty() {
            return;
        }
        let child_objects: Vec<ObjectId> = children
            .iter()
            .filter_map(|&index| tree.get(index).object())
            .collect();

        match tree.orphan_policy() {
            OrphanPolicy::ReparentToRoot => {
                let tree = &mut self.trees[membership.tree];
                for &child in &children {
                    tree.set_parent(child, ROOT_INDEX);
                }
                for &child in &child_objects {
                    self.with_component(object, |component| component.on_child_removed(child));
                    self.with_component(child, |component| component.on_parent_changed(None));
                }
                self.emit(object, CHILDREN_COUNT_CHANGED, &[]);
                for child in child_objects {
                    self.emit(child, PARENT_CHANGED, &[]);
                }
            }
            OrphanPolicy::Cascade => {
                for child in child_objects {
                    if self.parent(child) != Some(object) {
                        continue;
                    }
                    match release {
                        Release::Detach => self.unlink(child, Release::Detach, true),
                        Release::Destroy => {
                            self.destroy(child);
                        }
                    }
                }
            }
        }
    }

    /// Component hooks first, then `CHILDREN_COUNT_CHANGED` on the old and new
    /// parents, then `PARENT_CHANGED` on `object`.
    fn notify_parent_changed(
        &mut self,
        object: ObjectId,
        old_parent: Option<ObjectId>,
        new_parent: Option<ObjectId>,
        notify_self: bool,
    ) {
        if let Some(old_parent) = old_parent {
            self.with_component(old_parent, |component| component.on_child_removed(object));
        }
        if let Some(new_parent) = new_parent {
            self.with_component(new_parent, |component| component.on_child_added(object));
        }
        if notify_self {
            self.with_component(object, |component| component.on_parent_changed(new_parent));
        }
        if let Some(old_parent) = old_parent {
            self.emit(old_parent, CHILDREN_COUNT_CHANGED, &[]);
        }
        if let Some(new_parent) = new_parent {
            self.emit(new_parent, CHILDREN_COUNT_CHANGED, &[]);
        }
        if notify_self {
            self.emit(object, PARENT_CHANGED, &[]);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::GraphConfig;
    use crate::meta::{hash, Signal, Var};
    use crate::object::Component;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records its hook calls into a shared log.
    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Component for Recorder {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn on_child_added(&mut self, _child: ObjectId) {
            self.log.borrow_mut().push(format!("{}.child_added", self.name));
        }
        fn on_child_removed(&mut self, _child: ObjectId) {
            self.log.borrow_mut().push(format!("{}.child_removed", self.name));
        }
        fn on_parent_changed(&mut self, _parent: Option<ObjectId>) {
            self.log.borrow_mut().push(format!("{}.parent_changed", self.name));
        }
    }

    fn recorder(graph: &mut ObjectGraph, name: &'static str, log: &Log) -> ObjectId {
        let object = graph.create_with(Recorder {
            name,
            log: Rc::clone(log),
        });
        for (signal, label) in [
            (PARENT_CHANGED, "parentChanged"),
            (CHILDREN_COUNT_CHANGED, "childrenCountChanged"),
            (ID_CHANGED, "idChanged"),
        ] {
            let log = Rc::clone(log);
            graph.connect(object, signal, move |_: &mut ObjectGraph, _: &[Var]| {
                log.borrow_mut().push(format!("{name}.{label}"));
            });
        }
        object
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn detached_defaults() {
        let mut graph = ObjectGraph::new();
        let object = graph.create();
        assert!(!graph.is_attached(object));
        assert_eq!(graph.parent(object), None);
        assert!(!graph.has_parent(object));
        assert_eq!(graph.id(object), 0);
        assert!(!graph.enabled(object));
        assert!(!graph.visible(object));
        assert_eq!(graph.children_count(object), 0);
        assert_eq!(graph.index_of(object), NULL_INDEX);
        assert!(!graph.set_id(object, hash("x")));
    }

    #[test]
    fn attach_notifies_parent_then_self() {
        let mut graph = ObjectGraph::new();
        let log = Log::default();
        let tree = graph.create_tree();
        let window = recorder(&mut graph, "window", &log);
        let button = recorder(&mut graph, "button", &log);
        graph.attach(window, tree, ROOT_INDEX, hash("window"));
        take(&log);

        graph.set_parent(button, window);
        assert_eq!(
            take(&log),
            vec![
                "window.child_added",
                "button.parent_changed",
                "window.childrenCountChanged",
                "button.parentChanged",
            ]
        );
        assert_eq!(graph.parent(button), Some(window));
        assert_eq!(graph.children(window), vec![button]);
        assert!(graph.enabled(button));
        assert!(graph.visible(button));
    }

    #[test]
    fn reparent_within_tree_order() {
        let mut graph = ObjectGraph::new();
        let log = Log::default();
        let tree = graph.create_tree();
        let a = recorder(&mut graph, "a", &log);
        let b = recorder(&mut graph, "b", &log);
        let child = recorder(&mut graph, "child", &log);
        graph.attach(a, tree, ROOT_INDEX, hash("a"));
        graph.attach(b, tree, ROOT_INDEX, hash("b"));
        graph.set_parent_with_id(child, a, hash("child"));
        let index = graph.index_of(child);
        take(&log);

        graph.set_parent(child, b);
        assert_eq!(
            take(&log),
            vec![
                "a.child_removed",
                "b.child_added",
                "child.parent_changed",
                "a.childrenCountChanged",
                "b.childrenCountChanged",
                "child.parentChanged",
            ]
        );
        assert_eq!(graph.index_of(child), index);
        assert_eq!(graph.id(child), hash("child"));

        // Same parent again: nothing happens.
        graph.set_parent(child, b);
        assert!(take(&log).is_empty());

        graph.set_parent_with_id(child, b, hash("renamed"));
        assert_eq!(take(&log), vec!["child.idChanged"]);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn reparent_under_descendant_panics() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let a = graph.create();
        let b = graph.create();
        graph.attach(a, tree, ROOT_INDEX, hash("a"));
        graph.set_parent(b, a);
        graph.set_parent(a, b);
    }

    #[test]
    fn detach_then_detach_again() {
        let mut graph = ObjectGraph::new();
        let log = Log::default();
        let tree = graph.create_tree();
        let parent = recorder(&mut graph, "parent", &log);
        let child = recorder(&mut graph, "child", &log);
        graph.attach(parent, tree, ROOT_INDEX, hash("parent"));
        graph.set_parent(child, parent);
        take(&log);

        graph.detach(child);
        assert_eq!(
            take(&log),
            vec![
                "parent.child_removed",
                "child.parent_changed",
                "parent.childrenCountChanged",
                "child.parentChanged",
            ]
        );
        assert!(!graph.is_attached(child));
        assert_eq!(graph.children_count(parent), 0);
        assert_eq!(graph.try_detach(child), Err(GraphError::NotAttached(child)));
    }

    #[test]
    #[should_panic(expected = "is not attached to a tree")]
    fn detach_detached_panics() {
        let mut graph = ObjectGraph::new();
        let object = graph.create();
        graph.detach(object);
    }

    #[test]
    #[should_panic(expected = "is not attached to a tree")]
    fn unchecked_accessor_panics_when_detached() {
        let mut graph = ObjectGraph::new();
        let object = graph.create();
        graph.id_unchecked(object);
    }

    #[test]
    fn orphans_move_to_root() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let parent = graph.create();
        let child = graph.create();
        let grandchild = graph.create();
        graph.attach(parent, tree, ROOT_INDEX, hash("parent"));
        graph.set_parent_with_id(child, parent, hash("child"));
        graph.set_parent_with_id(grandchild, child, hash("grandchild"));

        graph.destroy(parent);
        assert!(graph.is_attached(child));
        assert_eq!(graph.parent(child), None);
        assert_eq!(graph.parent(grandchild), Some(child));
        assert_eq!(graph.tree(tree).unwrap().len(), 3);
    }

    #[test]
    fn cascade_destroys_subtree() {
        let mut graph =
            ObjectGraph::with_config(GraphConfig::new().with_orphan_policy(OrphanPolicy::Cascade));
        let tree = graph.create_tree();
        let parent = graph.create();
        let child = graph.create();
        let grandchild = graph.create();
        graph.attach(parent, tree, ROOT_INDEX, hash("parent"));
        graph.set_parent(child, parent);
        graph.set_parent(grandchild, child);

        graph.destroy(parent);
        assert!(!graph.contains(child));
        assert!(!graph.contains(grandchild));
        assert!(graph.tree(tree).unwrap().is_empty());
    }

    #[test]
    fn cascade_detach_keeps_objects() {
        let mut graph =
            ObjectGraph::with_config(GraphConfig::new().with_orphan_policy(OrphanPolicy::Cascade));
        let tree = graph.create_tree();
        let parent = graph.create();
        let child = graph.create();
        graph.attach(parent, tree, ROOT_INDEX, hash("parent"));
        graph.set_parent(child, parent);

        graph.detach(parent);
        assert!(graph.contains(child));
        assert!(!graph.is_attached(child));
    }

    #[test]
    fn move_to_other_tree_keeps_id() {
        let mut graph = ObjectGraph::new();
        let first = graph.create_tree();
        let second = graph.create_tree();
        let object = graph.create();
        graph.attach(object, first, ROOT_INDEX, hash("object"));
        let target = graph.create();
        graph.attach(target, second, ROOT_INDEX, hash("target"));

        graph.set_parent(object, target);
        assert_eq!(graph.tree_of(object), Some(second));
        assert_eq!(graph.id(object), hash("object"));
        assert!(graph.tree(first).unwrap().is_empty());
    }

    #[test]
    fn removed_node_reads_as_detached() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let object = graph.create();
        graph.attach(object, tree, ROOT_INDEX, hash("object"));
        let index = graph.index_of(object);

        graph.tree_mut(tree).unwrap().remove(index);
        assert!(!graph.is_attached(object));

        // The freed index is reused by someone else.
        let other = graph.create();
        graph.attach(other, tree, ROOT_INDEX, hash("other"));
        assert_eq!(graph.index_of(other), index);
        assert!(!graph.is_attached(object));
    }

    #[test]
    fn setters_emit_on_change() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let object = graph.create();
        graph.attach(object, tree, ROOT_INDEX, hash("object"));
        let fired: Rc<RefCell<Vec<Signal>>> = Rc::default();
        for signal in [ID_CHANGED, ENABLED_CHANGED, VISIBLE_CHANGED] {
            let fired = Rc::clone(&fired);
            graph.connect(object, signal, move |_: &mut ObjectGraph, _: &[Var]| {
                fired.borrow_mut().push(signal);
            });
        }

        assert!(graph.set_enabled(object, false));
        assert!(!graph.set_enabled(object, false));
        assert!(graph.set_visible(object, false));
        assert!(!graph.set_id(object, hash("object")));
        assert!(graph.set_id(object, hash("renamed")));
        assert!(graph.set_flags(object, NodeFlags::KEY_HANDLER));
        assert_eq!(
            *fired.borrow(),
            vec![ENABLED_CHANGED, VISIBLE_CHANGED, ID_CHANGED]
        );
        assert_eq!(graph.flags(object), NodeFlags::KEY_HANDLER);
        assert!(!graph.enabled_unchecked(object));
    }

    #[test]
    fn scoped_and_global_find() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let window = graph.create();
        let panel = graph.create();
        let save = graph.create();
        let footer = graph.create();
        let status = graph.create();
        graph.attach(window, tree, ROOT_INDEX, hash("window"));
        graph.set_parent_with_id(panel, window, hash("panel"));
        graph.set_parent_with_id(save, panel, hash("save"));
        graph.set_parent_with_id(footer, window, hash("footer"));
        graph.set_parent_with_id(status, footer, hash("status"));

        assert_eq!(graph.find(save, hash("footer")), Some(footer));
        assert_eq!(graph.find(save, hash("status")), None);
        assert_eq!(graph.find_global(save, hash("status")), Some(status));
        assert_eq!(graph.child(window, 1), Some(footer));
        assert_eq!(graph.object_at(tree, graph.index_of(panel)), Some(panel));
    }

    #[test]
    fn try_attach_errors() {
        let mut graph = ObjectGraph::new();
        let tree = graph.create_tree();
        let object = graph.create();
        assert_eq!(
            graph.try_attach(object, tree, 42, hash("x")),
            Err(GraphError::InvalidIndex(42))
        );
        assert_eq!(graph.try_attach(object, tree, ROOT_INDEX, hash("x")), Ok(()));
        let index = graph.index_of(object);
        assert_eq!(
            graph.try_attach(object, tree, index, hash("x")),
            Err(GraphError::InvalidIndex(index))
        );
    }
}
