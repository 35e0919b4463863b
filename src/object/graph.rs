//! ObjectGraph: owner of objects, trees and slot tables.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use super::cache::ConnectionCache;
use super::component::Component;
use super::signals::OBJECT_SIGNALS;
use crate::config::GraphConfig;
use crate::dispatch::{SlotTable, TableId};
use crate::error::GraphError;
use crate::meta::{find_signal, HashedName, Signal};
use crate::tree::{Index, Tree};

new_key_type! {
    /// Identifies an object of an [`ObjectGraph`]. Copy, lightweight (u64).
    pub struct ObjectId;

    /// Identifies a [`Tree`] owned by an [`ObjectGraph`].
    pub struct TreeId;
}

/// Where an attached object lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Membership {
    pub tree: TreeId,
    pub index: Index,
}

#[derive(Default)]
pub(crate) struct ObjectData {
    pub(crate) cache: Option<Box<ConnectionCache>>,
    pub(crate) membership: Option<Membership>,
    pub(crate) component: Option<Box<dyn Component>>,
}

/// The context every object, tree and slot table lives in.
///
/// Objects are addressed by [`ObjectId`]. An object starts out bare (no
/// connection cache, no tree membership) and grows a cache on its first
/// connection. Trees refer to objects by id and objects to trees by
/// [`Membership`]; neither owns the other.
///
/// The graph is single-threaded. Slots receive `&mut ObjectGraph` and may
/// mutate anything, including the object that is emitting.
pub struct ObjectGraph {
    pub(crate) objects: SlotMap<ObjectId, ObjectData>,
    pub(crate) trees: SlotMap<TreeId, Tree>,
    pub(crate) tables: SlotMap<TableId, SlotTable>,
    default_table: TableId,
    config: GraphConfig,
}

impl ObjectGraph {
    /// Create a graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        let mut tables = SlotMap::with_key();
        let default_table = tables.insert(SlotTable::with_capacity(config.slot_capacity));
        Self {
            objects: SlotMap::with_key(),
            trees: SlotMap::with_key(),
            tables,
            default_table,
            config,
        }
    }

    /// The configuration the graph was created with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Create a bare object.
    pub fn create(&mut self) -> ObjectId {
        self.objects.insert(ObjectData::default())
    }

    /// Create an object carrying `component`.
    pub fn create_with(&mut self, component: impl Component) -> ObjectId {
        self.objects.insert(ObjectData {
            component: Some(Box::new(component)),
            ..ObjectData::default()
        })
    }

    /// Destroy an object.
    ///
    /// Releases every handle the object registered or owns, then detaches it
    /// from its tree. Child objects are moved under the tree root or destroyed
    /// with it, depending on the tree's orphan policy. Returns `false` if the
    /// object did not exist.
    pub fn destroy(&mut self, object: ObjectId) -> bool {
        if !self.objects.contains_key(object) {
            return false;
        }
        self.disconnect_all(object);
        if self.is_attached(object) {
            self.unlink(object, Release::Destroy, true);
        }
        // Slots run by the detach may have connected to this object again.
        self.disconnect_all(object);
        self.objects.remove(object);
        log::debug!("destroyed {object:?}");
        true
    }

    /// Whether `object` is alive.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.objects.contains_key(object)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no object.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The component of `object`, if it has one of type `C`.
    pub fn component<C: Component>(&self, object: ObjectId) -> Option<&C> {
        self.objects
            .get(object)?
            .component
            .as_deref()?
            .as_any()
            .downcast_ref::<C>()
    }

    /// Mutable access to the component of `object`, if it has one of type `C`.
    pub fn component_mut<C: Component>(&mut self, object: ObjectId) -> Option<&mut C> {
        self.objects
            .get_mut(object)?
            .component
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<C>()
    }

    /// Replace the component of `object`. Returns `false` if the object does
    /// not exist.
    ///
    /// Member slots connected for another component type go stale and are
    /// pruned on their next emission.
    pub fn set_component(&mut self, object: ObjectId, component: impl Component) -> bool {
        match self.objects.get_mut(object) {
            Some(data) => {
                data.component = Some(Box::new(component));
                true
            }
            None => false,
        }
    }

    /// Resolve a signal name for `object`: the component's signals first, then
    /// the built-in object signals. Returns [`Signal::NULL`] on a miss.
    pub fn find_signal(&self, object: ObjectId, name: HashedName) -> Signal {
        let own = self
            .objects
            .get(object)
            .and_then(|data| data.component.as_deref())
            .map(|component| find_signal(component.signals(), name))
            .filter(|signal| signal.is_valid());
        own.unwrap_or_else(|| find_signal(OBJECT_SIGNALS, name))
    }

    /// The connection cache of `object`, if one was allocated.
    pub fn connection_cache(&self, object: ObjectId) -> Option<&ConnectionCache> {
        self.objects.get(object)?.cache.as_deref()
    }

    // -----------------------------------------------------------------------
    // Trees
    // -----------------------------------------------------------------------

    /// Create an empty tree using the configured capacity and orphan policy.
    pub fn create_tree(&mut self) -> TreeId {
        let tree = Tree::with_capacity(self.config.tree_capacity)
            .with_orphan_policy(self.config.orphan_policy);
        self.trees.insert(tree)
    }

    /// A tree of this graph, if it exists.
    pub fn tree(&self, tree: TreeId) -> Option<&Tree> {
        self.trees.get(tree)
    }

    /// Mutable access to a tree, e.g. to clear its dirty flags.
    ///
    /// Removing or moving object nodes through this reference bypasses
    /// notifications; objects whose node is removed are treated as detached.
    pub fn tree_mut(&mut self, tree: TreeId) -> Option<&mut Tree> {
        self.trees.get_mut(tree)
    }

    // -----------------------------------------------------------------------
    // Slot tables
    // -----------------------------------------------------------------------

    /// The table objects use unless [`ObjectGraph::set_slot_table`] says otherwise.
    pub fn default_slot_table(&self) -> TableId {
        self.default_table
    }

    /// Create an additional slot table.
    pub fn create_slot_table(&mut self) -> TableId {
        self.tables
            .insert(SlotTable::with_capacity(self.config.slot_capacity))
    }

    /// A slot table of this graph, if it exists.
    pub fn slot_table(&self, table: TableId) -> Option<&SlotTable> {
        self.tables.get(table)
    }

    /// Store the future connections of `object` in `table`.
    ///
    /// Existing connections keep working: handles remember their table.
    pub fn set_slot_table(&mut self, object: ObjectId, table: TableId) -> Result<(), GraphError> {
        if !self.objects.contains_key(object) {
            return Err(GraphError::UnknownObject(object));
        }
        if !self.tables.contains_key(table) {
            return Err(GraphError::UnknownSlotTable(table));
        }
        self.ensure_cache(object).set_table(table);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    pub(crate) fn cache_mut(&mut self, object: ObjectId) -> Option<&mut ConnectionCache> {
        self.objects.get_mut(object)?.cache.as_deref_mut()
    }

    /// The cache of `object`, allocated on first use.
    ///
    /// # Panics
    ///
    /// Panics if `object` does not exist.
    pub(crate) fn ensure_cache(&mut self, object: ObjectId) -> &mut ConnectionCache {
        let table = self.default_table;
        self.objects[object]
            .cache
            .get_or_insert_with(|| Box::new(ConnectionCache::new(table)))
    }

    /// Run `f` on the component of `object`, if any.
    pub(crate) fn with_component(&mut self, object: ObjectId, f: impl FnOnce(&mut dyn Component)) {
        if let Some(component) = self
            .objects
            .get_mut(object)
            .and_then(|data| data.component.as_deref_mut())
        {
            f(component);
        }
    }
}

/// What happens to child objects when their parent leaves the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    Detach,
    Destroy,
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectGraph")
            .field("objects", &self.objects.len())
            .field("trees", &self.trees.len())
            .field("tables", &self.tables.len())
            .field("config", &self.config)
            .finish()
    }
}
