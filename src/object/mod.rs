//! Objects: connection caches, tree membership and the graph that owns them.
//!
//! Every operation on an object goes through the [`ObjectGraph`] that created
//! it:
//!
//! - **connections**: `connect*`, `disconnect*`, `emit*`, `invoke`;
//! - **hierarchy**: `set_parent*`, `attach`, `detach`, `find`, `find_global`
//!   and the node accessors;
//! - **lifecycle**: `create*`, `destroy`.

pub mod cache;
pub mod component;
pub mod connection;
pub mod graph;
pub mod hierarchy;
pub mod signals;

pub use cache::{ConnectionCache, ConnectionEntry};
pub use component::Component;
pub use graph::{Membership, ObjectGraph, ObjectId, TreeId};
pub use signals::{
    CHILDREN_COUNT_CHANGED, ENABLED_CHANGED, ID_CHANGED, OBJECT_SIGNALS, PARENT_CHANGED,
    VISIBLE_CHANGED,
};
