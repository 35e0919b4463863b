//! Node arena: index-addressed object tree with free-list reuse and scoped
//! name lookup.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{Children, Index, Node, NodeFlags, NULL_INDEX, ROOT_INDEX};
pub use tree::{OrphanPolicy, Tree, DEFAULT_CAPACITY};
