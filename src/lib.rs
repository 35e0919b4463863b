//! # object-graph
//!
//! An object-graph runtime: objects that live in index-addressed trees, find
//! each other by name, and notify each other through signals and slots.
//!
//! Every object, tree and slot table is owned by an [`ObjectGraph`]. Objects
//! are addressed by generational [`ObjectId`]s and slots by generational
//! [`Handle`]s, so neither side of a connection holds a reference into the
//! other's storage. Connections whose receiver is gone are pruned the next
//! time their signal fires.
//!
//! ## Core Systems
//!
//! - **[`meta`]**: Hashed names, signal descriptors, slot arguments
//! - **[`dispatch`]**: Slot tables storing callables behind handles
//! - **[`tree`]**: Node arena with free-list reuse and scoped lookup
//! - **[`object`]**: Object graph: connections, emission, tree membership
//! - **[`config`]**: Graph configuration
//! - **[`error`]**: Errors of the checked entry points
//! - **[`testing`]**: Plain-text tree dumps for snapshot tests
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use object_graph::meta::{hash, Var};
//! use object_graph::object::{ObjectGraph, CHILDREN_COUNT_CHANGED};
//! use object_graph::tree::ROOT_INDEX;
//!
//! let mut graph = ObjectGraph::new();
//! let tree = graph.create_tree();
//! let window = graph.create();
//! let button = graph.create();
//! graph.attach(window, tree, ROOT_INDEX, hash("window"));
//!
//! let count = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&count);
//! graph.connect(window, CHILDREN_COUNT_CHANGED, move |graph: &mut ObjectGraph, _: &[Var]| {
//!     seen.set(graph.children_count(window));
//! });
//!
//! graph.set_parent_with_id(button, window, hash("ok"));
//! assert_eq!(count.get(), 1);
//! assert_eq!(graph.find(window, hash("ok")), Some(button));
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod meta;

// Storage
pub mod dispatch;
pub mod tree;

// Objects
pub mod object;

// Test support
pub mod testing;

pub use config::GraphConfig;
pub use dispatch::Handle;
pub use error::GraphError;
pub use meta::{hash, HashedName, Signal, Var};
pub use object::{Component, ObjectGraph, ObjectId, TreeId};
