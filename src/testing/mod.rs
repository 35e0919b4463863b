//! Test helpers: plain-text dumps of trees for snapshot assertions.
//!
//! Use [`render_tree`] to turn a [`Tree`](crate::tree::Tree) into an indented
//! outline that can be compared with `insta` inline snapshots.

pub mod snapshot;

pub use snapshot::render_tree;
