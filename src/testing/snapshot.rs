//! Tree dump helpers.
//!
//! Functions for converting a tree into a plain-text outline suitable for
//! snapshot testing and assertions.

use std::fmt::Write;

use crate::meta::hash;
use crate::tree::{Tree, ROOT_INDEX};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a tree as an indented outline, one node per line.
///
/// Node ids are shown by name when they hash to one of `names`, otherwise as
/// hex. The root node prints as `<root>`. Disabled and hidden nodes are
/// marked. Lines are separated by `'\n'`; the final line has no trailing
/// newline.
///
/// # Examples
///
/// ```
/// use object_graph::meta::hash;
/// use object_graph::testing::render_tree;
/// use object_graph::tree::{NodeFlags, Tree, ROOT_INDEX};
///
/// let mut tree = Tree::new();
/// tree.add(ROOT_INDEX, None, hash("window"), NodeFlags::empty());
/// assert_eq!(render_tree(&tree, &["window"]), "<root>\n  window");
/// ```
pub fn render_tree(tree: &Tree, names: &[&str]) -> String {
    let mut out = String::new();
    let mut stack = vec![(ROOT_INDEX, 0usize)];
    while let Some((index, depth)) = stack.pop() {
        let Some(node) = tree.try_get(index) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&"  ".repeat(depth));
        if index == ROOT_INDEX {
            out.push_str("<root>");
        } else {
            match names.iter().find(|name| hash(name) == node.id()) {
                Some(name) => out.push_str(name),
                None => {
                    let _ = write!(out, "{:#010x}", node.id());
                }
            }
            if !node.is_enabled() {
                out.push_str(" [disabled]");
            }
            if !node.is_visible() {
                out.push_str(" [hidden]");
            }
        }
        stack.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
