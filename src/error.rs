//! Errors of the checked (`try_*`) entry points.
//!
//! The unchecked entry points treat the same conditions as programmer errors
//! and panic.

use crate::dispatch::TableId;
use crate::meta::HashedName;
use crate::object::{ObjectId, TreeId};
use crate::tree::Index;

/// Errors from checked graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("object {0:?} does not exist")]
    UnknownObject(ObjectId),
    #[error("no signal named {0:#010x}")]
    UnknownSignal(HashedName),
    #[error("signal expects {expected} argument(s), got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("object {0:?} is not attached to a tree")]
    NotAttached(ObjectId),
    #[error("tree {0:?} does not exist")]
    UnknownTree(TreeId),
    #[error("tree node {0} is not live")]
    InvalidIndex(Index),
    #[error("slot table {0:?} does not exist")]
    UnknownSlotTable(TableId),
    #[error("component of object {0:?} is missing or of another type")]
    ComponentMismatch(ObjectId),
}
