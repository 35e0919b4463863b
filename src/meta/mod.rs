//! Signal descriptors, hashed names and slot arguments.
//!
//! - [`hash`]: compile-time FNV-1a hashing of names into [`HashedName`].
//! - [`Signal`]: value descriptor of one notification point.
//! - [`Var`]: closed, tagged argument type passed to slots.

pub mod hash;
pub mod signal;
pub mod var;

pub use hash::{hash, HashedName};
pub use signal::{find_signal, Signal};
pub use var::Var;
