//! Signal descriptors and signal tables.
//!
//! A [`Signal`] is a plain value: the hashed name of a notification point and
//! the number of arguments its slots receive. Types expose the signals they
//! emit as a `&'static [Signal]` table, declared with [`signals!`](crate::signals).

use std::fmt;

use super::hash::{hash, HashedName};

/// Opaque descriptor of one notification point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal {
    name: HashedName,
    args_count: u8,
}

impl Signal {
    /// The invalid signal, returned by failed lookups.
    pub const NULL: Self = Self {
        name: 0,
        args_count: 0,
    };

    /// Declare a signal from its name and argument count.
    pub const fn new(name: &str, args_count: u8) -> Self {
        Self::from_hash(hash(name), args_count)
    }

    /// Declare a signal from an already hashed name.
    pub const fn from_hash(name: HashedName, args_count: u8) -> Self {
        Self { name, args_count }
    }

    /// The hashed name of this signal.
    pub const fn name(self) -> HashedName {
        self.name
    }

    /// Number of arguments an emission of this signal carries.
    pub const fn args_count(self) -> usize {
        self.args_count as usize
    }

    /// Whether this is a real signal (not [`Signal::NULL`]).
    pub const fn is_valid(self) -> bool {
        self.name != 0
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("Signal(null)");
        }
        f.debug_struct("Signal")
            .field("name", &format_args!("{:#010x}", self.name))
            .field("args_count", &self.args_count)
            .finish()
    }
}

/// Look up a signal by hashed name in a signal table.
///
/// Returns [`Signal::NULL`] when no entry matches.
pub fn find_signal(table: &[Signal], name: HashedName) -> Signal {
    table
        .iter()
        .copied()
        .find(|signal| signal.name == name)
        .unwrap_or(Signal::NULL)
}

/// Declare signal constants together with a table listing them.
///
/// ```
/// object_graph::signals! {
///     pub COUNTER_SIGNALS {
///         /// Emitted with the new value.
///         VALUE_CHANGED("valueChanged", 1),
///         RESET("reset", 0),
///     }
/// }
///
/// assert_eq!(COUNTER_SIGNALS.len(), 2);
/// assert_eq!(VALUE_CHANGED.args_count(), 1);
/// ```
#[macro_export]
macro_rules! signals {
    ($vis:vis $table:ident { $($(#[$attr:meta])* $name:ident($label:literal, $argc:expr)),* $(,)? }) => {
        $(
            $(#[$attr])*
            $vis const $name: $crate::meta::Signal = $crate::meta::Signal::new($label, $argc);
        )*

        /// Every signal declared alongside this table.
        $vis const $table: &[$crate::meta::Signal] = &[$($name),*];
    };
}
