//! Dispatch tables: callables stored behind generational handles.

pub mod slot_table;

pub use slot_table::{Callable, Checkout, Handle, SlotKey, SlotTable, TableId};
