//! Slot arguments.
//!
//! Emissions carry their arguments as a borrowed `&[Var]`. [`Var`] is a closed
//! set of variants, so slots match on what they receive instead of downcasting.

use std::fmt;
use std::rc::Rc;

use super::hash::HashedName;
use crate::object::ObjectId;
use crate::tree::Index;

/// One argument of an emission.
#[derive(Debug, Clone, PartialEq)]
pub enum Var {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// A hashed name, typically a node id.
    Name(HashedName),
    /// A tree index.
    Index(Index),
    /// Another object of the same graph.
    Object(ObjectId),
}

impl Var {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Var::Bool(_) => "bool",
            Var::Int(_) => "int",
            Var::Float(_) => "float",
            Var::Str(_) => "str",
            Var::Name(_) => "name",
            Var::Index(_) => "index",
            Var::Object(_) => "object",
        }
    }

    /// The value of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Var::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The value of an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Var::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float value; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Var::Float(value) => Some(*value),
            Var::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// The text of a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Var::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The hash of a `Name`.
    pub fn as_name(&self) -> Option<HashedName> {
        match self {
            Var::Name(value) => Some(*value),
            _ => None,
        }
    }

    /// The index of an `Index`.
    pub fn as_index(&self) -> Option<Index> {
        match self {
            Var::Index(value) => Some(*value),
            _ => None,
        }
    }

    /// The id of an `Object`.
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Var::Object(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Bool(value) => write!(f, "{value}"),
            Var::Int(value) => write!(f, "{value}"),
            Var::Float(value) => write!(f, "{value}"),
            Var::Str(value) => write!(f, "{value:?}"),
            Var::Name(value) => write!(f, "#{value:08x}"),
            Var::Index(value) => write!(f, "@{value}"),
            Var::Object(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for Var {
    fn from(value: bool) -> Self {
        Var::Bool(value)
    }
}

impl From<i32> for Var {
    fn from(value: i32) -> Self {
        Var::Int(i64::from(value))
    }
}

impl From<i64> for Var {
    fn from(value: i64) -> Self {
        Var::Int(value)
    }
}

impl From<f64> for Var {
    fn from(value: f64) -> Self {
        Var::Float(value)
    }
}

impl From<&str> for Var {
    fn from(value: &str) -> Self {
        Var::Str(Rc::from(value))
    }
}

impl From<String> for Var {
    fn from(value: String) -> Self {
        Var::Str(Rc::from(value))
    }
}

impl From<ObjectId> for Var {
    fn from(value: ObjectId) -> Self {
        Var::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::hash;
    use slotmap::SlotMap;

    #[test]
    fn conversions() {
        assert_eq!(Var::from(true), Var::Bool(true));
        assert_eq!(Var::from(3_i32), Var::Int(3));
        assert_eq!(Var::from(3_i64), Var::Int(3));
        assert_eq!(Var::from(1.5_f64), Var::Float(1.5));
        assert_eq!(Var::from("abc").as_str(), Some("abc"));
        assert_eq!(Var::from(String::from("abc")).as_str(), Some("abc"));
    }

    #[test]
    fn accessors_reject_other_variants() {
        let v = Var::Int(7);
        assert_eq!(v.as_int(), Some(7));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_name(), None);
        assert_eq!(v.as_index(), None);
        assert_eq!(v.as_object(), None);
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(Var::Int(2).as_float(), Some(2.0));
        assert_eq!(Var::Bool(true).as_float(), None);
    }

    #[test]
    fn object_variant() {
        let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let v = Var::from(id);
        assert_eq!(v.as_object(), Some(id));
        assert_eq!(v.type_name(), "object");
    }

    #[test]
    fn display() {
        assert_eq!(Var::Int(-4).to_string(), "-4");
        assert_eq!(Var::from("hi").to_string(), "\"hi\"");
        assert_eq!(Var::Index(3).to_string(), "@3");
        assert_eq!(Var::Name(hash("a")).to_string(), "#e40c292c");
    }
}
