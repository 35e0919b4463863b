//! Component trait: user state and structural hooks of an object.

use std::any::Any;

use super::graph::ObjectId;
use crate::meta::Signal;

/// State attached to an object.
///
/// Components declare the signals of their type for name lookup, receive
/// member-style slot calls, and are notified of structural changes before the
/// matching signals are emitted. Hooks run without access to the graph.
pub trait Component: Any {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Upcast to `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Signals of this component type, searched before the built-in object signals.
    fn signals(&self) -> &'static [Signal] {
        &[]
    }

    /// A child object was attached under this object.
    fn on_child_added(&mut self, _child: ObjectId) {}

    /// A child object left this object.
    fn on_child_removed(&mut self, _child: ObjectId) {}

    /// This object's parent changed. `None` when the new parent is not an
    /// object (detached, or attached directly under a tree root).
    fn on_parent_changed(&mut self, _parent: Option<ObjectId>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::signals! {
        LABEL_SIGNALS {
            TEXT_CHANGED("textChanged", 1),
        }
    }

    struct Label {
        text: String,
    }

    impl Component for Label {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn signals(&self) -> &'static [Signal] {
            LABEL_SIGNALS
        }
    }

    struct Plain;

    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn downcast_through_trait_object() {
        let mut boxed: Box<dyn Component> = Box::new(Label {
            text: "hi".into(),
        });
        assert!(boxed.as_any().is::<Label>());
        assert!(!boxed.as_any().is::<Plain>());
        boxed
            .as_any_mut()
            .downcast_mut::<Label>()
            .unwrap()
            .text
            .push('!');
        assert_eq!(boxed.as_any().downcast_ref::<Label>().unwrap().text, "hi!");
    }

    #[test]
    fn signal_table() {
        assert_eq!(Label { text: String::new() }.signals(), &[TEXT_CHANGED]);
        assert!(Plain.signals().is_empty());
    }
}
