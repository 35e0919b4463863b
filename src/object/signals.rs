//! Signals every object emits.

crate::signals! {
    pub OBJECT_SIGNALS {
        /// Emitted on an object after it was attached, moved or detached.
        PARENT_CHANGED("parentChanged", 0),
        /// Emitted on an object after a child was added or removed.
        CHILDREN_COUNT_CHANGED("childrenCountChanged", 0),
        /// Emitted on an object after its node was renamed.
        ID_CHANGED("idChanged", 0),
        ENABLED_CHANGED("enabledChanged", 0),
        VISIBLE_CHANGED("visibleChanged", 0),
    }
}
