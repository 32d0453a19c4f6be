//! Live property graph interface
//!
//! A running session exposes its settings as a tree of owners, each holding
//! properties and further sub-owners. [`Profile::capture_live_state`] reads
//! this tree through the two traits below and never mutates it.
//!
//! [`Profile::capture_live_state`]: crate::Profile::capture_live_state

/// A node of the live property tree
pub trait PropertyOwner {
    /// Direct children, in traversal order
    fn sub_owners(&self) -> Vec<&dyn PropertyOwner>;

    /// Properties held directly by this node, in traversal order
    fn properties(&self) -> Vec<&dyn LiveProperty>;
}

/// A single live setting
pub trait LiveProperty {
    /// Dotted identifier unique across the whole tree
    fn fully_qualified_identifier(&self) -> String;

    /// Whether the value differs from the one the session started with
    fn has_changed(&self) -> bool;

    /// Current value as a script literal
    fn string_value(&self) -> String;
}

/// Changed properties of `root` in depth-first order, sub-owners first
pub(crate) fn changed_properties(root: &dyn PropertyOwner) -> Vec<&dyn LiveProperty> {
    let mut changed = Vec::new();
    collect(root, &mut changed);
    changed
}

fn collect<'a>(owner: &'a dyn PropertyOwner, changed: &mut Vec<&'a dyn LiveProperty>) {
    for sub in owner.sub_owners() {
        collect(sub, changed);
    }
    changed.extend(owner.properties().into_iter().filter(|p| p.has_changed()));
}
