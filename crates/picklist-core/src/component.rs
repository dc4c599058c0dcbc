//! Component contract between widgets and the render layer.

use crate::event::Event;
use crate::node::Node;
use std::fmt::Debug;

/// A widget that renders a [`Node`] tree and reacts to bound events.
///
/// The render layer drives a single-threaded loop:
///
/// 1. call [`render`](Component::render) and keep the tree;
/// 2. when an event hits a node with a matching listener, call
///    [`update`](Component::update) with the bound message;
/// 3. re-render while [`is_dirty`](Component::is_dirty) reports `true`.
pub trait Component {
    /// Message type bound to node listeners.
    type Message: Clone + PartialEq + Debug;

    /// Key of the root node, used for focus queries.
    fn root_key(&self) -> &str {
        "root"
    }

    /// Produce the node tree for the current state.
    fn render(&mut self) -> Node<Self::Message>;

    /// Handle a bound message. `event` may be marked (propagation stopped,
    /// default prevented) by the handler.
    fn update(&mut self, message: Self::Message, event: &mut Event);

    /// Whether state changed since the last render.
    fn is_dirty(&self) -> bool;

    /// Key of the node that should receive input focus after the last
    /// render. Taking the request clears it.
    fn take_focus_request(&mut self) -> Option<String> {
        None
    }
}
