//! Abstract node tree produced by a render pass.
//!
//! A [`Node`] is a plain value: rendering the same component twice with the
//! same inputs yields two trees that compare equal. Event bindings are stored
//! as data (an [`EventType`] paired with a component message) instead of
//! closures, so the render layer can dispatch them back through
//! [`Component::update`](crate::Component::update).
//!
//! # Examples
//!
//! ```
//! use picklist_core::{EventType, Node};
//!
//! let node: Node<&str> = Node::element("button")
//!     .key("trigger")
//!     .attr("aria-haspopup", "listbox")
//!     .flag("disabled", false)
//!     .classes(["select-trigger"])
//!     .on(EventType::Click, "toggle")
//!     .child(Node::text("Apple"));
//!
//! assert_eq!(node.attr_str("aria-haspopup"), Some("listbox"));
//! assert_eq!(node.text_content(), "Apple");
//! ```

use crate::event::EventType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute value on an element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// String attribute (`id`, `aria-expanded`, ...)
    Str(String),
    /// Boolean attribute (`disabled`, `selected`, `focus`, ...)
    Bool(bool),
}

impl AttrValue {
    /// String payload, if this is a string attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Boolean payload, if this is a boolean attribute.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Kind of node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Platform element such as `div`, `select` or `option`
    Element(String),
    /// Text leaf
    Text(String),
    /// Externally implemented component (e.g. `listbox`, `label`)
    Component(String),
}

/// Event binding: when `on` fires on this node, deliver `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener<M> {
    /// Event that triggers the binding
    pub on: EventType,
    /// Message delivered to the owning component
    pub message: M,
}

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<M> {
    /// What this node is
    pub kind: NodeKind,
    /// Stable key used for diffing and focus tracking
    pub key: Option<String>,
    /// Attributes, ordered by name
    pub attrs: BTreeMap<String, AttrValue>,
    /// Resolved class names in render order
    pub classes: Vec<String>,
    /// Event bindings
    pub listeners: Vec<Listener<M>>,
    /// Child nodes
    pub children: Vec<Node<M>>,
}

impl<M> Node<M> {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            key: None,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element node.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element(tag.into()))
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(text.into()))
    }

    /// Create a component node.
    #[must_use]
    pub fn component(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Component(name.into()))
    }

    /// Set the node key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute only when `value` is `Some`; `None` omits it.
    #[must_use]
    pub fn attr_opt<V: Into<AttrValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Set a boolean attribute.
    #[must_use]
    pub fn flag(self, name: impl Into<String>, value: bool) -> Self {
        self.attr(name, AttrValue::Bool(value))
    }

    /// Set several attributes at once.
    #[must_use]
    pub fn attrs<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        for (k, v) in attrs {
            self.attrs.insert(k.into(), v.into());
        }
        self
    }

    /// Append class names.
    #[must_use]
    pub fn classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Bind an event to a message.
    #[must_use]
    pub fn on(mut self, on: EventType, message: M) -> Self {
        self.listeners.push(Listener { on, message });
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append an optional child.
    #[must_use]
    pub fn child_opt(mut self, child: Option<Self>) -> Self {
        self.children.extend(child);
        self
    }

    /// Append children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tag name for element nodes.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Name used for type selectors: element tag or component name.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(name) | NodeKind::Component(name) => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    /// Look up an attribute.
    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// String attribute lookup.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(AttrValue::as_str)
    }

    /// Boolean attribute lookup; absent attributes read as `false`.
    #[must_use]
    pub fn attr_bool(&self, name: &str) -> bool {
        self.attrs
            .get(name)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false)
    }

    /// Whether the node carries a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Message bound to an event on this node.
    #[must_use]
    pub fn listener(&self, on: EventType) -> Option<&M> {
        self.listeners
            .iter()
            .find(|l| l.on == on)
            .map(|l| &l.message)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(t) = &self.kind {
            out.push_str(t);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first pre-order walk.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Find the first node with the given key.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Self> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_key(key))
    }

    /// Child indices from this node to the first node matching `pred`.
    #[must_use]
    pub fn path_to(&self, pred: &impl Fn(&Self) -> bool) -> Option<Vec<usize>> {
        if pred(self) {
            return Some(Vec::new());
        }
        for (i, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.path_to(pred) {
                path.insert(0, i);
                return Some(path);
            }
        }
        None
    }

    /// Node at a child-index path.
    #[must_use]
    pub fn at_path(&self, path: &[usize]) -> Option<&Self> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self.children.get(first)?.at_path(rest),
        }
    }

    /// Keys of every node along `path`, this node included.
    #[must_use]
    pub fn keys_along(&self, path: &[usize]) -> Vec<String> {
        let mut keys = Vec::new();
        let mut node = self;
        keys.extend(node.key.clone());
        for &i in path {
            match node.children.get(i) {
                Some(child) => {
                    node = child;
                    keys.extend(node.key.clone());
                }
                None => break,
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<u8> {
        Node::element("div")
            .key("root")
            .classes(["a", "b"])
            .child(
                Node::element("button")
                    .key("trigger")
                    .attr("id", "sel")
                    .flag("disabled", true)
                    .on(EventType::Click, 1)
                    .child(Node::text("Hello")),
            )
            .child(
                Node::component("listbox")
                    .key("listbox")
                    .child(Node::element("div").child(Node::text(" world"))),
            )
    }

    // =========================================================================
    // Builder Tests
    // =========================================================================

    #[test]
    fn test_builder_sets_fields() {
        let n = sample();
        assert_eq!(n.tag(), Some("div"));
        assert_eq!(n.key.as_deref(), Some("root"));
        assert!(n.has_class("a"));
        assert!(!n.has_class("c"));
        assert_eq!(n.children.len(), 2);
    }

    #[test]
    fn test_attr_opt_none_omits() {
        let n: Node<()> = Node::element("select").attr_opt("name", None::<String>);
        assert!(n.attr_value("name").is_none());

        let n: Node<()> = Node::element("select").attr_opt("name", Some("color"));
        assert_eq!(n.attr_str("name"), Some("color"));
    }

    #[test]
    fn test_attr_bool_absent_is_false() {
        let n: Node<()> = Node::element("option");
        assert!(!n.attr_bool("selected"));
        let n = n.flag("selected", true);
        assert!(n.attr_bool("selected"));
    }

    #[test]
    fn test_child_opt() {
        let n: Node<()> = Node::element("div")
            .child_opt(None)
            .child_opt(Some(Node::text("x")));
        assert_eq!(n.children.len(), 1);
    }

    // =========================================================================
    // Query Tests
    // =========================================================================

    #[test]
    fn test_text_content_concatenates() {
        assert_eq!(sample().text_content(), "Hello world");
    }

    #[test]
    fn test_find_by_key() {
        let n = sample();
        let trigger = n.find_by_key("trigger").unwrap();
        assert_eq!(trigger.attr_str("id"), Some("sel"));
        assert!(n.find_by_key("missing").is_none());
    }

    #[test]
    fn test_listener_lookup() {
        let n = sample();
        let trigger = n.find_by_key("trigger").unwrap();
        assert_eq!(trigger.listener(EventType::Click), Some(&1));
        assert_eq!(trigger.listener(EventType::KeyDown), None);
    }

    #[test]
    fn test_path_and_keys_along() {
        let n = sample();
        let path = n
            .path_to(&|node: &Node<u8>| node.key.as_deref() == Some("listbox"))
            .unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(n.at_path(&path).unwrap().type_name(), Some("listbox"));
        assert_eq!(n.keys_along(&path), vec!["root", "listbox"]);
    }

    #[test]
    fn test_walk_visits_all() {
        let n = sample();
        let mut count = 0;
        n.walk(&mut |_| count += 1);
        assert_eq!(count, 6);
    }

    #[test]
    fn test_serialize_attr_values_untagged() {
        let n: Node<()> = Node::element("option")
            .attr("value", "a")
            .flag("disabled", true);
        let json = serde_json::to_value(&n.attrs).unwrap();
        assert_eq!(json["value"], "a");
        assert_eq!(json["disabled"], true);
    }
}
