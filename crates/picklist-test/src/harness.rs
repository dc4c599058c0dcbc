//! Headless render harness for Picklist components.
//!
//! The harness plays the render layer: it renders the component, answers
//! focus queries from its own focus state, routes events to bound listeners
//! and re-renders until the component settles.

use picklist_core::logging::targets;
use picklist_core::{Component, DiffResult, Event, FocusQuery, Key, KeyEvent, Node, TreeDiffer};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::selector::Selector;

/// Upper bound on render passes per interaction.
const MAX_RENDER_PASSES: usize = 8;

/// Focus state shared between the harness and the component under test.
///
/// Holds the keys of every node from the root down to the focused node.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    keys: Rc<RefCell<Vec<String>>>,
}

impl FocusState {
    /// Key of the focused node, if any.
    #[must_use]
    pub fn focused(&self) -> Option<String> {
        self.keys.borrow().last().cloned()
    }

    fn set(&self, keys: Vec<String>) {
        *self.keys.borrow_mut() = keys;
    }

    fn clear(&self) {
        self.keys.borrow_mut().clear();
    }
}

impl FocusQuery for FocusState {
    fn contains_focus(&self, root_key: &str) -> bool {
        self.keys.borrow().iter().any(|k| k == root_key)
    }
}

/// Test harness for interacting with a component.
pub struct Harness<C: Component> {
    component: C,
    focus: FocusState,
    tree: Node<C::Message>,
    differ: TreeDiffer,
    last_diff: DiffResult,
    last_key_event: Option<KeyEvent>,
    renders: usize,
}

impl<C: Component> Harness<C> {
    /// Build the component with the harness focus query and render it.
    pub fn new(build: impl FnOnce(Box<dyn FocusQuery>) -> C) -> Self {
        let focus = FocusState::default();
        let mut component = build(Box::new(focus.clone()));
        let tree = component.render();
        let mut harness = Self {
            component,
            focus,
            tree,
            differ: TreeDiffer::new(),
            last_diff: DiffResult::default(),
            last_key_event: None,
            renders: 1,
        };
        harness.apply_focus_request();
        harness.settle();
        harness
    }

    // === Rendering ===

    /// Render once, then keep rendering while the component is dirty or
    /// asks for focus.
    pub fn render(&mut self) -> &mut Self {
        self.render_pass();
        self.settle();
        self
    }

    /// The component under test.
    #[must_use]
    pub const fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component. Call [`render`](Self::render) afterwards.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Last rendered tree.
    #[must_use]
    pub const fn tree(&self) -> &Node<C::Message> {
        &self.tree
    }

    /// Changes made by the most recent render pass.
    #[must_use]
    pub const fn last_diff(&self) -> &DiffResult {
        &self.last_diff
    }

    /// Number of render passes so far.
    #[must_use]
    pub const fn render_count(&self) -> usize {
        self.renders
    }

    // === Focus ===

    /// Move focus to the first node matching the selector.
    pub fn focus(&mut self, selector: &str) -> &mut Self {
        if let Some(path) = self.find_path(selector) {
            let keys = self.tree.keys_along(&path);
            tracing::trace!(target: targets::HARNESS, ?keys, "focus");
            self.focus.set(keys);
            self.render();
        }
        self
    }

    /// Move focus out of the component entirely.
    pub fn blur(&mut self) -> &mut Self {
        tracing::trace!(target: targets::HARNESS, "blur");
        self.focus.clear();
        self.render()
    }

    /// Key of the focused node.
    #[must_use]
    pub fn focused_key(&self) -> Option<String> {
        self.focus.focused()
    }

    // === Event Simulation ===

    /// Click the first node matching the selector. Disabled nodes ignore clicks.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        let mut event = Event::Click;
        self.dispatch(selector, &mut event);
        self
    }

    /// Press a key on the first node matching the selector.
    pub fn press_key(&mut self, selector: &str, key: Key) -> &mut Self {
        let mut event = Event::KeyDown(KeyEvent::new(key));
        self.dispatch(selector, &mut event);
        self.last_key_event = event.as_key().copied();
        self
    }

    /// Press a key on the focused node.
    pub fn press_focused(&mut self, key: Key) -> &mut Self {
        match self.focus.focused() {
            Some(focused) => self.press_key(&format!("[key='{focused}']"), key),
            None => self,
        }
    }

    /// Report a new native value on the first node matching the selector.
    pub fn change(&mut self, selector: &str, value: &str) -> &mut Self {
        let mut event = Event::Change {
            value: value.to_string(),
        };
        self.dispatch(selector, &mut event);
        self
    }

    /// Report a highlight move from the list matching the selector.
    pub fn set_active_index(&mut self, selector: &str, index: usize) -> &mut Self {
        let mut event = Event::ActiveIndexChange { index };
        self.dispatch(selector, &mut event);
        self
    }

    /// Key event as left by the handlers of the last key press.
    #[must_use]
    pub const fn last_key_event(&self) -> Option<&KeyEvent> {
        self.last_key_event.as_ref()
    }

    // === Queries ===

    /// Query for a node matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&Node<C::Message>> {
        self.find_path(selector)
            .and_then(|path| self.tree.at_path(&path))
    }

    /// Query for all nodes matching the selector.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&Node<C::Message>> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        sel.find_paths(&self.tree)
            .iter()
            .filter_map(|path| self.tree.at_path(path))
            .collect()
    }

    /// Text content of a node.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .map(Node::text_content)
            .unwrap_or_default()
    }

    /// Attribute of a node, booleans rendered as `"true"`/`"false"`.
    #[must_use]
    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        let value = self.query(selector)?.attr_value(name)?;
        Some(match value.as_str() {
            Some(s) => s.to_string(),
            None => value.as_bool().unwrap_or_default().to_string(),
        })
    }

    /// Check if a node exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    // === Assertions ===

    /// Assert that a node exists.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected node matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a node does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the node exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected node matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert an attribute value; `None` asserts the attribute is absent.
    ///
    /// # Panics
    ///
    /// Panics if the attribute does not match.
    pub fn assert_attr(&self, selector: &str, name: &str, expected: Option<&str>) -> &Self {
        let actual = self.attr(selector, name);
        assert_eq!(
            actual.as_deref(),
            expected,
            "Expected {name}={expected:?} but got {actual:?} for '{selector}'"
        );
        self
    }

    /// Assert that a node carries a class.
    ///
    /// # Panics
    ///
    /// Panics if the node is missing or lacks the class.
    pub fn assert_class(&self, selector: &str, class: &str) -> &Self {
        let node = self.query(selector);
        assert!(
            node.is_some_and(|n| n.has_class(class)),
            "Expected '{selector}' to have class '{class}' but got {:?}",
            node.map(|n| &n.classes)
        );
        self
    }

    /// Assert the count of matching nodes.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} nodes matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert which node holds focus.
    ///
    /// # Panics
    ///
    /// Panics if focus is elsewhere.
    pub fn assert_focused(&self, key: Option<&str>) -> &Self {
        let actual = self.focused_key();
        assert_eq!(actual.as_deref(), key, "Unexpected focused node");
        self
    }

    // === Internal ===

    fn find_path(&self, selector: &str) -> Option<Vec<usize>> {
        let sel = Selector::parse(selector).ok()?;
        sel.find_paths(&self.tree).into_iter().next()
    }

    /// Deliver `event` to the target and then to each ancestor, stopping when
    /// a key handler stops propagation.
    fn dispatch(&mut self, selector: &str, event: &mut Event) {
        let Some(path) = self.find_path(selector) else {
            return;
        };
        if self
            .tree
            .at_path(&path)
            .is_some_and(|n| n.attr_bool("disabled"))
        {
            tracing::trace!(target: targets::HARNESS, selector, "target disabled");
            return;
        }

        let on = event.event_type();
        let messages: Vec<C::Message> = (0..=path.len())
            .rev()
            .filter_map(|depth| self.tree.at_path(&path[..depth]))
            .filter_map(|node| node.listener(on).cloned())
            .collect();

        for message in messages {
            tracing::trace!(target: targets::HARNESS, ?message, "dispatch");
            self.component.update(message, event);
            if event.as_key().is_some_and(|k| k.propagation_stopped) {
                break;
            }
        }
        self.render();
    }

    fn render_pass(&mut self) {
        let tree = self.component.render();
        self.last_diff = self.differ.diff(&self.tree, &tree);
        self.tree = tree;
        self.renders += 1;
        self.sync_focus();
    }

    fn settle(&mut self) {
        for _ in 0..MAX_RENDER_PASSES {
            let moved = self.apply_focus_request();
            if !moved && !self.component.is_dirty() {
                return;
            }
            self.render_pass();
        }
        tracing::warn!(target: targets::HARNESS, "component did not settle");
    }

    /// Move focus where the component asked. Returns whether focus moved.
    fn apply_focus_request(&mut self) -> bool {
        let Some(key) = self.component.take_focus_request() else {
            return false;
        };
        let Some(path) = self.tree.path_to(&|n| n.key.as_deref() == Some(key.as_str())) else {
            return false;
        };
        let keys = self.tree.keys_along(&path);
        if self.focus.focused().as_deref() == keys.last().map(String::as_str) {
            return false;
        }
        tracing::trace!(target: targets::HARNESS, key, "focus requested");
        self.focus.set(keys);
        true
    }

    /// Re-resolve the focused node in the new tree; focus is lost when it is gone.
    fn sync_focus(&mut self) {
        let Some(key) = self.focus.focused() else {
            return;
        };
        match self.tree.path_to(&|n| n.key.as_deref() == Some(key.as_str())) {
            Some(path) => self.focus.set(self.tree.keys_along(&path)),
            None => self.focus.clear(),
        }
    }
}

impl<C> Harness<C>
where
    C: Component,
    C::Message: Serialize,
{
    /// Pretty JSON of the last rendered tree.
    #[must_use]
    pub fn snapshot(&self) -> String {
        serde_json::to_string_pretty(&self.tree).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_core::EventType;

    /// Counter with an increment button and a focusable field.
    struct Counter {
        count: usize,
        focus: Box<dyn FocusQuery>,
        focus_events: usize,
        had_focus: bool,
        request: Option<String>,
        dirty: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    enum Msg {
        Increment,
        Key,
        Outer,
    }

    impl Counter {
        fn new(focus: Box<dyn FocusQuery>) -> Self {
            Self {
                count: 0,
                focus,
                focus_events: 0,
                had_focus: false,
                request: None,
                dirty: true,
            }
        }
    }

    impl Component for Counter {
        type Message = Msg;

        fn render(&mut self) -> Node<Msg> {
            let focused = self.focus.contains_focus("root");
            if focused != self.had_focus {
                self.focus_events += 1;
                self.had_focus = focused;
            }
            self.dirty = false;
            Node::element("div")
                .key("root")
                .on(EventType::KeyDown, Msg::Outer)
                .child(
                    Node::element("button")
                        .key("inc")
                        .on(EventType::Click, Msg::Increment)
                        .child(Node::text(self.count.to_string())),
                )
                .child(
                    Node::element("input")
                        .key("field")
                        .flag("disabled", self.count > 2)
                        .on(EventType::Click, Msg::Increment)
                        .on(EventType::KeyDown, Msg::Key),
                )
        }

        fn update(&mut self, message: Msg, event: &mut Event) {
            match message {
                Msg::Increment => self.count += 1,
                Msg::Key => {
                    if let Some(k) = event.as_key_mut() {
                        if k.key == Key::Tab {
                            k.stop_propagation();
                        }
                        self.request = Some("inc".to_string());
                    }
                }
                Msg::Outer => self.count += 10,
            }
            self.dirty = true;
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }

        fn take_focus_request(&mut self) -> Option<String> {
            self.request.take()
        }
    }

    #[test]
    fn test_harness_click_updates_tree() {
        let mut h = Harness::new(Counter::new);
        h.assert_text("[key='inc']", "0");
        h.click("[key='inc']").click("button");
        h.assert_text("[key='inc']", "2");
        assert_eq!(h.last_diff().len(), 1);
    }

    #[test]
    fn test_harness_disabled_ignores_click() {
        let mut h = Harness::new(Counter::new);
        for _ in 0..3 {
            h.click("[key='field']");
        }
        h.assert_attr("[key='field']", "disabled", Some("true"));
        h.click("[key='field']");
        assert_eq!(h.component().count, 3);
    }

    #[test]
    fn test_harness_key_bubbles_until_stopped() {
        let mut h = Harness::new(Counter::new);
        h.press_key("[key='field']", Key::Tab);
        assert_eq!(h.component().count, 0);
        assert!(h.last_key_event().unwrap().propagation_stopped);

        h.press_key("[key='field']", Key::Enter);
        assert_eq!(h.component().count, 10);
        assert!(!h.last_key_event().unwrap().propagation_stopped);

        // The field is disabled past a count of 2; keys no longer reach it.
        h.press_key("[key='field']", Key::Enter);
        assert_eq!(h.component().count, 10);
    }

    #[test]
    fn test_harness_focus_edges_and_requests() {
        let mut h = Harness::new(Counter::new);
        h.focus("[key='field']");
        h.assert_focused(Some("field"));
        assert_eq!(h.component().focus_events, 1);

        // Focus request moves focus within the root without an edge.
        h.press_focused(Key::Tab);
        h.assert_focused(Some("inc"));
        assert_eq!(h.component().focus_events, 1);

        h.blur();
        h.assert_focused(None);
        assert_eq!(h.component().focus_events, 2);
    }

    #[test]
    fn test_harness_queries() {
        let h = Harness::new(Counter::new);
        h.assert_exists("div > button")
            .assert_not_exists("select")
            .assert_count("div > button", 1)
            .assert_count("div [disabled='false']", 1);
        assert_eq!(h.attr("[key='field']", "missing"), None);
        assert!(h.snapshot().contains("\"inc\""));
    }

    #[test]
    #[should_panic(expected = "Expected node matching")]
    fn test_harness_assert_exists_fails() {
        let h = Harness::new(Counter::new);
        h.assert_exists("[key='missing']");
    }

    #[test]
    fn test_focus_state_query() {
        let state = FocusState::default();
        assert!(!state.contains_focus("root"));
        state.set(vec!["root".to_string(), "inc".to_string()]);
        assert!(state.contains_focus("root"));
        assert_eq!(state.focused().as_deref(), Some("inc"));
    }
}
