//! Input events delivered by the render layer.

use serde::{Deserialize, Serialize};

/// Discriminant used when binding listeners on a [`Node`](crate::Node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Pointer activation
    Click,
    /// Key pressed while the node (or a descendant) has focus
    KeyDown,
    /// Native element value changed
    Change,
    /// List component moved its highlighted item
    ActiveIndexChange,
}

/// An event dispatched to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation
    Click,
    /// Key press
    KeyDown(KeyEvent),
    /// Native element value changed
    Change {
        /// New value reported by the element
        value: String,
    },
    /// List component moved its highlighted item
    ActiveIndexChange {
        /// Newly highlighted index
        index: usize,
    },
}

impl Event {
    /// Listener discriminant for this event.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Click => EventType::Click,
            Self::KeyDown(_) => EventType::KeyDown,
            Self::Change { .. } => EventType::Change,
            Self::ActiveIndexChange { .. } => EventType::ActiveIndexChange,
        }
    }

    /// Key event payload, if any.
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::KeyDown(k) => Some(k),
            _ => None,
        }
    }

    /// Mutable key event payload, if any.
    pub fn as_key_mut(&mut self) -> Option<&mut KeyEvent> {
        match self {
            Self::KeyDown(k) => Some(k),
            _ => None,
        }
    }
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Space key
    Space,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Printable character
    Char(char),
}

impl Key {
    /// Keys that activate the focused control.
    #[must_use]
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }

    /// Keys that open a closed popup without activating anything.
    #[must_use]
    pub const fn is_move_down(self) -> bool {
        matches!(self, Self::Down)
    }

    /// Cancel key.
    #[must_use]
    pub const fn is_escape(self) -> bool {
        matches!(self, Self::Escape)
    }
}

/// A key press with propagation and default-action flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed
    pub key: Key,
    /// Set once a handler stops the event from bubbling further
    pub propagation_stopped: bool,
    /// Set once a handler suppresses the platform default action
    pub default_prevented: bool,
}

impl KeyEvent {
    /// Create a fresh key event.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Stop the event from bubbling to ancestors.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the platform default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}
