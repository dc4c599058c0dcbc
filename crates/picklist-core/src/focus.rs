//! Focus query capability and focus-edge detection.
//!
//! Components do not subscribe to platform focus/blur events. Instead, each
//! render asks the render layer whether the component root currently contains
//! input focus and compares that with the previous observation. Focus may move
//! between descendants (for example from a trigger into a popup list) without
//! producing an edge, so owners only hear about focus entering or leaving the
//! component as a whole.

/// Render-layer query: does the node with `root_key` contain input focus?
pub trait FocusQuery {
    /// Whether focus is on the keyed node or one of its descendants.
    fn contains_focus(&self, root_key: &str) -> bool;
}

impl<F> FocusQuery for F
where
    F: Fn(&str) -> bool,
{
    fn contains_focus(&self, root_key: &str) -> bool {
        self(root_key)
    }
}

/// Transition detected between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEdge {
    /// Focus entered the root
    Gained,
    /// Focus left the root entirely
    Lost,
}

/// Remembers the last observation and reports edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTracker {
    had_focus: bool,
}

impl FocusTracker {
    /// Create a tracker that has not observed focus yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { had_focus: false }
    }

    /// Last observed value.
    #[must_use]
    pub const fn had_focus(&self) -> bool {
        self.had_focus
    }

    /// Record an observation and return the edge it produced, if any.
    pub fn observe(&mut self, contains_focus: bool) -> Option<FocusEdge> {
        let edge = match (self.had_focus, contains_focus) {
            (false, true) => Some(FocusEdge::Gained),
            (true, false) => Some(FocusEdge::Lost),
            _ => None,
        };
        self.had_focus = contains_focus;
        edge
    }
}

/// Notification handed to owner focus/blur callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChange {
    /// Owner-supplied widget key (empty when none was given)
    pub key: String,
    /// Which edge fired
    pub edge: FocusEdge,
    default_prevented: bool,
}

impl FocusChange {
    /// Create a notification for `edge`.
    #[must_use]
    pub fn new(key: impl Into<String>, edge: FocusEdge) -> Self {
        Self {
            key: key.into(),
            edge,
            default_prevented: false,
        }
    }

    /// Suppress the component's default handling of this edge.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a callback suppressed default handling.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
