//! Field label attached after the control.

use picklist_core::{ClassTheme, Node, StyleKey};

/// State mirrored onto the label so it can style itself with the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelState {
    /// Control is disabled
    pub disabled: bool,
    /// Root contains focus
    pub focused: bool,
    /// Control is marked invalid
    pub invalid: bool,
    /// Control is read-only
    pub read_only: bool,
    /// Control is required
    pub required: bool,
}

/// Render the label component, associated with the control through `for`.
pub fn render_label<M>(text: &str, for_id: &str, state: LabelState, theme: &ClassTheme) -> Node<M> {
    Node::component("label")
        .key("label")
        .attr("for", for_id)
        .flag("disabled", state.disabled)
        .flag("focused", state.focused)
        .flag("invalid", state.invalid)
        .flag("readonly", state.read_only)
        .flag("required", state.required)
        .classes(theme.resolve(StyleKey::Label))
        .child(Node::text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_label() {
        let state = LabelState {
            focused: true,
            required: true,
            ..LabelState::default()
        };
        let node: Node<()> = render_label("Fruit", "fruit-id", state, &ClassTheme::new());
        assert_eq!(node.type_name(), Some("label"));
        assert_eq!(node.attr_str("for"), Some("fruit-id"));
        assert!(node.attr_bool("focused"));
        assert!(node.attr_bool("required"));
        assert!(!node.attr_bool("disabled"));
        assert!(node.has_class("select-label"));
        assert_eq!(node.text_content(), "Fruit");
    }
}
