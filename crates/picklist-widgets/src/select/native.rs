//! Native path: a platform `select` element wrapping the option set.

use super::{RenderContext, SelectMessage, NATIVE_KEY};
use crate::option::selected_index;
use picklist_core::aria::{self, format_aria_properties};
use picklist_core::{EventType, Node, StyleKey};

pub(super) fn render(ctx: &RenderContext<'_>) -> Node<SelectMessage> {
    let p = ctx.props;
    let value = p.value.as_deref();
    let nothing_selected = selected_index(&p.options, value).is_none();
    let placeholder_text = p
        .placeholder
        .as_deref()
        .unwrap_or(&ctx.config.native_placeholder_label);

    // Synthetic "no selection" entry, never selectable.
    let placeholder = Node::element("option")
        .key("placeholder")
        .attr("value", "")
        .flag("disabled", true)
        .flag("selected", nothing_selected)
        .child(Node::text(placeholder_text));

    let options = p.options.iter().enumerate().map(|(i, option)| {
        Node::element("option")
            .key(format!("option-{i}"))
            .attr("value", option.commit_value())
            .attr_opt("id", p.get_option_id.map(|f| f(option, i)))
            .flag("disabled", option.disabled)
            .flag("selected", option.is_selected_by(value))
            .child(Node::text(option.display_label()))
    });

    let select = Node::element("select")
        .key(NATIVE_KEY)
        .attrs(format_aria_properties(&p.aria))
        .classes(ctx.theme.resolve(StyleKey::Input))
        .attr("id", ctx.widget_id)
        .attr_opt("name", p.name.as_deref())
        .flag("disabled", p.disabled)
        .flag("readonly", p.read_only)
        .flag("required", p.required)
        .attr_opt(aria::INVALID, aria::true_or_absent(p.invalid == Some(true)))
        .attr_opt(aria::READONLY, aria::true_or_absent(p.read_only))
        .attr_opt("value", value.filter(|_| !nothing_selected))
        .on(EventType::Change, SelectMessage::NativeChange)
        .child(placeholder)
        .children(options);

    ctx.root(false)
        .child(ctx.arrow())
        .child(select)
        .child_opt(ctx.label())
}
