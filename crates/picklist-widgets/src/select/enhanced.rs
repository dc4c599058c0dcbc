//! Enhanced path: trigger button plus an always-present popup list.

use super::{RenderContext, SelectMessage, TRIGGER_KEY};
use crate::option_list::{ListboxRender, OptionListAdapter};
use picklist_core::aria::{self, format_aria_properties};
use picklist_core::{EventType, Node, StyleKey};

pub(super) fn render(
    ctx: &RenderContext<'_>,
    list: &mut OptionListAdapter,
    is_open: bool,
    active_index: Option<usize>,
) -> Node<SelectMessage> {
    let p = ctx.props;
    let value = p.value.as_deref();
    let listbox_id = format!("{}-listbox", ctx.widget_id);

    let display = match p.options.iter().find(|o| o.is_selected_by(value)) {
        Some(option) => Some(Node::text(option.display_label())),
        None => p
            .placeholder
            .as_deref()
            .or(ctx.config.placeholder.as_deref())
            .map(|text| {
                Node::element("span")
                    .classes(ctx.theme.resolve(StyleKey::Placeholder))
                    .child(Node::text(text))
            }),
    };

    let trigger = Node::element("button")
        .key(TRIGGER_KEY)
        .attrs(format_aria_properties(&p.aria))
        .classes(ctx.theme.resolve(StyleKey::Trigger))
        .attr("id", ctx.widget_id)
        .attr(aria::CONTROLS, listbox_id.as_str())
        .attr(aria::EXPANDED, aria::bool_str(is_open))
        .attr(aria::HAS_POPUP, "listbox")
        .attr_opt(aria::REQUIRED, aria::true_or_absent(p.required))
        .attr_opt(aria::INVALID, aria::true_or_absent(p.invalid == Some(true)))
        .flag("disabled", p.disabled || p.read_only)
        .on(EventType::Click, SelectMessage::TriggerClick)
        .on(EventType::KeyDown, SelectMessage::Key)
        .child_opt(display);

    // Visibility is a class; the list stays in the tree so it can take focus.
    let listbox = list.render(ListboxRender {
        id: &listbox_id,
        options: &p.options,
        value,
        active_index,
        get_option_id: p.get_option_id,
        visible: is_open,
        theme: ctx.theme,
    });
    let dropdown = Node::element("div")
        .key("dropdown")
        .classes(ctx.theme.classes(&[
            Some(StyleKey::Dropdown),
            is_open.then_some(StyleKey::Open),
        ]))
        .on(EventType::KeyDown, SelectMessage::Key)
        .child(listbox);

    ctx.root(is_open)
        .child(trigger)
        .child(ctx.arrow())
        .child(dropdown)
        .child_opt(ctx.label())
}
