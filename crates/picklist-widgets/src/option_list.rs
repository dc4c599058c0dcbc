//! Bridge between the select's option set and the list component.
//!
//! The list component is an external collaborator: it displays items with an
//! id, label, disabled and selected flag, highlights an active index, and
//! raises two notifications (an option was selected, the active index moved).
//! [`OptionListAdapter`] derives the per-item data, renders the list node with
//! those notifications bound to [`SelectMessage`]s, and performs the key
//! traversal the list owns once it has focus.

use crate::option::SelectOption;
use crate::select::{OptionIdFn, SelectMessage};
use picklist_core::aria::{self, AccessibleRole};
use picklist_core::logging::targets;
use picklist_core::{ClassTheme, EventType, Key, Node, ReferenceMemo, StyleKey};
use std::sync::Arc;

/// Item data handed to the list component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxOption {
    /// Accessibility id
    pub id: String,
    /// Display label
    pub label: String,
    /// Highlightable but never committed
    pub disabled: bool,
    /// Matches the current selected value
    pub selected: bool,
}

/// Outcome of a navigation key handled by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Key not handled
    None,
    /// Move the highlight
    ActiveIndex(usize),
}

/// Value-independent item data, recomputed when the option set changes identity.
#[derive(Debug, Clone)]
struct DerivedOption {
    id: String,
    label: String,
    disabled: bool,
}

/// Inputs for rendering the list node.
#[derive(Debug, Clone, Copy)]
pub struct ListboxRender<'a> {
    /// Element id of the list (target of the trigger's `aria-controls`)
    pub id: &'a str,
    /// Option set
    pub options: &'a Arc<[SelectOption]>,
    /// Current selected value
    pub value: Option<&'a str>,
    /// Highlighted index
    pub active_index: Option<usize>,
    /// Optional id override
    pub get_option_id: Option<OptionIdFn>,
    /// Whether the popup is visible
    pub visible: bool,
    /// Class resolution
    pub theme: &'a ClassTheme,
}

/// Derives list items and relays list notifications.
#[derive(Debug)]
pub struct OptionListAdapter {
    derived: ReferenceMemo<[SelectOption], Vec<DerivedOption>>,
    page_size: usize,
}

impl Default for OptionListAdapter {
    fn default() -> Self {
        Self::new(5)
    }
}

impl OptionListAdapter {
    /// Create an adapter; `page_size` is the PageUp/PageDown stride.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            derived: ReferenceMemo::new(),
            page_size: page_size.max(1),
        }
    }

    /// PageUp/PageDown stride.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the PageUp/PageDown stride.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// How many times item data was derived from a new option set.
    #[must_use]
    pub const fn derivations(&self) -> usize {
        self.derived.recomputations()
    }

    /// Per-option id: override if given, else the option value, else empty.
    #[must_use]
    pub fn option_id(option: &SelectOption, index: usize, get_option_id: Option<OptionIdFn>) -> String {
        match get_option_id {
            Some(f) => f(option, index),
            None => option.commit_value().to_string(),
        }
    }

    /// Item data for the list component.
    pub fn items(
        &mut self,
        options: &Arc<[SelectOption]>,
        value: Option<&str>,
        get_option_id: Option<OptionIdFn>,
    ) -> Vec<ListboxOption> {
        let derived = self.derived.get_or_compute(options, |opts| {
            tracing::trace!(target: targets::OPTION_LIST, count = opts.len(), "deriving option items");
            opts.iter()
                .map(|o| DerivedOption {
                    id: o.commit_value().to_string(),
                    label: o.display_label().to_string(),
                    disabled: o.disabled,
                })
                .collect()
        });

        derived
            .iter()
            .zip(options.iter())
            .enumerate()
            .map(|(i, (d, option))| ListboxOption {
                id: get_option_id.map_or_else(|| d.id.clone(), |f| f(option, i)),
                label: d.label.clone(),
                disabled: d.disabled,
                selected: option.is_selected_by(value),
            })
            .collect()
    }

    /// Navigation keys owned by the list: Down/Up step, Home/End jump,
    /// PageDown/PageUp move by a page. Results are clamped to the list.
    #[must_use]
    pub fn handle_key(&self, key: Key, active: Option<usize>, len: usize) -> ListAction {
        if len == 0 {
            return ListAction::None;
        }
        let last = len - 1;
        let next = match (key, active) {
            (Key::Down, None) | (Key::Home, _) => 0,
            (Key::Up, None) | (Key::End, _) => last,
            (Key::Down, Some(i)) => (i + 1).min(last),
            (Key::Up, Some(i)) => i.saturating_sub(1),
            (Key::PageDown, a) => a.map_or(0, |i| (i + self.page_size).min(last)),
            (Key::PageUp, a) => a.map_or(0, |i| i.saturating_sub(self.page_size)),
            _ => return ListAction::None,
        };
        tracing::trace!(target: targets::OPTION_LIST, ?key, ?active, next, "list navigation");
        ListAction::ActiveIndex(next)
    }

    /// Render the list component node.
    pub fn render(&mut self, ctx: ListboxRender<'_>) -> Node<SelectMessage> {
        let items = self.items(ctx.options, ctx.value, ctx.get_option_id);
        let active_id = ctx
            .active_index
            .and_then(|i| items.get(i))
            .map(|item| item.id.clone());

        let children = items.into_iter().enumerate().map(|(i, item)| {
            let active = ctx.active_index == Some(i);
            Node::element("div")
                .key(format!("option-{i}"))
                .attr("id", item.id)
                .attr_opt("role", AccessibleRole::Option.as_attr())
                .attr(aria::SELECTED, aria::bool_str(item.selected))
                .attr_opt(aria::DISABLED, aria::true_or_absent(item.disabled))
                .classes(ctx.theme.classes(&[
                    Some(StyleKey::Option),
                    active.then_some(StyleKey::OptionActive),
                    item.selected.then_some(StyleKey::OptionSelected),
                    item.disabled.then_some(StyleKey::OptionDisabled),
                ]))
                .on(EventType::Click, SelectMessage::OptionSelected(i))
                .child(Node::text(item.label))
        });

        Node::component("listbox")
            .key("listbox")
            .attr("id", ctx.id)
            .attr_opt("role", AccessibleRole::ListBox.as_attr())
            .attr_opt(aria::ACTIVE_DESCENDANT, active_id)
            .flag("visible", ctx.visible)
            .classes(ctx.theme.classes(&[Some(StyleKey::Listbox)]))
            .on(EventType::ActiveIndexChange, SelectMessage::ActiveIndexChanged)
            .children(children)
    }
}
