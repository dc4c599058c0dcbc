//! Select widget with a native and an enhanced (combobox) rendering path.
//!
//! The owner supplies [`SelectProperties`] on every render. The widget keeps
//! only interaction state of its own: whether the popup is open, which option
//! is highlighted, and whether its root held focus at the previous render.
//! Value changes are requested through callbacks, never applied in place.

mod enhanced;
mod native;

use crate::label::{render_label, LabelState};
use crate::option::{find_by_value, selected_index, SelectOption};
use crate::option_list::{ListAction, OptionListAdapter};
use picklist_core::logging::targets;
use picklist_core::{
    ClassTheme, Component, Event, FocusChange, FocusEdge, FocusQuery, FocusTracker, KeyEvent, Node,
    SelectConfig, StyleKey,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Key of the root node; focus queries are made against it.
pub const ROOT_KEY: &str = "root";
/// Key of the native `select` element.
pub const NATIVE_KEY: &str = "native";
/// Key of the enhanced trigger.
pub const TRIGGER_KEY: &str = "trigger";
/// Key of the popup list.
pub const LISTBOX_KEY: &str = "listbox";

/// Fired on commit with the committed value.
pub type ValueCallback = Box<dyn FnMut(&str)>;
/// Fired on commit with the committed option and the widget key.
pub type ChangeCallback = Box<dyn FnMut(&SelectOption, &str)>;
/// Fired on focus edges; may suppress default handling.
pub type FocusCallback = Box<dyn FnMut(&mut FocusChange)>;
/// Maps an option and its index to an element id.
pub type OptionIdFn = fn(&SelectOption, usize) -> String;

/// Messages bound to rendered nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectMessage {
    /// Native element reported a new value
    NativeChange,
    /// Trigger activated by pointer
    TriggerClick,
    /// Key pressed on the trigger or inside the popup
    Key,
    /// List reported a selection
    OptionSelected(usize),
    /// List moved its highlight
    ActiveIndexChanged,
}

/// Caller-controlled properties, supplied on every render.
#[derive(Debug, Clone)]
pub struct SelectProperties {
    /// Selectable options, compared by reference between renders
    pub options: Arc<[SelectOption]>,
    /// Selected value
    pub value: Option<String>,
    /// Render the enhanced path instead of the native element
    pub enhanced: bool,
    /// Disabled
    pub disabled: bool,
    /// Read-only
    pub read_only: bool,
    /// Required
    pub required: bool,
    /// `Some(true)` invalid, `Some(false)` valid, `None` unvalidated
    pub invalid: Option<bool>,
    /// Field label
    pub label: Option<String>,
    /// Id of the native element or trigger
    pub widget_id: Option<String>,
    /// `name` of the native element
    pub name: Option<String>,
    /// Text shown when nothing is selected
    pub placeholder: Option<String>,
    /// Passed back to focus, blur and change callbacks
    pub key: Option<String>,
    /// Extra ARIA attributes
    pub aria: BTreeMap<String, String>,
    /// Option id override
    pub get_option_id: Option<OptionIdFn>,
    /// Classes merged over the configured theme
    pub extra_classes: ClassTheme,
}

impl Default for SelectProperties {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SelectProperties {
    /// Create properties for an option set.
    #[must_use]
    pub fn new(options: impl Into<Arc<[SelectOption]>>) -> Self {
        Self {
            options: options.into(),
            value: None,
            enhanced: false,
            disabled: false,
            read_only: false,
            required: false,
            invalid: None,
            label: None,
            widget_id: None,
            name: None,
            placeholder: None,
            key: None,
            aria: BTreeMap::new(),
            get_option_id: None,
            extra_classes: ClassTheme::new(),
        }
    }

    /// Set the selected value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set or clear the selected value.
    #[must_use]
    pub fn value_opt(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    /// Choose the enhanced rendering path.
    #[must_use]
    pub const fn enhanced(mut self, enhanced: bool) -> Self {
        self.enhanced = enhanced;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set read-only state.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set required state.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark as invalid (`true`) or valid (`false`).
    #[must_use]
    pub const fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = Some(invalid);
        self
    }

    /// Set the field label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the element id.
    #[must_use]
    pub fn widget_id(mut self, id: impl Into<String>) -> Self {
        self.widget_id = Some(id.into());
        self
    }

    /// Set the form name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Set the key passed back to callbacks.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add an ARIA attribute (`aria-` is prefixed when missing).
    #[must_use]
    pub fn aria(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.aria.insert(name.into(), value.into());
        self
    }

    /// Override option ids.
    #[must_use]
    pub fn get_option_id(mut self, f: OptionIdFn) -> Self {
        self.get_option_id = Some(f);
        self
    }

    /// Append a class for a style key.
    #[must_use]
    pub fn extra_class(mut self, key: StyleKey, class: impl Into<String>) -> Self {
        self.extra_classes = self.extra_classes.with_extra(key, class);
        self
    }

    fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// State owned by the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InteractionState {
    is_open: bool,
    active_index: Option<usize>,
    focus: FocusTracker,
    /// One-shot: move focus into the list on the next render
    should_focus_list: bool,
    /// One-shot: move focus to the native element or trigger on the next render
    should_focus: bool,
}

/// Shared inputs of both rendering paths.
struct RenderContext<'a> {
    props: &'a SelectProperties,
    config: &'a SelectConfig,
    theme: &'a ClassTheme,
    widget_id: &'a str,
    focused: bool,
}

impl RenderContext<'_> {
    fn root(&self, open: bool) -> Node<SelectMessage> {
        let p = self.props;
        Node::element("div").key(ROOT_KEY).classes(self.theme.classes(&[
            Some(StyleKey::Root),
            p.disabled.then_some(StyleKey::Disabled),
            self.focused.then_some(StyleKey::Focused),
            (p.invalid == Some(true)).then_some(StyleKey::Invalid),
            (p.invalid == Some(false)).then_some(StyleKey::Valid),
            p.read_only.then_some(StyleKey::Readonly),
            p.required.then_some(StyleKey::Required),
            open.then_some(StyleKey::Open),
            (self.focused || p.has_value()).then_some(StyleKey::HasValue),
        ]))
    }

    fn arrow(&self) -> Node<SelectMessage> {
        Node::element("span").classes(self.theme.resolve(StyleKey::Arrow))
    }

    fn label(&self) -> Option<Node<SelectMessage>> {
        let p = self.props;
        let state = LabelState {
            disabled: p.disabled,
            focused: self.focused,
            invalid: p.invalid == Some(true),
            read_only: p.read_only,
            required: p.required,
        };
        p.label
            .as_deref()
            .map(|text| render_label(text, self.widget_id, state, self.theme))
    }
}

/// Select widget.
pub struct Select {
    props: SelectProperties,
    config: SelectConfig,
    focus_query: Box<dyn FocusQuery>,
    state: InteractionState,
    list: OptionListAdapter,
    base_id: String,
    on_value: Option<ValueCallback>,
    on_change: Option<ChangeCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    focus_request: Option<String>,
    dirty: bool,
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("base_id", &self.base_id)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Select {
    /// Create a select that asks `focus_query` whether its root holds focus.
    #[must_use]
    pub fn new(focus_query: Box<dyn FocusQuery>) -> Self {
        let config = SelectConfig::default();
        Self {
            props: SelectProperties::default(),
            list: OptionListAdapter::new(config.page_size),
            config,
            focus_query,
            state: InteractionState::default(),
            base_id: Uuid::new_v4().to_string(),
            on_value: None,
            on_change: None,
            on_focus: None,
            on_blur: None,
            focus_request: None,
            dirty: true,
        }
    }

    /// Apply configuration.
    #[must_use]
    pub fn with_config(mut self, config: SelectConfig) -> Self {
        self.list.set_page_size(config.page_size);
        self.config = config;
        self
    }

    /// Set initial properties.
    #[must_use]
    pub fn with_properties(mut self, props: SelectProperties) -> Self {
        self.props = props;
        self
    }

    /// Called with the committed value.
    #[must_use]
    pub fn on_value(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_value = Some(Box::new(f));
        self
    }

    /// Called with the committed option and widget key.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&SelectOption, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called when focus enters the root.
    #[must_use]
    pub fn on_focus(mut self, f: impl FnMut(&mut FocusChange) + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    /// Called when focus leaves the root. Preventing default keeps the popup open.
    #[must_use]
    pub fn on_blur(mut self, f: impl FnMut(&mut FocusChange) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    /// Current properties.
    #[must_use]
    pub const fn properties(&self) -> &SelectProperties {
        &self.props
    }

    /// Replace properties. Interaction state is reconciled at once; the tree
    /// follows on the next render.
    pub fn set_properties(&mut self, props: SelectProperties) {
        self.props = props;
        self.reconcile();
        self.dirty = true;
    }

    /// Replace properties and render.
    pub fn render_with(&mut self, props: SelectProperties) -> Node<SelectMessage> {
        self.set_properties(props);
        self.render()
    }

    /// Whether the popup is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Highlighted option index.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.state.active_index
    }

    /// Whether the root held focus at the last render.
    #[must_use]
    pub const fn had_focus(&self) -> bool {
        self.state.focus.had_focus()
    }

    /// Id of the native element or trigger.
    #[must_use]
    pub fn widget_id(&self) -> &str {
        self.props.widget_id.as_deref().unwrap_or(&self.base_id)
    }

    /// Id of the popup list.
    #[must_use]
    pub fn listbox_id(&self) -> String {
        format!("{}-listbox", self.widget_id())
    }

    /// Request input focus on the native element or trigger at the next render.
    pub fn focus(&mut self) {
        self.state.should_focus = true;
        self.dirty = true;
    }

    /// Open the popup and move focus into the list at the next render.
    ///
    /// The highlight is `active_index` when it is in range, otherwise the
    /// selected option (or none when nothing matches). Has no effect on the
    /// native path.
    pub fn open(&mut self, active_index: Option<usize>) {
        if !self.props.enhanced {
            return;
        }
        let options = &self.props.options;
        self.state.active_index = active_index
            .filter(|&i| i < options.len())
            .or_else(|| selected_index(options, self.props.value.as_deref()));
        self.state.is_open = true;
        self.state.should_focus_list = true;
        self.dirty = true;
        tracing::debug!(
            target: targets::SELECT,
            active_index = ?self.state.active_index,
            "open"
        );
    }

    /// Close the popup. The highlight is kept to seed the next open.
    pub fn close(&mut self) {
        self.state.is_open = false;
        self.dirty = true;
        tracing::debug!(target: targets::SELECT, "close");
    }

    /// Request a value change for `option`, then close.
    ///
    /// Callers must not commit disabled options.
    pub fn commit(&mut self, option: &SelectOption) {
        let key = self.props.key.as_deref().unwrap_or_default();
        tracing::debug!(target: targets::SELECT, value = option.commit_value(), "commit");
        if let Some(on_value) = self.on_value.as_mut() {
            on_value(option.commit_value());
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(option, key);
        }
        self.close();
    }

    /// Handle a key pressed on the trigger or inside the open popup.
    ///
    /// The event never propagates past the widget. While closed, Down and
    /// activation open the popup. While open, Escape closes and returns focus
    /// to the trigger. Every other key goes to the option list.
    ///
    /// Activation while open also closes, but first commits the highlighted
    /// option when it is enabled, so Enter selects the way a list click does.
    /// With no highlight, or a disabled one, it only closes.
    pub fn handle_trigger_key(&mut self, event: &mut KeyEvent) {
        event.stop_propagation();
        let key = event.key;

        if !self.state.is_open {
            if self.props.disabled || self.props.read_only {
                return;
            }
            if key.is_move_down() || key.is_activation() {
                tracing::trace!(target: targets::SELECT, ?key, "trigger key opens");
                event.prevent_default();
                self.open(None);
            }
            return;
        }

        if key.is_escape() {
            event.prevent_default();
            self.close();
            self.focus();
        } else if key.is_activation() {
            event.prevent_default();
            match self.active_option().cloned() {
                Some(option) => self.commit(&option),
                None => self.close(),
            }
            self.focus();
        } else {
            let len = self.props.options.len();
            match self.list.handle_key(key, self.state.active_index, len) {
                ListAction::ActiveIndex(i) => {
                    event.prevent_default();
                    self.set_active_index(i);
                }
                ListAction::None => {
                    tracing::trace!(target: targets::SELECT, ?key, "key ignored");
                }
            }
        }
    }

    fn active_option(&self) -> Option<&SelectOption> {
        self.state
            .active_index
            .and_then(|i| self.props.options.get(i))
            .filter(|o| !o.disabled)
    }

    fn set_active_index(&mut self, index: usize) {
        if index < self.props.options.len() && self.state.active_index != Some(index) {
            self.state.active_index = Some(index);
            self.dirty = true;
        }
    }

    fn toggle(&mut self) {
        if self.props.disabled || self.props.read_only {
            return;
        }
        if self.state.is_open {
            self.close();
        } else {
            self.open(None);
        }
    }

    /// Detect focus edges and notify the owner. Returns whether the root
    /// holds focus now.
    fn observe_focus(&mut self) -> bool {
        let contains = self.focus_query.contains_focus(ROOT_KEY);
        let Some(edge) = self.state.focus.observe(contains) else {
            return contains;
        };

        let mut change = FocusChange::new(self.props.key.clone().unwrap_or_default(), edge);
        tracing::debug!(target: targets::SELECT, ?edge, "focus edge");
        match edge {
            FocusEdge::Gained => {
                if let Some(on_focus) = self.on_focus.as_mut() {
                    on_focus(&mut change);
                }
            }
            FocusEdge::Lost => {
                if let Some(on_blur) = self.on_blur.as_mut() {
                    on_blur(&mut change);
                }
                if !change.default_prevented() {
                    // Pending focus requests would pull focus back in.
                    self.state.should_focus_list = false;
                    self.state.should_focus = false;
                    if self.state.is_open {
                        self.close();
                    }
                }
            }
        }
        contains
    }

    /// Bring interaction state back in line with the current properties.
    fn reconcile(&mut self) {
        if !self.props.enhanced && self.state.is_open {
            self.state.is_open = false;
            self.state.should_focus_list = false;
        }
        if self
            .state
            .active_index
            .is_some_and(|i| i >= self.props.options.len())
        {
            self.state.active_index = None;
        }
    }
}

impl Component for Select {
    type Message = SelectMessage;

    fn root_key(&self) -> &str {
        ROOT_KEY
    }

    fn render(&mut self) -> Node<SelectMessage> {
        // Edges first: a blur closes the popup before the list focus request is read.
        let focused = self.observe_focus();
        self.reconcile();

        let focus_list = std::mem::take(&mut self.state.should_focus_list);
        let focus_self = std::mem::take(&mut self.state.should_focus);

        let theme = self.config.theme.clone().merged(&self.props.extra_classes);
        let widget_id = self.props.widget_id.as_deref().unwrap_or(&self.base_id);
        let ctx = RenderContext {
            props: &self.props,
            config: &self.config,
            theme: &theme,
            widget_id,
            focused,
        };

        let node = if self.props.enhanced {
            enhanced::render(&ctx, &mut self.list, self.state.is_open, self.state.active_index)
        } else {
            native::render(&ctx)
        };

        self.focus_request = if focus_list && self.state.is_open {
            Some(LISTBOX_KEY.to_string())
        } else if focus_self {
            Some(if self.props.enhanced { TRIGGER_KEY } else { NATIVE_KEY }.to_string())
        } else {
            None
        };

        tracing::trace!(
            target: targets::SELECT,
            enhanced = self.props.enhanced,
            open = self.state.is_open,
            focused,
            "render"
        );
        self.dirty = false;
        node
    }

    fn update(&mut self, message: SelectMessage, event: &mut Event) {
        match message {
            SelectMessage::NativeChange => {
                let Event::Change { value } = event else {
                    return;
                };
                // Stale values resolve to nothing rather than a commit.
                let option = find_by_value(&self.props.options, value.as_str()).cloned();
                if let Some(option) = option {
                    self.commit(&option);
                }
            }
            SelectMessage::TriggerClick => self.toggle(),
            SelectMessage::Key => {
                if let Some(key_event) = event.as_key_mut() {
                    self.handle_trigger_key(key_event);
                }
            }
            SelectMessage::OptionSelected(index) => {
                let Some(option) = self.props.options.get(index).cloned() else {
                    return;
                };
                if option.disabled {
                    return;
                }
                self.state.active_index = Some(index);
                self.commit(&option);
                self.focus();
            }
            SelectMessage::ActiveIndexChanged => {
                if let Event::ActiveIndexChange { index } = *event {
                    self.set_active_index(index);
                }
            }
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn take_focus_request(&mut self) -> Option<String> {
        self.focus_request.take()
    }
}
