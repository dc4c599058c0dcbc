//! Theme class resolution.
//!
//! Widgets refer to styles by logical [`StyleKey`]s. A [`ClassTheme`] maps
//! each key to a concrete class name and may append extra classes supplied by
//! the owner.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Logical style keys used by the select widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKey {
    /// Root container
    Root,
    /// Native select element
    Input,
    /// Enhanced trigger
    Trigger,
    /// Trigger text when nothing is selected
    Placeholder,
    /// Expand arrow
    Arrow,
    /// Popup container
    Dropdown,
    /// Popup visible / root while open
    Open,
    /// Root contains focus
    Focused,
    /// Disabled state
    Disabled,
    /// Explicitly invalid
    Invalid,
    /// Explicitly valid
    Valid,
    /// Read-only state
    Readonly,
    /// Required state
    Required,
    /// Root shows content (focus or a value)
    HasValue,
    /// Field label
    Label,
    /// List component root
    Listbox,
    /// List option
    Option,
    /// Highlighted list option
    OptionActive,
    /// Selected list option
    OptionSelected,
    /// Disabled list option
    OptionDisabled,
}

impl StyleKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Root,
        Self::Input,
        Self::Trigger,
        Self::Placeholder,
        Self::Arrow,
        Self::Dropdown,
        Self::Open,
        Self::Focused,
        Self::Disabled,
        Self::Invalid,
        Self::Valid,
        Self::Readonly,
        Self::Required,
        Self::HasValue,
        Self::Label,
        Self::Listbox,
        Self::Option,
        Self::OptionActive,
        Self::OptionSelected,
        Self::OptionDisabled,
    ];

    /// Config name (`snake_case`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Input => "input",
            Self::Trigger => "trigger",
            Self::Placeholder => "placeholder",
            Self::Arrow => "arrow",
            Self::Dropdown => "dropdown",
            Self::Open => "open",
            Self::Focused => "focused",
            Self::Disabled => "disabled",
            Self::Invalid => "invalid",
            Self::Valid => "valid",
            Self::Readonly => "readonly",
            Self::Required => "required",
            Self::HasValue => "has_value",
            Self::Label => "label",
            Self::Listbox => "listbox",
            Self::Option => "option",
            Self::OptionActive => "option_active",
            Self::OptionSelected => "option_selected",
            Self::OptionDisabled => "option_disabled",
        }
    }

    /// Built-in class name, e.g. `select-has-value`.
    #[must_use]
    pub fn default_class(self) -> String {
        format!("select-{}", self.name().replace('_', "-"))
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownStyleKey(s.to_string()))
    }
}

/// Maps logical style keys to class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTheme {
    /// Replacement class names
    #[serde(default)]
    classes: BTreeMap<StyleKey, String>,
    /// Extra classes appended after the resolved class
    #[serde(default)]
    extra: BTreeMap<StyleKey, Vec<String>>,
}

impl ClassTheme {
    /// Theme with built-in class names only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a theme from `name -> class` overrides.
    pub fn from_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let mut theme = Self::new();
        for (name, class) in overrides {
            theme.classes.insert(name.parse()?, class.to_string());
        }
        Ok(theme)
    }

    /// Replace the class for `key`.
    #[must_use]
    pub fn with_class(mut self, key: StyleKey, class: impl Into<String>) -> Self {
        self.classes.insert(key, class.into());
        self
    }

    /// Append an extra class for `key`.
    #[must_use]
    pub fn with_extra(mut self, key: StyleKey, class: impl Into<String>) -> Self {
        self.extra.entry(key).or_default().push(class.into());
        self
    }

    /// Overlay another theme: its replacements win, its extras are appended.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        for (k, v) in &other.classes {
            self.classes.insert(*k, v.clone());
        }
        for (k, v) in &other.extra {
            self.extra.entry(*k).or_default().extend(v.iter().cloned());
        }
        self
    }

    /// Classes for a single key.
    #[must_use]
    pub fn resolve(&self, key: StyleKey) -> Vec<String> {
        let mut out = vec![self
            .classes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_class())];
        if let Some(extra) = self.extra.get(&key) {
            out.extend(extra.iter().cloned());
        }
        out
    }

    /// Classes for a list of optional keys; `None` entries are skipped.
    #[must_use]
    pub fn classes(&self, keys: &[Option<StyleKey>]) -> Vec<String> {
        keys.iter().flatten().flat_map(|k| self.resolve(*k)).collect()
    }

    /// Single resolved class name without extras.
    #[must_use]
    pub fn class(&self, key: StyleKey) -> String {
        self.classes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_class())
    }
}
