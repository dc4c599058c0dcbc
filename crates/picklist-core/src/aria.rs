//! ARIA roles and attribute helpers.
//!
//! Attribute names and values produced here are consumed by assistive
//! technology and must match the WAI-ARIA vocabulary exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `aria-expanded`
pub const EXPANDED: &str = "aria-expanded";
/// `aria-haspopup`
pub const HAS_POPUP: &str = "aria-haspopup";
/// `aria-required`
pub const REQUIRED: &str = "aria-required";
/// `aria-invalid`
pub const INVALID: &str = "aria-invalid";
/// `aria-readonly`
pub const READONLY: &str = "aria-readonly";
/// `aria-controls`
pub const CONTROLS: &str = "aria-controls";
/// `aria-activedescendant`
pub const ACTIVE_DESCENDANT: &str = "aria-activedescendant";
/// `aria-selected`
pub const SELECTED: &str = "aria-selected";
/// `aria-disabled`
pub const DISABLED: &str = "aria-disabled";

/// Accessible role of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Combo box / dropdown select
    ComboBox,
    /// Popup list of options
    ListBox,
    /// Option inside a list box
    Option,
}

impl AccessibleRole {
    /// Value of the `role` attribute, `None` for generic elements.
    #[must_use]
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Generic => None,
            Self::Button => Some("button"),
            Self::ComboBox => Some("combobox"),
            Self::ListBox => Some("listbox"),
            Self::Option => Some("option"),
        }
    }
}

/// `"true"` / `"false"` for state attributes that are always present.
#[must_use]
pub const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// `Some("true")` when set, `None` (attribute omitted) otherwise.
#[must_use]
pub const fn true_or_absent(value: bool) -> Option<&'static str> {
    if value {
        Some("true")
    } else {
        None
    }
}

/// Normalize caller-supplied ARIA properties into attribute pairs.
///
/// Keys are prefixed with `aria-` unless they already carry the prefix or
/// are `role`.
#[must_use]
pub fn format_aria_properties(aria: &BTreeMap<String, String>) -> Vec<(String, String)> {
    aria.iter()
        .map(|(k, v)| {
            let name = if k == "role" || k.starts_with("aria-") {
                k.clone()
            } else {
                format!("aria-{k}")
            };
            (name, v.clone())
        })
        .collect()
}
