//! Selectable option data.

use serde::{Deserialize, Serialize};

/// A selectable option.
///
/// Options are compared by `value`: two options with equal values are the
/// same option as far as selection is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label; falls back to `value`
    #[serde(default)]
    pub label: Option<String>,
    /// Value reported on commit
    #[serde(default)]
    pub value: Option<String>,
    /// Whether this option can be committed
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: Some(label.into()),
            disabled: false,
        }
    }

    /// Create an option where value equals label.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    /// Create an option with a value and no label.
    #[must_use]
    pub fn value_only(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Label shown to the user: `label`, else `value`, else empty.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or_default()
    }

    /// Value committed for this option: `value`, else empty.
    #[must_use]
    pub fn commit_value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Whether this option is the one selected by `selected`.
    ///
    /// An unset selection matches nothing.
    #[must_use]
    pub fn is_selected_by(&self, selected: Option<&str>) -> bool {
        selected.is_some() && self.value.as_deref() == selected
    }
}

/// Index of the option whose value equals `selected`, if any.
#[must_use]
pub fn selected_index(options: &[SelectOption], selected: Option<&str>) -> Option<usize> {
    options.iter().position(|o| o.is_selected_by(selected))
}

/// Option whose value equals `selected`, if any.
#[must_use]
pub fn find_by_value<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a SelectOption> {
    options.iter().find(|o| o.value.as_deref() == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_option_new() {
        let opt = SelectOption::new("val", "Label");
        assert_eq!(opt.value.as_deref(), Some("val"));
        assert_eq!(opt.label.as_deref(), Some("Label"));
        assert!(!opt.disabled);
    }

    #[test]
    fn test_select_option_simple() {
        let opt = SelectOption::simple("Same");
        assert_eq!(opt.display_label(), "Same");
        assert_eq!(opt.commit_value(), "Same");
    }

    #[test]
    fn test_select_option_disabled() {
        let opt = SelectOption::new("v", "L").disabled(true);
        assert!(opt.disabled);
    }

    #[test]
    fn test_label_falls_back_to_value() {
        assert_eq!(SelectOption::value_only("v").display_label(), "v");
        assert_eq!(SelectOption::default().display_label(), "");
    }

    #[test]
    fn test_commit_value_falls_back_to_empty() {
        let opt = SelectOption {
            label: Some("No value".to_string()),
            ..SelectOption::default()
        };
        assert_eq!(opt.commit_value(), "");
    }

    #[test]
    fn test_is_selected_by() {
        let opt = SelectOption::simple("a");
        assert!(opt.is_selected_by(Some("a")));
        assert!(!opt.is_selected_by(Some("b")));
        assert!(!opt.is_selected_by(None));
        assert!(!SelectOption::default().is_selected_by(None));
    }

    #[test]
    fn test_selected_index_and_find() {
        let opts = vec![
            SelectOption::simple("a"),
            SelectOption::simple("b"),
            SelectOption::simple("b").disabled(true),
        ];
        assert_eq!(selected_index(&opts, Some("b")), Some(1));
        assert_eq!(selected_index(&opts, Some("zzz")), None);
        assert_eq!(selected_index(&opts, None), None);
        assert_eq!(find_by_value(&opts, "b"), Some(&opts[1]));
        assert_eq!(find_by_value(&opts, "c"), None);
    }

    #[test]
    fn test_deserialize_partial_option() {
        let opt: SelectOption = serde_json::from_str(r#"{"value":"x"}"#).unwrap();
        assert_eq!(opt, SelectOption::value_only("x"));
    }
}
