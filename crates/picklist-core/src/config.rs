//! Widget configuration loaded from YAML.
//!
//! ```yaml
//! placeholder: "Choose a fruit"
//! page_size: 10
//! classes:
//!   root: fruit-select
//!   option_active: highlighted
//! extra_classes:
//!   root: [wide]
//! ```

use crate::error::ConfigError;
use crate::logging::targets;
use crate::theme::{ClassTheme, StyleKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_PAGE_SIZE: usize = 5;

/// On-disk shape; style key names are validated on conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    placeholder: Option<String>,
    native_placeholder_label: Option<String>,
    page_size: Option<usize>,
    #[serde(default)]
    classes: BTreeMap<String, String>,
    #[serde(default)]
    extra_classes: BTreeMap<String, Vec<String>>,
}

/// Select widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectConfig {
    /// Class resolution
    pub theme: ClassTheme,
    /// Enhanced trigger text when nothing is selected
    pub placeholder: Option<String>,
    /// Text of the synthetic "no selection" option in the native path
    pub native_placeholder_label: String,
    /// Items moved by PageUp/PageDown in the option list
    pub page_size: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            theme: ClassTheme::new(),
            placeholder: None,
            native_placeholder_label: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SelectConfig {
    /// Parse configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = if yaml.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        Self::from_raw(raw)
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: ClassTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the page size, clamped to at least one item.
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let page_size = raw.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            tracing::warn!(target: targets::CONFIG, "rejected page_size 0");
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let mut theme =
            ClassTheme::from_overrides(raw.classes.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        for (name, extras) in &raw.extra_classes {
            let key: StyleKey = name.parse()?;
            for class in extras {
                theme = theme.with_extra(key, class.clone());
            }
        }

        tracing::debug!(
            target: targets::CONFIG,
            page_size,
            class_overrides = raw.classes.len(),
            extra_classes = raw.extra_classes.len(),
            "loaded select config"
        );
        Ok(Self {
            theme,
            placeholder: raw.placeholder,
            native_placeholder_label: raw.native_placeholder_label.unwrap_or_default(),
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = SelectConfig::default();
        assert_eq!(c.page_size, 5);
        assert!(c.placeholder.is_none());
        assert_eq!(c.native_placeholder_label, "");
        assert_eq!(c.theme, ClassTheme::new());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SelectConfig::from_yaml("").unwrap(), SelectConfig::default());
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
placeholder: "Pick one"
native_placeholder_label: "--"
page_size: 10
classes:
  root: fruit
  option_active: hl
extra_classes:
  root: [wide, tall]
"#;
        let c = SelectConfig::from_yaml(yaml).unwrap();
        assert_eq!(c.placeholder.as_deref(), Some("Pick one"));
        assert_eq!(c.native_placeholder_label, "--");
        assert_eq!(c.page_size, 10);
        assert_eq!(c.theme.resolve(StyleKey::Root), vec!["fruit", "wide", "tall"]);
        assert_eq!(c.theme.class(StyleKey::OptionActive), "hl");
    }

    #[test]
    fn test_from_yaml_zero_page_size() {
        let err = SelectConfig::from_yaml("page_size: 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "page_size"));
    }

    #[test]
    fn test_from_yaml_unknown_style_key() {
        let err = SelectConfig::from_yaml("classes:\n  sparkle: x\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStyleKey(ref k) if k == "sparkle"));
    }

    #[test]
    fn test_from_yaml_unknown_field() {
        let err = SelectConfig::from_yaml("colour: red").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_builder_page_size_clamped() {
        assert_eq!(SelectConfig::default().page_size(0).page_size, 1);
    }
}
