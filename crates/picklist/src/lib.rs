//! Picklist: a themeable, accessible select widget.
//!
//! Two rendering paths share one controller:
//!
//! - **native**: a platform `select` element plus a disabled placeholder entry
//! - **enhanced**: a combobox trigger and an always-present popup list
//!
//! ```ignore
//! use picklist::prelude::*;
//!
//! let mut select = Select::new(Box::new(|_: &str| false))
//!     .with_config(SelectConfig::from_yaml("placeholder: Pick a fruit")?)
//!     .on_value(|value| println!("picked {value}"));
//!
//! let tree = select.render_with(
//!     SelectProperties::new(vec![SelectOption::simple("Apple"), SelectOption::simple("Pear")])
//!         .enhanced(true),
//! );
//! ```
//!
//! Events are logged through `tracing` under the targets in
//! [`logging::targets`]; no subscriber is installed.

pub use picklist_core::*;
pub use picklist_widgets::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use picklist_core::{
        ClassTheme, Component, ConfigError, Event, FocusChange, FocusEdge, FocusQuery, Key,
        KeyEvent, Node, SelectConfig, StyleKey,
    };
    pub use picklist_widgets::{
        ListAction, OptionListAdapter, Select, SelectMessage, SelectOption, SelectProperties,
    };
}
