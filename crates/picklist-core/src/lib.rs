//! Core types and traits for the Picklist select widget.
//!
//! This crate provides the render-layer capabilities widgets consume:
//! - Node tree: [`Node`], [`AttrValue`], listeners bound to [`EventType`]s
//! - Events: [`Event`], [`Key`], [`KeyEvent`]
//! - Focus: [`FocusQuery`], [`FocusTracker`], [`FocusChange`]
//! - Theming: [`ClassTheme`], [`StyleKey`]
//! - Change detection: [`ReferenceMemo`], [`TreeDiffer`]
//! - Configuration: [`SelectConfig`], [`ConfigError`]

pub mod aria;
mod component;
mod config;
pub mod diff;
mod error;
mod event;
mod focus;
pub mod logging;
mod node;
mod theme;

pub use aria::AccessibleRole;
pub use component::Component;
pub use config::SelectConfig;
pub use diff::{reference_changed, DiffOp, DiffResult, ReferenceMemo, TreeDiffer};
pub use error::ConfigError;
pub use event::{Event, EventType, Key, KeyEvent};
pub use focus::{FocusChange, FocusEdge, FocusQuery, FocusTracker};
pub use node::{AttrValue, Listener, Node, NodeKind};
pub use theme::{ClassTheme, StyleKey};
