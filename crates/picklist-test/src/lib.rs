#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]
//! Testing harness for Picklist widgets.
//!
//! ```ignore
//! use picklist_test::Harness;
//!
//! let mut h = Harness::new(|focus| Select::new(focus).with_properties(props));
//! h.click("[key='trigger']");
//! h.assert_attr("[key='trigger']", "aria-expanded", Some("true"));
//! ```

pub mod harness;
pub mod selector;

pub use harness::{FocusState, Harness};
pub use selector::{Selector, SelectorError, SelectorParser};
