//! Select widget for Picklist.
//!
//! [`Select`] renders either a native `select` element or an enhanced
//! combobox (trigger plus popup list). The popup list is an external
//! component driven through [`OptionListAdapter`].

pub mod label;
pub mod option;
pub mod option_list;
pub mod select;

pub use label::{render_label, LabelState};
pub use option::{find_by_value, selected_index, SelectOption};
pub use option_list::{ListAction, ListboxOption, ListboxRender, OptionListAdapter};
pub use select::{
    ChangeCallback, FocusCallback, OptionIdFn, Select, SelectMessage, SelectProperties,
    ValueCallback, LISTBOX_KEY, NATIVE_KEY, ROOT_KEY, TRIGGER_KEY,
};
