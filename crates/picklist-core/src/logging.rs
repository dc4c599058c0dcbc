//! Tracing targets used across Picklist.
//!
//! Picklist emits `tracing` events but never installs a subscriber. To see
//! them, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("picklist::select=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Select widget state transitions (open, close, commit, focus edges).
    pub const SELECT: &str = "picklist::select";
    /// Option list derivation and key traversal.
    pub const OPTION_LIST: &str = "picklist::option_list";
    /// Configuration loading.
    pub const CONFIG: &str = "picklist::config";
    /// Headless render harness.
    pub const HARNESS: &str = "picklist::harness";
}
