//! Layered settings
//!
//! Settings resolve through two layers:
//! 1. Profile defaults, shared by every store created from the profile
//! 2. Instance overrides, private to one store

mod error;
mod profile;
mod registry;
mod reserved;
mod snapshot;
mod store;

pub use error::SettingsError;
pub use profile::Profile;
pub use registry::ProfileRegistry;
pub use reserved::is_reserved_key;
pub use snapshot::{SettingOrigin, SettingsSnapshot};
pub use store::SettingsStore;
