//! Layered settings - map-like access to profile defaults and instance overrides
//!
//! A profile holds default settings shared by every store created from it.
//! Each store adds its own overrides on top and exposes the combination as an
//! ordinary key/value container.

pub mod settings;

pub use settings::{
    is_reserved_key, Profile, ProfileRegistry, SettingOrigin, SettingsError, SettingsSnapshot,
    SettingsStore,
};
