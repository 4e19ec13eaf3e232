//! Profile registry
//!
//! Maps profile names to their shared defaults. A profile is defined once;
//! later definitions under the same name get the existing handle back.

use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use super::profile::Profile;
use super::store::SettingsStore;

/// Named collection of profiles
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: RwLock<BTreeMap<String, Profile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry. Profiles defined here live until the process exits.
    pub fn global() -> &'static ProfileRegistry {
        static GLOBAL: OnceLock<ProfileRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ProfileRegistry::new)
    }

    /// Define a profile, or return the existing one if `name` is taken.
    ///
    /// `defaults` is ignored when the profile already exists.
    pub fn define<I, K, V>(&self, name: impl Into<String>, defaults: I) -> Profile
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        let mut profiles = self
            .profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = profiles.get(&name) {
            debug!(profile = %name, "profile already defined, keeping first definition");
            return existing.clone();
        }

        let profile = Profile::new(name.clone(), defaults);
        debug!(
            profile = %name,
            defaults = profile.default_keys().len(),
            "defined settings profile"
        );
        profiles.insert(name, profile.clone());
        profile
    }

    pub fn get(&self, name: &str) -> Option<Profile> {
        self.read(|profiles| profiles.get(name).cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read(|profiles| profiles.contains_key(name))
    }

    /// Defined profile names, sorted
    pub fn names(&self) -> Vec<String> {
        self.read(|profiles| profiles.keys().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.read(|profiles| profiles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|profiles| profiles.is_empty())
    }

    /// New store on the named profile, if it is defined
    pub fn store(&self, name: &str) -> Option<SettingsStore> {
        self.get(name).map(|profile| profile.store())
    }

    fn read<T>(&self, f: impl FnOnce(&BTreeMap<String, Profile>) -> T) -> T {
        let profiles = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&profiles)
    }
}
