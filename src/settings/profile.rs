//! Settings profiles (the shared defaults layer)
//!
//! A profile is a named bundle of default settings. Every store created from
//! a profile holds a handle to the same defaults layer, so a change made
//! through any handle is seen by all of them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::reserved::is_reserved_key;
use super::store::SettingsStore;

/// One layer of settings, keyed by setting name
pub(crate) type Layer = BTreeMap<String, Value>;

struct ProfileInner {
    name: String,
    defaults: RwLock<Layer>,
}

/// Shared handle to a named defaults layer
///
/// Cloning a `Profile` clones the handle, not the defaults. All access to the
/// defaults goes through one lock shared by every handle, so stores on
/// different threads can read and mutate the same profile.
#[derive(Clone)]
pub struct Profile {
    inner: Arc<ProfileInner>,
}

impl Profile {
    /// Create a profile from its default settings.
    ///
    /// Reserved keys are dropped with a warning.
    pub fn new<I, K, V>(name: impl Into<String>, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        let mut layer = Layer::new();
        for (key, value) in defaults {
            let key = key.into();
            if is_reserved_key(&key) {
                warn!(profile = %name, key = %key, "ignoring reserved default key");
                continue;
            }
            layer.insert(key, value.into());
        }

        Self {
            inner: Arc::new(ProfileInner {
                name,
                defaults: RwLock::new(layer),
            }),
        }
    }

    /// Create a profile with no defaults
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Layer::new())
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Create a new store bound to this profile, with no overrides
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(self)
    }

    /// Returns true if both handles refer to the same defaults layer
    pub fn ptr_eq(&self, other: &Profile) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Current default value for `key`, if any
    pub fn default_value(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    pub fn has_default(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Names of all current defaults, sorted
    pub fn default_keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Copy of the current defaults
    pub fn defaults(&self) -> Map<String, Value> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Set a default for every store sharing this profile.
    ///
    /// Returns the previous default. Reserved keys are refused.
    pub fn set_default_value(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let key = key.into();
        if is_reserved_key(&key) {
            warn!(profile = %self.name(), key = %key, "refusing to set reserved default key");
            return None;
        }
        self.write().insert(key, value.into())
    }

    /// Remove a default from every store sharing this profile
    pub fn remove_default_value(&self, key: &str) -> Option<Value> {
        let removed = self.write().remove(key);
        if removed.is_some() {
            debug!(profile = %self.name(), key, "removed profile-wide default");
        }
        removed
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Layer> {
        // Plain map with no cross-entry invariants, so a poisoned lock is still usable
        self.inner
            .defaults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Layer> {
        self.inner
            .defaults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name())
            .field("defaults", &self.default_keys())
            .finish()
    }
}
