//! Layered settings store
//!
//! A `SettingsStore` behaves like a key/value map backed by two layers:
//! 1. Profile defaults (shared with every store of the same profile)
//! 2. Instance overrides (private to this store)
//!
//! Lookups resolve overrides first. Writes always land in the overrides.
//! Deletes remove from the defaults when the key is there, which changes
//! every store sharing the profile.

use std::collections::{btree_set, BTreeSet};

use serde_json::Value;
use tracing::{debug, warn};

use super::error::SettingsError;
use super::profile::{Layer, Profile};
use super::reserved::is_reserved_key;
use super::snapshot::{SettingOrigin, SettingsSnapshot};

/// Key/value view over a profile's defaults and this instance's overrides
#[derive(Debug)]
pub struct SettingsStore {
    profile: Profile,
    overrides: Layer,
}

impl SettingsStore {
    /// Create a store bound to `profile` with no overrides
    pub fn new(profile: &Profile) -> Self {
        Self::from_parts(profile.clone(), Layer::new())
    }

    /// Build a store from a profile handle and an initial overrides layer.
    ///
    /// Reserved keys in `overrides` are dropped.
    pub fn from_parts<I, K, V>(profile: Profile, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut store = Self {
            profile,
            overrides: Layer::new(),
        };
        store.update(overrides);
        store
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Number of visible keys
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.profile.read().is_empty()
    }

    /// Resolve `key`, overrides first, then profile defaults
    pub fn get(&self, key: &str) -> Result<Value, SettingsError> {
        self.lookup(key)
            .ok_or_else(|| SettingsError::not_found(self.profile.name(), key))
    }

    /// Write `value` into this store's overrides.
    ///
    /// A default with the same key is shadowed, not changed. Reserved keys
    /// are refused with a warning.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if is_reserved_key(&key) {
            warn!(profile = %self.profile.name(), key = %key, "refusing to set reserved key");
            return;
        }
        self.overrides.insert(key, value.into());
    }

    /// Delete `key` from the layer it is found in, defaults first.
    ///
    /// Removing a default affects every store sharing the profile, including
    /// ones with no override for `key`.
    pub fn delete(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.remove(key) {
            Ok(())
        } else {
            Err(SettingsError::not_found(self.profile.name(), key))
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.overrides.contains_key(key) || self.profile.has_default(key)
    }

    /// Union of default and override keys, read from both layers now
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self.profile.read().keys().cloned().collect();
        keys.extend(self.overrides.keys().cloned());
        keys
    }

    pub fn values(&self) -> Vec<Value> {
        self.iter_values().collect()
    }

    pub fn items(&self) -> Vec<(String, Value)> {
        self.iter_items().collect()
    }

    /// Iterate over the keys visible at the time of the call
    pub fn iter_keys(&self) -> btree_set::IntoIter<String> {
        self.keys().into_iter()
    }

    /// Iterate over values, resolving each key as the iterator advances
    pub fn iter_values(&self) -> impl Iterator<Item = Value> + '_ {
        self.iter_items().map(|(_, value)| value)
    }

    /// Iterate over `(key, value)` pairs, resolving each key as the iterator
    /// advances. A default removed through another handle mid-iteration is
    /// skipped.
    pub fn iter_items(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.iter_keys().filter_map(move |key| {
            let value = self.lookup(&key)?;
            Some((key, value))
        })
    }

    /// Resolve `key`, or return `fallback` if it isn't set
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Value {
        self.lookup(key).unwrap_or_else(|| fallback.into())
    }

    /// Return the current value of `key`, or store `fallback` as an override
    /// and return it.
    pub fn set_default(&mut self, key: impl Into<String>, fallback: impl Into<Value>) -> Value {
        let key = key.into();
        if let Some(existing) = self.lookup(&key) {
            return existing;
        }

        let fallback = fallback.into();
        self.set(key, fallback.clone());
        fallback
    }

    /// Remove `key` and return the value it had, or `fallback` if it wasn't set
    pub fn pop(&mut self, key: &str, fallback: impl Into<Value>) -> Value {
        match self.lookup(key) {
            Some(value) => {
                self.remove(key);
                value
            }
            None => fallback.into(),
        }
    }

    /// Like `pop`, paired with the key
    pub fn pop_item(&mut self, key: &str, fallback: impl Into<Value>) -> (String, Value) {
        let value = self.pop(key, fallback);
        (key.to_string(), value)
    }

    /// New store on the same profile with its own copy of the overrides.
    ///
    /// Override changes on either store stay local; default changes are
    /// shared.
    pub fn copy(&self) -> Self {
        Self::from_parts(self.profile.clone(), self.overrides.clone())
    }

    /// Delete every visible key, one at a time.
    ///
    /// Keys found in the defaults are removed from the profile. A key that is
    /// both a default and an override only loses its default, so its override
    /// remains visible afterwards.
    pub fn clear(&mut self) {
        let keys = self.keys();
        debug!(profile = %self.profile.name(), keys = keys.len(), "clearing settings");
        for key in &keys {
            self.remove(key);
        }
    }

    /// `set` every pair in `updates`
    pub fn update<I, K, V>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in updates {
            self.set(key, value);
        }
    }

    /// Which layer `key` currently resolves from
    pub fn origin(&self, key: &str) -> Option<SettingOrigin> {
        if self.overrides.contains_key(key) {
            Some(SettingOrigin::Override)
        } else if self.profile.has_default(key) {
            Some(SettingOrigin::Default)
        } else {
            None
        }
    }

    /// Point-in-time copy of both layers
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            profile: self.profile.name().to_string(),
            defaults: self.profile.defaults(),
            overrides: self
                .overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Effective settings as a flat JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.iter_items().collect())
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        match self.overrides.get(key) {
            Some(value) => Some(value.clone()),
            None => self.profile.default_value(key),
        }
    }

    /// Remove `key` from the defaults if present there, else from the
    /// overrides. Returns false if neither layer had it.
    fn remove(&mut self, key: &str) -> bool {
        if self.profile.remove_default_value(key).is_some() {
            return true;
        }
        self.overrides.remove(key).is_some()
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<'a> IntoIterator for &'a SettingsStore {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_keys()
    }
}

impl<K, V> Extend<(K, V)> for SettingsStore
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}
