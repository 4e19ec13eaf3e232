//! Settings provenance
//!
//! A snapshot captures both layers of a store so callers can see where each
//! effective value came from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Layer a setting resolves from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingOrigin {
    /// Shared profile default
    Default,
    /// Instance override
    Override,
}

/// Point-in-time copy of a store's layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// Profile name
    pub profile: String,

    /// Profile defaults at snapshot time
    pub defaults: Map<String, Value>,

    /// Instance overrides at snapshot time
    pub overrides: Map<String, Value>,
}

impl SettingsSnapshot {
    /// Effective settings as a flat JSON object (overrides win)
    pub fn to_value(&self) -> Value {
        let mut merged = self.defaults.clone();
        for (key, value) in &self.overrides {
            merged.insert(key.clone(), value.clone());
        }
        Value::Object(merged)
    }

    pub fn origin(&self, key: &str) -> Option<SettingOrigin> {
        if self.overrides.contains_key(key) {
            Some(SettingOrigin::Override)
        } else if self.defaults.contains_key(key) {
            Some(SettingOrigin::Default)
        } else {
            None
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
