//! Settings errors

/// Errors raised by layered settings lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("'{profile}' settings profile has no setting '{key}'")]
    NotFound { profile: String, key: String },
}

impl SettingsError {
    pub(crate) fn not_found(profile: &str, key: &str) -> Self {
        Self::NotFound {
            profile: profile.to_string(),
            key: key.to_string(),
        }
    }

    /// Returns true if the key was absent from the visible key set
    pub fn is_not_found(&self) -> bool {
        matches!(self, SettingsError::NotFound { .. })
    }

    /// The key the failed operation was asked about
    pub fn key(&self) -> &str {
        match self {
            SettingsError::NotFound { key, .. } => key,
        }
    }
}
