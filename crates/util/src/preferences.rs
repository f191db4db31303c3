//! User preference persistence for the Local Market TUI.
//!
//! A tiny JSON-backed store that records lightweight configuration such as
//! the preferred theme and the category opened on launch. The file lives in
//! the standard configuration directory (`~/.config/localmarket/preferences.json`
//! on most platforms). Filter selections are never written here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use localmarket_types::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "LOCALMARKET_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the theme selected for the TUI.
    #[serde(default)]
    pub preferred_theme: Option<String>,
    /// Category shown when the TUI starts.
    #[serde(default)]
    pub default_category: Option<Category>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Create a store at the default path, honouring [`PREFERENCES_PATH_ENV`].
    pub fn new() -> Result<Self, PreferencesError> {
        Self::with_path(default_preferences_path())
    }

    /// Create a store rooted at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<String> {
        self.snapshot().preferred_theme
    }

    /// Persist a new preferred theme identifier.
    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        self.update(|payload| payload.preferred_theme = theme_id)
    }

    /// Returns the category to open on launch, if one was saved.
    pub fn default_category(&self) -> Option<Category> {
        self.snapshot().default_category
    }

    /// Persist the category to open on launch.
    pub fn set_default_category(&self, category: Category) -> Result<(), PreferencesError> {
        self.update(|payload| payload.default_category = Some(category))
    }

    fn snapshot(&self) -> PreferencesPayload {
        match self.payload.lock() {
            Ok(payload) => payload.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut PreferencesPayload)) -> Result<(), PreferencesError> {
        let mut payload = match self.payload.lock() {
            Ok(payload) => payload,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut payload);
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("localmarket")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let prefs = UserPreferences::with_path(dir.path().join("nope.json")).expect("load");
        assert_eq!(prefs.preferred_theme(), None);
        assert_eq!(prefs.default_category(), None);
    }

    #[test]
    fn values_round_trip_through_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);
        let prefs = UserPreferences::with_path(&path).expect("load");
        prefs.set_preferred_theme(Some("dracula".into())).expect("save theme");
        prefs.set_default_category(Category::Rent).expect("save category");

        let reloaded = UserPreferences::with_path(&path).expect("reload");
        assert_eq!(reloaded.preferred_theme().as_deref(), Some("dracula"));
        assert_eq!(reloaded.default_category(), Some(Category::Rent));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{not json").expect("write");
        let prefs = UserPreferences::with_path(&path).expect("load");
        assert_eq!(prefs.snapshot(), PreferencesPayload::default());
    }

    #[test]
    fn ephemeral_store_never_touches_disk() {
        let prefs = UserPreferences::ephemeral();
        prefs.set_default_category(Category::Tickets).expect("in-memory update");
        assert_eq!(prefs.default_category(), Some(Category::Tickets));
        assert_eq!(prefs.path(), Path::new(""));
    }

    #[test]
    fn env_override_controls_default_path() {
        let dir = tempdir().expect("tempdir");
        let custom = dir.path().join("custom.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(custom.to_str().expect("utf8 path")), || {
            assert_eq!(default_preferences_path(), custom);
        });
    }
}
