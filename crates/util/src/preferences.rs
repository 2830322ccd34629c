//! User preference persistence for the King of the Pundits client.
//!
//! A small JSON-backed store recording lightweight choices such as the
//! preferred theme. The file lives in the standard configuration directory
//! (`~/.config/kotp/preferences.json` on most platforms); an internal `Mutex`
//! keeps reads and writes safe across threads.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable overriding the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "KOTP_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (permissions, missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the selected theme.
    pub preferred_theme: Option<String>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Open the store at its default location, creating state from an empty
    /// payload when no file exists yet.
    pub fn new() -> Result<Self, PreferencesError> {
        let resolved_path = default_preferences_path();
        let payload = load_payload(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Open the store, falling back to an in-memory one when the config
    /// directory is unusable. The fallback logs a warning and is not
    /// persisted.
    pub fn load_or_ephemeral() -> Self {
        match Self::new() {
            Ok(store) => store,
            Err(error) => {
                warn!(%error, "Preferences unavailable; continuing without persistence");
                Self::ephemeral()
            }
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<String> {
        self.payload
            .lock()
            .expect("preferences lock poisoned")
            .preferred_theme
            .clone()
    }

    /// Persist a new preferred theme identifier. `None` clears the choice.
    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        let mut payload = self.payload.lock().expect("preferences lock poisoned");
        payload.preferred_theme = theme_id;
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    /// In-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
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
        .join("kotp")
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

    #[test]
    fn theme_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("prefs.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().expect("utf-8 path")), || {
            let store = UserPreferences::new().expect("open store");
            store
                .set_preferred_theme(Some("ansi".to_string()))
                .expect("persist theme");

            let reopened = UserPreferences::new().expect("reopen store");
            assert_eq!(reopened.preferred_theme(), Some("ansi".to_string()));
        });
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").expect("write corrupt payload");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_str().expect("utf-8 path")), || {
            let store = UserPreferences::new().expect("open store despite corrupt file");
            assert_eq!(store.preferred_theme(), None);
        });
    }

    #[test]
    fn ephemeral_store_accepts_writes_without_a_path() {
        let store = UserPreferences::ephemeral();
        store
            .set_preferred_theme(Some("pitch".to_string()))
            .expect("in-memory write");
        assert_eq!(store.preferred_theme(), Some("pitch".to_string()));
        assert_eq!(store.path(), Path::new(""));
    }
}
