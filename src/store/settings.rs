//! User-adjustable study settings, persisted next to the progress file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySettings {
    /// Words per study session
    pub session_size: usize,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            session_size: config::DEFAULT_SESSION_SIZE,
        }
    }
}

impl StudySettings {
    /// Clamp every field into its allowed range.
    pub fn clamped(mut self) -> Self {
        self.session_size = self.session_size.clamp(1, config::MAX_SESSION_SIZE);
        self
    }
}

pub struct SettingsStore {
    path: PathBuf,
    settings: StudySettings,
}

impl SettingsStore {
    /// Open the store at `path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StudySettings>(&raw) {
                Ok(settings) => settings.clamped(),
                Err(e) => {
                    tracing::warn!(
                        "Malformed settings file {}: {} - using defaults",
                        path.display(),
                        e
                    );
                    StudySettings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => StudySettings::default(),
            Err(e) => {
                tracing::warn!(
                    "Could not read settings file {}: {} - using defaults",
                    path.display(),
                    e
                );
                StudySettings::default()
            }
        };
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> StudySettings {
        self.settings
    }

    pub fn set(&mut self, settings: StudySettings) -> io::Result<StudySettings> {
        self.settings = settings.clamped();
        self.persist()?;
        Ok(self.settings)
    }

    /// Restore defaults (part of the bulk learning-data reset).
    pub fn reset(&mut self) -> io::Result<StudySettings> {
        self.set(StudySettings::default())
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::open(temp.path().join("settings.json"));
        assert_eq!(store.get().session_size, config::DEFAULT_SESSION_SIZE);
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        {
            let mut store = SettingsStore::open(&path);
            store.set(StudySettings { session_size: 15 }).unwrap();
        }

        let store = SettingsStore::open(&path);
        assert_eq!(store.get().session_size, 15);
    }

    #[test]
    fn test_set_clamps_out_of_range() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().join("settings.json"));

        let saved = store.set(StudySettings { session_size: 0 }).unwrap();
        assert_eq!(saved.session_size, 1);

        let saved = store.set(StudySettings { session_size: 9999 }).unwrap();
        assert_eq!(saved.session_size, config::MAX_SESSION_SIZE);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let temp = TempDir::new().unwrap();
        let mut store = SettingsStore::open(temp.path().join("settings.json"));

        store.set(StudySettings { session_size: 30 }).unwrap();
        let restored = store.reset().unwrap();
        assert_eq!(restored.session_size, config::DEFAULT_SESSION_SIZE);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "session_size: five").unwrap();

        let store = SettingsStore::open(&path);
        assert_eq!(store.get().session_size, config::DEFAULT_SESSION_SIZE);
    }
}
