//! Durable single-value preference: the last searched city.
//!
//! Read once at startup, overwritten whenever the city changes. Modeled as
//! a tiny key-value collaborator so the app loop and tests can swap in an
//! in-memory store.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, path::PathBuf};

/// Get/set access to the persisted last-city value.
pub trait PreferenceStore: Send + Sync + Debug {
    fn last_city(&self) -> Option<String>;
    fn remember_city(&self, city: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredPrefs {
    last_city: Option<String>,
}

/// TOML-file-backed store in the platform config directory.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(Self::at(dirs.config_dir().join("prefs.toml")))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> StoredPrefs {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            // First run: nothing stored yet.
            return StoredPrefs::default();
        };

        match toml::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "Ignoring unreadable prefs file");
                StoredPrefs::default()
            }
        }
    }

    fn write(&self, prefs: &StoredPrefs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create prefs directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(prefs).context("Failed to serialize prefs to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write prefs file: {}", self.path.display()))?;

        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn last_city(&self) -> Option<String> {
        self.read().last_city.filter(|city| !city.is_empty())
    }

    fn remember_city(&self, city: &str) -> Result<()> {
        self.write(&StoredPrefs {
            last_city: Some(city.to_owned()),
        })
    }
}
