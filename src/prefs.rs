//! Theme preference for typecycle
//!
//! The only persisted user state: a single `theme` key holding `"dark"` or
//! `"light"` in `~/.typecycle/prefs.toml`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{app_dir, ConfigError};

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error(transparent)]
    Location(#[from] ConfigError),
}

/// Light or dark theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(PrefsError::UnknownTheme(other.to_string())),
        }
    }
}

/// On-disk shape of the preference file
#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: ThemeMode,
}

/// Theme preference storage
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at `~/.typecycle/prefs.toml`
    pub fn open_default() -> Result<Self, PrefsError> {
        Ok(Self::at(app_dir()?.join("prefs.toml")))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme; dark when nothing usable is stored
    pub fn load(&self) -> ThemeMode {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return ThemeMode::default();
        };
        match toml::from_str::<Preferences>(&content) {
            Ok(prefs) => prefs.theme,
            Err(e) => {
                debug!("Ignoring unreadable preferences {}: {}", self.path.display(), e);
                ThemeMode::default()
            }
        }
    }

    /// Persist a theme
    pub fn save(&self, theme: ThemeMode) -> Result<(), PrefsError> {
        let content = toml::to_string(&Preferences { theme })?;
        fs::write(&self.path, content).map_err(|source| PrefsError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Theme preference saved: {}", theme);
        Ok(())
    }
}
