//! Configuration and color scheme management for typecycle.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.typecycle/config.toml`
//! - Dark and light color schemes for the hero banner
//!
//! # Configuration File
//!
//! Every key is optional:
//!
//! ```toml
//! name = "Your Name"
//! tagline = "Building things for the web"
//! phrases = ["Web Developer", "AI Student"]
//!
//! [typing]
//! typing_speed_ms = 100    # per typed character
//! typing_delay_ms = 2000   # hold once a phrase is complete
//! erase_speed_ms = 50      # per erased character
//! advance_pause_ms = 500   # pause before the next phrase
//!
//! [counter]
//! duration_ms = 2000
//! frame_ms = 16
//!
//! [[stats]]
//! label = "Projects"
//! count = 15
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::prefs::ThemeMode;
use crate::typing::{PhraseList, TypingConfig, TypingError, MIN_TICK};

/// Directory under the home directory holding all typecycle files
const APP_DIR: &str = ".typecycle";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown above the typed line
    pub name: String,
    /// Line shown below the typed line
    pub tagline: String,
    /// Phrases cycled by the typing animation
    pub phrases: Vec<String>,
    /// Typing animation timings
    pub typing: TypingSettings,
    /// Stat counter timings
    pub counter: CounterSettings,
    /// Stats shown under the hero
    pub stats: Vec<Stat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            tagline: "Building things for the web".to_string(),
            phrases: vec![
                "Web Developer".to_string(),
                "AI Student".to_string(),
                "Experience Creator".to_string(),
                "Passionate About Code".to_string(),
            ],
            typing: TypingSettings::default(),
            counter: CounterSettings::default(),
            stats: vec![
                Stat::new("Projects", 15),
                Stat::new("Technologies", 10),
                Stat::new("Commits", 500),
            ],
        }
    }
}

/// Typing animation timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingSettings {
    pub typing_speed_ms: u64,
    pub typing_delay_ms: u64,
    pub erase_speed_ms: u64,
    pub advance_pause_ms: u64,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            typing_speed_ms: 100,
            typing_delay_ms: 2000,
            erase_speed_ms: 50,
            advance_pause_ms: 500,
        }
    }
}

/// Counter animation timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSettings {
    pub duration_ms: u64,
    pub frame_ms: u64,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            frame_ms: 16,
        }
    }
}

impl CounterSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Frame interval, never zero
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

/// A labelled number counted up on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub count: u64,
}

impl Stat {
    pub fn new(label: &str, count: u64) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults on any error
    pub fn load() -> Self {
        let path = match config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}; using default configuration", e);
                return Self::default();
            }
        };
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Timings for the typing engine, each at least [`MIN_TICK`]
    pub fn typing_config(&self) -> TypingConfig {
        let ms = |value: u64| Duration::from_millis(value).max(MIN_TICK);
        TypingConfig {
            typing_speed: ms(self.typing.typing_speed_ms),
            typing_delay: ms(self.typing.typing_delay_ms),
            erase_speed: ms(self.typing.erase_speed_ms),
            advance_pause: ms(self.typing.advance_pause_ms),
        }
    }

    /// Phrases for the typing engine
    pub fn phrase_list(&self) -> Result<PhraseList, TypingError> {
        PhraseList::new(self.phrases.iter().cloned())
    }
}

/// `~/.typecycle`, created on demand
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let dir = home_dir().ok_or(ConfigError::NoHomeDir)?.join(APP_DIR);
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Ok(dir)
}

/// Default config file path
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("config.toml"))
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme for the hero banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub mode: ThemeMode,

    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Typed line and caret
    pub accent: Color,
    pub caret: Color,

    // Stats row
    pub stat_value: Color,
    pub stat_label: Color,
}

impl ColorScheme {
    /// Dark scheme (default)
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,

            background: Color::new(10, 25, 47),
            foreground: Color::new(204, 214, 246),
            muted: Color::new(136, 146, 176),

            accent: Color::new(230, 57, 70),
            caret: Color::new(42, 157, 143),

            stat_value: Color::new(42, 157, 143),
            stat_label: Color::new(136, 146, 176),
        }
    }

    /// Light scheme
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,

            background: Color::new(248, 249, 250),
            foreground: Color::new(33, 37, 41),
            muted: Color::new(108, 117, 125),

            accent: Color::new(193, 18, 31),
            caret: Color::new(29, 110, 100),

            stat_value: Color::new(29, 110, 100),
            stat_label: Color::new(108, 117, 125),
        }
    }

    /// Scheme for a theme mode
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_typing_config() {
        let config = Config::default();
        assert_eq!(config.typing_config(), TypingConfig::default());
        assert_eq!(config.phrase_list().unwrap().len(), 4);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            phrases = ["Hi", "Go"]

            [typing]
            erase_speed_ms = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.phrases, vec!["Hi", "Go"]);
        assert_eq!(config.typing.erase_speed_ms, 25);
        assert_eq!(config.typing.typing_speed_ms, 100);
        assert_eq!(config.counter, CounterSettings::default());
        assert_eq!(config.name, "Your Name");

        let typing = config.typing_config();
        assert_eq!(typing.erase_speed, Duration::from_millis(25));
        assert_eq!(typing.advance_pause, Duration::from_millis(500));
    }

    #[test]
    fn test_stats_table_array() {
        let config: Config = toml::from_str(
            r#"
            [[stats]]
            label = "Clients"
            count = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.stats, vec![Stat::new("Clients", 7)]);
    }

    #[test]
    fn test_empty_phrases_rejected() {
        let config: Config = toml::from_str("phrases = []").unwrap();
        assert!(matches!(
            config.phrase_list(),
            Err(TypingError::EmptyPhraseList)
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.name = "Grace".to_string();
        config.typing.typing_delay_ms = 1234;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_from(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "phrases = [unterminated").unwrap();
        assert!(matches!(
            Config::load_from(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_frame_never_zero() {
        let settings = CounterSettings {
            duration_ms: 100,
            frame_ms: 0,
        };
        assert_eq!(settings.frame(), Duration::from_millis(1));
    }

    #[test]
    fn test_zero_timings_clamped() {
        let config: Config = toml::from_str(
            r#"
            [typing]
            typing_speed_ms = 0
            typing_delay_ms = 0
            erase_speed_ms = 0
            advance_pause_ms = 0
            "#,
        )
        .unwrap();

        let typing = config.typing_config();
        assert_eq!(typing.typing_speed, MIN_TICK);
        assert_eq!(typing.typing_delay, MIN_TICK);
        assert_eq!(typing.erase_speed, MIN_TICK);
        assert_eq!(typing.advance_pause, MIN_TICK);
    }

    #[test]
    fn test_scheme_for_mode() {
        assert_eq!(ColorScheme::for_mode(ThemeMode::Dark).mode, ThemeMode::Dark);
        assert_eq!(ColorScheme::for_mode(ThemeMode::Light), ColorScheme::light());
    }
}
