use std::{fs, io, path::Path};

use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown log level `{0}`")]
    Level(String),
}

/// Everything the game reads at startup. Every field falls back to its default when absent.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub simulation: SimulationSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            title: "ember".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Length of one fixed update in nanoseconds.
    pub fixed_time_step_ns: u64,
    /// Stop after this many fixed updates. Zero runs forever.
    pub max_fixed_updates: u64,
    /// How many entities the scene spawns.
    pub entities: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fixed_time_step_ns: ember_engine::core::time::SIXTY_FPS,
            max_fixed_updates: 120,
            entities: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    /// Number of records the console keeps around.
    pub history: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            history: 256,
        }
    }
}

impl LogSettings {
    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        self.level
            .parse()
            .map_err(|_| SettingsError::Level(self.level.clone()))
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.log.level_filter()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if one was given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
