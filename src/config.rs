use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

pub const DEFAULT_NUM_TEXTS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid argument {0} for \"-n, --num-texts\" flag: must be at least 1")]
    InvalidTextCount(usize),
    #[error("invalid num_texts {count} in config file {}: must be at least 1", .path.display())]
    InvalidStoredTextCount { count: usize, path: PathBuf },
}

/// Validated settings the game is built from. Fixed for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    text_count: NonZeroUsize,
    pub beep: bool,
}

impl GameConfig {
    pub fn new(text_count: usize, beep: bool) -> Result<Self, ConfigError> {
        let text_count =
            NonZeroUsize::new(text_count).ok_or(ConfigError::InvalidTextCount(text_count))?;
        Ok(Self { text_count, beep })
    }

    /// Like `try_from`, but blames the config file at `path` for a bad count.
    pub fn from_stored(cfg: &Config, path: &Path) -> Result<Self, ConfigError> {
        Self::try_from(cfg).map_err(|err| match err {
            ConfigError::InvalidTextCount(count) => ConfigError::InvalidStoredTextCount {
                count,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    pub fn text_count(&self) -> usize {
        self.text_count.get()
    }
}

/// Defaults persisted between runs. Command line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub num_texts: usize,
    pub beep: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_texts: DEFAULT_NUM_TEXTS,
            beep: true,
        }
    }
}

impl TryFrom<&Config> for GameConfig {
    type Error = ConfigError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        GameConfig::new(cfg.num_texts, cfg.beep)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring malformed config"
                ),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::from)?;
        fs::write(&self.path, data)
    }
}
