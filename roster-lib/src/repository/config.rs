use std::{fs, io, path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{fs::config_dir, locale::Locale, ranker::SOON_THRESHOLD_DAYS};

const FILE_NAME: &str = "roster.toml";

/// Storage key the member list has always been saved under.
pub const DEFAULT_STORAGE_KEY: &str = "rotaractMembers";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access the configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize the configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Key the member list is stored under
    pub storage_key: String,
    /// Language for month names
    pub locale: Locale,
    /// Birthdays at most this many days away are highlighted as coming up soon
    pub soon_threshold_days: u32,
    /// Directory holding the stored member list. Defaults to the XDG data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            locale: Locale::default(),
            soon_threshold_days: SOON_THRESHOLD_DAYS,
            data_dir: None,
        }
    }
}

impl CoreConfig {
    /// Load the configuration file, writing out the defaults if there isn't one yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_dir()?.join(FILE_NAME))
    }

    pub(crate) fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable config {}: {err}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    /// Directory for the stored member list
    pub fn data_dir(&self) -> io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::fs::data_dir(),
        }
    }

    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self::default()
    }
}
