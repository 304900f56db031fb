//! Configuration management for outguard

pub mod schema;

pub use schema::{Config, LogFormat};

use crate::error::{OutguardError, OutguardResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of project-local configuration
pub const LOCAL_CONFIG_NAME: &str = ".outguard.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("outguard")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub fn load(&self) -> OutguardResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> OutguardResult<Config> {
        config_from_value(read_toml(path)?, path)
    }

    /// Load the global configuration with a project-local file layered on top.
    ///
    /// Keys set in the local file win; everything else comes from the global
    /// file or the defaults.
    pub fn load_merged(&self, local_path: Option<&Path>) -> OutguardResult<Config> {
        let Some(local_path) = local_path else {
            return self.load();
        };

        // Each file is checked on its own so errors name the file at fault
        let mut merged = if self.config_path.exists() {
            let global = read_toml(&self.config_path)?;
            config_from_value(global.clone(), &self.config_path)?;
            global
        } else {
            toml::Value::Table(toml::map::Map::new())
        };
        let local = read_toml(local_path)?;
        config_from_value(local.clone(), local_path)?;
        merge_toml(&mut merged, local);

        debug!("Merged local config from {}", local_path.display());
        merged
            .try_into()
            .map_err(|e: toml::de::Error| OutguardError::ConfigInvalid {
                path: local_path.to_path_buf(),
                reason: format!(
                    "merged over {}: {}",
                    self.config_path.display(),
                    e
                ),
            })
    }

    /// Find a project-local config by walking up from `start`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> OutguardResult<()> {
        self.ensure_config_dir()?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).map_err(|e| {
            OutguardError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    fn ensure_config_dir(&self) -> OutguardResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| OutguardError::ConfigDirCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn read_toml(path: &Path) -> OutguardResult<toml::Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| OutguardError::io(format!("reading config from {}", path.display()), e))?;

    content
        .parse()
        .map_err(|e: toml::de::Error| OutguardError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn config_from_value(value: toml::Value, path: &Path) -> OutguardResult<Config> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| OutguardError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Deep-merge `overlay` into `base`; tables merge key by key, anything else replaces.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
