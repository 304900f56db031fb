//! Configuration schema for outguard
//!
//! Configuration is stored at `~/.config/outguard/config.toml`, optionally
//! overlaid by a project-local `.outguard.toml`.

use crate::error::{OutguardError, OutguardResult};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Overlap detection settings
    pub detection: DetectionConfig,

    /// Report settings
    pub report: ReportConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Log formatter selected by `general.log_format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl GeneralConfig {
    /// Parse `log_format`, rejecting unknown values
    pub fn log_format(&self) -> OutguardResult<LogFormat> {
        match self.log_format.as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(OutguardError::User(format!(
                "Invalid general.log_format: {}. Use text or json",
                other
            ))),
        }
    }
}

/// Overlap detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Detect overlapping outputs (output filtering runs regardless)
    pub enabled: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default report format when --format is not given: "text" or "json"
    pub format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}
