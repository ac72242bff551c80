//! Simdguide configuration.
//!
//! Handles parsing and management of simdguide.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::taxonomy::CpuFeatureSet;

pub const CONFIG_FILE_NAME: &str = "simdguide.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching simdguide.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimdguideConfig {
    /// Data source locations
    #[serde(default)]
    pub data: DataConfig,

    /// Enabled instruction-set extensions
    #[serde(default)]
    pub features: FeaturesConfig,
}

impl SimdguideConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: SimdguideConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                // Reached root without finding config
                return Ok(Self::default());
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The configured feature tags as a flag set. An empty list means every
    /// known feature; unrecognized tags fold into the UNKNOWN flag.
    pub fn enabled_features(&self) -> CpuFeatureSet {
        if self.features.enabled.is_empty() {
            return CpuFeatureSet::all() - CpuFeatureSet::UNKNOWN;
        }
        self.features
            .enabled
            .iter()
            .fold(CpuFeatureSet::empty(), |acc, tag| {
                acc | CpuFeatureSet::parse_tag(tag)
            })
    }
}

/// Data source locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Path to the intrinsics guide document
    #[serde(default)]
    pub guide: Option<PathBuf>,

    /// Path to the XML cache written by `convert`
    #[serde(default)]
    pub cache: Option<PathBuf>,
}

/// Enabled instruction-set extensions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeaturesConfig {
    /// Feature tags to enable ("SSE2", "AVX2", ...). Empty means all.
    #[serde(default)]
    pub enabled: Vec<String>,
}
