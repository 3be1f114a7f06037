use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Status messages shown while a menu is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPhases {
    #[default]
    Full,
    Minimal,
}

/// Pacing of the status messages, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// `false` runs every phase back to back.
    pub enabled: bool,
    pub unchanged_fade_ms: u64,
    pub updating_delay_ms: u64,
    pub render_delay_ms: u64,
    pub updated_fade_ms: u64,
    pub clear_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unchanged_fade_ms: 800,
            updating_delay_ms: 800,
            render_delay_ms: 600,
            updated_fade_ms: 1500,
            clear_delay_ms: 300,
        }
    }
}

impl TimingConfig {
    pub fn unchanged_fade(&self) -> Duration {
        Duration::from_millis(self.unchanged_fade_ms)
    }

    pub fn updating_delay(&self) -> Duration {
        Duration::from_millis(self.updating_delay_ms)
    }

    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms)
    }

    pub fn updated_fade(&self) -> Duration {
        Duration::from_millis(self.updated_fade_ms)
    }

    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Exported menu spreadsheet.
    pub source_path: PathBuf,
    /// Where the page is kept between runs.
    pub page_path: PathBuf,
    /// Directory receiving one markup file per language.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub takeaway_items: Vec<String>,
    #[serde(default)]
    pub status_phases: StatusPhases,
    #[serde(default = "default_true")]
    pub compare_image_urls: bool,
    #[serde(default)]
    pub timing: TimingConfig,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.source_path = Self::expand_path(&config.source_path).unwrap_or(config.source_path);
        config.page_path = Self::expand_path(&config.page_path).unwrap_or(config.page_path);
        config.output_dir = Self::expand_path(&config.output_dir).unwrap_or(config.output_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/menu-sync");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
