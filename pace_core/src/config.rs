//! Configuration file support for Pace.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pace/config.toml`.

use crate::dates::WeekStart;
use crate::{Distribution, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub weekly: WeeklyConfig,
}

/// Snapshot locations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    /// Weekly goal table snapshot
    pub fn goals_path(&self) -> PathBuf {
        self.data_dir.join("goals.json")
    }

    /// Logged minutes snapshot
    pub fn worklog_path(&self) -> PathBuf {
        self.data_dir.join("worklog.csv")
    }
}

/// Defaults for allocation requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub distribution: Distribution,

    #[serde(default = "default_intensity")]
    pub intensity: f64,

    /// Sunday-first weekday indices
    #[serde(default)]
    pub excluded_weekdays: Vec<u8>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            distribution: Distribution::default(),
            intensity: default_intensity(),
            excluded_weekdays: Vec::new(),
        }
    }
}

/// Weekly progress settings
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct WeeklyConfig {
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("pace")
}

fn default_intensity() -> f64 {
    0.7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("pace").join("config.toml")
    }

    /// Reject values the planner cannot use
    pub fn validate(&self) -> Result<()> {
        let intensity = self.planner.intensity;
        if !(0.0..=1.0).contains(&intensity) {
            return Err(Error::Config(format!(
                "planner.intensity must be between 0 and 1, got {}",
                intensity
            )));
        }

        if let Some(day) = self.planner.excluded_weekdays.iter().find(|&&d| d > 6) {
            return Err(Error::Config(format!(
                "planner.excluded_weekdays must be 0-6 (0 = Sunday), got {}",
                day
            )));
        }

        Ok(())
    }
}
