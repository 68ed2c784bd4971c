//! Configuration file support for the rehab tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/rehab/config.toml`.

use crate::program::PROGRAM_LENGTH_DAYS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub program: ProgramConfig,

    #[serde(default)]
    pub alerts: AlertConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub nutrition: NutritionConfig,
}

/// Data storage configuration
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
    /// The single persisted progress record
    pub fn progress_path(data_dir: &Path) -> PathBuf {
        data_dir.join("progress.json")
    }

    /// Append-only meal journal
    pub fn meals_path(data_dir: &Path) -> PathBuf {
        data_dir.join("meals.jsonl")
    }
}

/// Programme parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Nominal length used for the completion percentage
    #[serde(default = "default_length_days")]
    pub length_days: u32,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            length_days: default_length_days(),
        }
    }
}

/// Pain thresholds for advisory warnings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Warn after a session when either score is above this
    #[serde(default = "default_pain_warning_threshold")]
    pub pain_warning_threshold: u8,

    /// Latest entry above this puts the dashboard into "Monitor"
    #[serde(default = "default_status_monitor_threshold")]
    pub status_monitor_threshold: u8,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            pain_warning_threshold: default_pain_warning_threshold(),
            status_monitor_threshold: default_status_monitor_threshold(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_trend_days")]
    pub trend_days: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            trend_days: default_trend_days(),
        }
    }
}

/// Daily intake targets shown next to the meal totals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default = "default_calorie_target")]
    pub calorie_target: u32,

    #[serde(default = "default_protein_target")]
    pub protein_target: u32,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            calorie_target: default_calorie_target(),
            protein_target: default_protein_target(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("rehab")
}

fn default_length_days() -> u32 {
    PROGRAM_LENGTH_DAYS
}

fn default_pain_warning_threshold() -> u8 {
    5
}

fn default_status_monitor_threshold() -> u8 {
    4
}

fn default_trend_days() -> usize {
    14
}

fn default_calorie_target() -> u32 {
    2400
}

fn default_protein_target() -> u32 {
    180
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
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
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("rehab").join("config.toml")
    }

    /// Reject values the rest of the system cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.program.length_days == 0 {
            return Err(Error::Config("program.length_days must be at least 1".into()));
        }
        if self.alerts.pain_warning_threshold > crate::MAX_PAIN
            || self.alerts.status_monitor_threshold > crate::MAX_PAIN
        {
            return Err(Error::Config(format!(
                "alert thresholds must be between 0 and {}",
                crate::MAX_PAIN
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.program.length_days, 42);
        assert_eq!(config.alerts.pain_warning_threshold, 5);
        assert_eq!(config.alerts.status_monitor_threshold, 4);
        assert_eq!(config.history.trend_days, 14);
        assert_eq!(config.nutrition.calorie_target, 2400);
        assert_eq!(config.nutrition.protein_target, 180);
        assert!(config.data.data_dir.ends_with("rehab"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[alerts]
pain_warning_threshold = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.alerts.pain_warning_threshold, 3);
        assert_eq!(config.alerts.status_monitor_threshold, 4); // default
        assert_eq!(config.program.length_days, 42); // default
    }

    #[test]
    fn test_nutrition_targets_override() {
        let config: Config = toml::from_str("[nutrition]\ncalorie_target = 2000\n").unwrap();
        assert_eq!(config.nutrition.calorie_target, 2000);
        assert_eq!(config.nutrition.protein_target, 180);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.history.trend_days = 7;
        config.data.data_dir = temp_dir.path().join("data");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.history.trend_days, 7);
        assert_eq!(loaded.data.data_dir, temp_dir.path().join("data"));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[alerts]\npain_warning_threshold = 11\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_data_paths() {
        let dir = Path::new("/tmp/rehab");
        assert_eq!(DataConfig::progress_path(dir), dir.join("progress.json"));
        assert_eq!(DataConfig::meals_path(dir), dir.join("meals.jsonl"));
    }
}
