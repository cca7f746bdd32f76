// --- File: config.rs ---
//! Run settings. Physics stays in `constants.rs`; only how a training run is driven
//! can be changed here.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Androids per generation
    pub population: usize,
    /// Generations to run before stopping
    pub generations: u32,
    /// Seed for the obstacle course and the population provider; entropy when unset
    pub seed: Option<u64>,
    /// Pace ticks at 30 per second instead of running flat out
    pub realtime: bool,
    /// Cut a generation short after this many ticks
    pub max_ticks: Option<u64>,
    /// Log a snapshot every N ticks (0 = never)
    pub snapshot_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population: 50,
            generations: 50,
            seed: None,
            realtime: true,
            max_ticks: Some(20_000),
            snapshot_interval: 0,
        }
    }
}

impl RunConfig {
    /// Load and validate a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(SimError::InvalidConfig("population must be > 0".to_string()));
        }
        if self.generations == 0 {
            return Err(SimError::InvalidConfig("generations must be > 0".to_string()));
        }
        if self.max_ticks == Some(0) {
            return Err(SimError::InvalidConfig(
                "max_ticks must be > 0 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = RunConfig {
            population: 0,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_tick_cap() {
        let config = RunConfig {
            max_ticks: Some(0),
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: RunConfig = serde_yaml::from_str("population: 8\nseed: 42\n").unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generations, RunConfig::default().generations);
        assert!(config.realtime);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("mallowflight_test_config.yaml");
        let config = RunConfig {
            generations: 3,
            realtime: false,
            ..RunConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = RunConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RunConfig::from_file("/nonexistent/mallowflight.yaml");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
