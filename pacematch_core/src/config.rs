//! Configuration file support for pacematch.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pacematch/config.toml`.
//! Every value defaults to the engine's built-in constants, so an absent or
//! partial file leaves matching behaviour unchanged.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

/// Lap-to-step tolerance bands
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    #[serde(default = "default_warmup_cooldown_tolerance")]
    pub warmup_cooldown_tolerance_percent: f64,

    #[serde(default = "default_tolerance")]
    pub default_tolerance_percent: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            warmup_cooldown_tolerance_percent: default_warmup_cooldown_tolerance(),
            default_tolerance_percent: default_tolerance(),
        }
    }
}

/// Planned metrics estimation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    #[serde(default = "default_pace_seconds_per_km")]
    pub default_pace_seconds_per_km: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            default_pace_seconds_per_km: default_pace_seconds_per_km(),
        }
    }
}

/// Match quality weighting
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Weight of the primary objective; the secondary gets the remainder
    #[serde(default = "default_objective_weight")]
    pub objective_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            objective_weight: default_objective_weight(),
        }
    }
}

/// Candidate activity search
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ResolverConfig {
    /// Days either side of the scheduled date to consider (0 = same day)
    #[serde(default)]
    pub window_days: u32,
}

// Default value functions
fn default_log_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("pacematch").join("reports.jsonl")
}

fn default_warmup_cooldown_tolerance() -> f64 {
    20.0
}

fn default_tolerance() -> f64 {
    10.0
}

fn default_pace_seconds_per_km() -> u32 {
    crate::pace::DEFAULT_PACE_SECONDS
}

fn default_objective_weight() -> f64 {
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
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("pacematch").join("config.toml")
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(m.warmup_cooldown_tolerance_percent)
            || !positive(m.default_tolerance_percent)
        {
            return Err(Error::Config(
                "tolerance percentages must be finite and greater than zero".into(),
            ));
        }
        // NaN fails the range check
        if !(0.0..=1.0).contains(&self.scoring.objective_weight) {
            return Err(Error::Config(format!(
                "objective_weight {} is outside 0..=1",
                self.scoring.objective_weight
            )));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
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
