//! Coaching configuration.
//!
//! Loaded from YAML; every field has a default so a partial (or absent) file
//! is fine. Feed locations still honour the environment overrides.

use crate::catalog::{resolve_feed_path, resolve_team_feed_path};
use crate::error::{CoachingError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file the CLI reads when none is given.
pub const DEFAULT_CONFIG_REL_PATH: &str = "data/coaching.yaml";

fn default_slots() -> usize {
    2
}

fn default_top_specialties() -> usize {
    3
}

/// Hiring market settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Candidates shown per market refresh.
    pub slots: usize,
    /// Fixed seed for reproducible markets; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self { slots: default_slots(), seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub top_specialties: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { top_specialties: default_top_specialties() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingConfig {
    pub feed_path: Option<PathBuf>,
    pub team_feed_path: Option<PathBuf>,
    pub market: MarketConfig,
    pub profile: ProfileConfig,
}

impl CoachingConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No coaching config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            CoachingError::Config(message) => {
                CoachingError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.profile.top_specialties == 0 {
            return Err(CoachingError::Config("profile.top_specialties must be at least 1".into()));
        }
        Ok(())
    }

    /// Effective coach feed path after env overrides.
    pub fn feed_path(&self) -> PathBuf {
        resolve_feed_path(self.feed_path.as_deref())
    }

    /// Effective team feed path after env overrides.
    pub fn team_feed_path(&self) -> PathBuf {
        resolve_team_feed_path(self.team_feed_path.as_deref())
    }
}
