use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gps_processor::DEFAULT_ACCURACY_THRESHOLD;
use crate::progress::PercentPolicy;

/// Knobs for a tracking session. Every field is optional in the JSON form and
/// falls back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// How often the host should request location updates.
    pub update_interval_ms: u64,
    /// Lower bound on the update interval when fixes arrive faster.
    pub fastest_interval_ms: u64,
    pub accuracy_threshold_m: f32,
    /// The overlay bar never shows less than this, so it stays visible.
    pub min_visible_progress: u8,
    pub percent_policy: PercentPolicy,
    pub stop_on_arrival: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            update_interval_ms: 3000,
            fastest_interval_ms: 1000,
            accuracy_threshold_m: DEFAULT_ACCURACY_THRESHOLD,
            min_visible_progress: 3,
            percent_policy: PercentPolicy::default(),
            stop_on_arrival: false,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.fastest_interval_ms > self.update_interval_ms {
            bail!(
                "fastest_interval_ms ({}) must not exceed update_interval_ms ({})",
                self.fastest_interval_ms,
                self.update_interval_ms
            );
        }
        if self.min_visible_progress > 100 {
            bail!(
                "min_visible_progress must be a percentage, got {}",
                self.min_visible_progress
            );
        }
        if !(self.accuracy_threshold_m > 0.0) {
            bail!(
                "accuracy_threshold_m must be positive, got {}",
                self.accuracy_threshold_m
            );
        }
        Ok(())
    }
}
