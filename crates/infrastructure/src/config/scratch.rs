//! Scratch directory configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where transient audio lives and how long synthesized files are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScratchConfig {
    /// Directory for uploads and synthesized audio (created on demand)
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Age in seconds after which synthesized files are deleted (0 = keep forever)
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,

    /// How often the sweeper runs, in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_directory() -> PathBuf {
    PathBuf::from("temp")
}

const fn default_retention_secs() -> u64 {
    3600
}

const fn default_sweep_interval_secs() -> u64 {
    300
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retention_secs: default_retention_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl ScratchConfig {
    /// Retention period, `None` when eviction is disabled
    #[must_use]
    pub const fn retention(&self) -> Option<Duration> {
        if self.retention_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.retention_secs))
        }
    }

    /// Sweep interval
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("scratch.directory must not be empty".to_string());
        }
        if self.retention_secs > 0 && self.sweep_interval_secs == 0 {
            return Err("scratch.sweep_interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
