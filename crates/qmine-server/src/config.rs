//! Server configuration loaded from qmine.toml.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use qmine_miner::MinerLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub logging: LoggingSection,
    pub mining: MiningSection,
    pub prefs: PrefsSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Engine limits, overridable per deployment.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MiningSection {
    /// Per-tick time budget in milliseconds.
    pub time_budget_ms: u64,
    pub max_horizontal: u32,
    pub max_vertical: u32,
    pub max_blocks: usize,
    pub tool_protection_margin: u32,
}

impl Default for MiningSection {
    fn default() -> Self {
        let limits = MinerLimits::default();
        Self {
            time_budget_ms: limits.time_budget.as_millis() as u64,
            max_horizontal: limits.max_horizontal,
            max_vertical: limits.max_vertical,
            max_blocks: limits.max_blocks,
            tool_protection_margin: limits.tool_protection_margin,
        }
    }
}

impl MiningSection {
    pub fn to_limits(&self) -> MinerLimits {
        MinerLimits {
            time_budget: Duration::from_millis(self.time_budget_ms),
            max_horizontal: self.max_horizontal,
            max_vertical: self.max_vertical,
            max_blocks: self.max_blocks,
            tool_protection_margin: self.tool_protection_margin,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PrefsSection {
    /// Where per-player preference records are stored.
    pub path: String,
}

impl Default for PrefsSection {
    fn default() -> Self {
        Self {
            path: "player_prefs.json".into(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
