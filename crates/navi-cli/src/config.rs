//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use navi_core::{AvailabilityPolicy, Flow, ValidationError};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Which screen's lock/horizon preset applies.
    #[serde(default)]
    pub flow: Flow,

    /// Overrides the preset's lock threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_days: Option<u32>,

    /// Overrides the preset's selection horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_days: Option<u32>,

    /// How many entries the upcoming schedule shows.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

const fn default_upcoming_limit() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flow: Flow::default(),
            lock_days: None,
            horizon_days: None,
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (NAVI_*)
        figment = figment.merge(Env::prefixed("NAVI_"));

        figment.extract()
    }

    /// The flow preset with any configured overrides applied.
    pub fn policy(&self) -> Result<AvailabilityPolicy, ValidationError> {
        let preset = AvailabilityPolicy::for_flow(self.flow);
        AvailabilityPolicy::new(
            self.lock_days.unwrap_or_else(|| preset.lock_days()),
            self.horizon_days.unwrap_or_else(|| preset.horizon_days()),
        )
    }
}

/// Returns the platform-specific config directory for navi.
///
/// On Linux: `~/.config/navi`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("navi"))
}
