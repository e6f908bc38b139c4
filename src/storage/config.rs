//! Configuration file loading.
//!
//! Loads configuration from:
//! - Linux: `~/.config/copilot-usage/config.toml`
//! - macOS: `~/Library/Application Support/copilot-usage/config.toml`
//!
//! The file is optional. Every key has a built-in default, and CLI flags and
//! environment variables take precedence over it (see [`crate::core::plans`]).
//!
//! ```toml
//! [general]
//! plan = "pro"
//! limit = 300
//!
//! [github]
//! binary = "gh"
//! timeout_seconds = 30
//!
//! [status_bar]
//! command = "i3status"
//! config_path = "/home/me/.config/i3status/config"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::core::github::GH_BINARY;
use crate::core::plans::Plan;
use crate::core::statusbar::DEFAULT_STATUS_PROGRAM;
use crate::error::{Result, UsageError};

/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "COPILOT_USAGE_CONFIG";

const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub github: GithubConfig,
    pub status_bar: StatusBarConfig,
}

/// Plan and limit defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Plan name (free, pro, pro+, business, enterprise).
    pub plan: Option<String>,
    /// Monthly request limit; overrides the plan's quota.
    pub limit: Option<i64>,
}

/// How to reach the GitHub CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// `gh` binary name or path.
    pub binary: String,
    /// Per-invocation timeout.
    pub timeout_seconds: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            binary: GH_BINARY.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl GithubConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// The status-line program relayed by `--i3bar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusBarConfig {
    /// Program name or path.
    pub command: String,
    /// Config file passed with `-c`.
    pub config_path: Option<PathBuf>,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_STATUS_PROGRAM.to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load the config file, respecting `COPILOT_USAGE_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is invalid.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG)
            .map_or_else(|| AppPaths::new().config_file(), PathBuf::from);
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::ConfigParse`] for unreadable TOML and
    /// [`UsageError::Config`] for invalid values.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| UsageError::ConfigParse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Validate values that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if let Some(plan) = &self.general.plan {
            if Plan::from_name(plan).is_none() {
                return Err(UsageError::UnknownPlan(plan.clone()));
            }
        }

        if let Some(limit) = self.general.limit {
            if limit <= 0 {
                return Err(UsageError::InvalidLimit(limit));
            }
            if u32::try_from(limit).is_err() {
                return Err(UsageError::LimitOutOfRange(limit));
            }
        }

        if self.github.binary.trim().is_empty() {
            return Err(UsageError::Config(
                "github.binary must not be empty".to_string(),
            ));
        }

        if self.github.timeout_seconds == 0 || self.github.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(UsageError::Config(format!(
                "Timeout must be between 1 and {MAX_TIMEOUT_SECONDS} seconds, got {}",
                self.github.timeout_seconds
            )));
        }

        if self.status_bar.command.trim().is_empty() {
            return Err(UsageError::Config(
                "status_bar.command must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
