//! Application paths.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Application paths.
pub struct AppPaths {
    /// Configuration directory.
    pub config: PathBuf,
}

impl AppPaths {
    /// Create paths for the copilot-usage application.
    #[must_use]
    pub fn new() -> Self {
        ProjectDirs::from("", "", "copilot-usage").map_or_else(
            || Self {
                config: home_dir().join(".config/copilot-usage"),
            },
            |proj_dirs| Self {
                config: proj_dirs.config_dir().to_path_buf(),
            },
        )
    }

    /// Path to the config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    /// Conventional i3status config location (`~/.config/i3status/config`).
    #[must_use]
    pub fn default_i3status_config() -> PathBuf {
        BaseDirs::new().map_or_else(
            || home_dir().join(".config/i3status/config"),
            |dirs| dirs.config_dir().join("i3status/config"),
        )
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn home_dir() -> PathBuf {
    BaseDirs::new().map_or_else(|| PathBuf::from("."), |d| d.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_is_toml_in_config_dir() {
        let paths = AppPaths::new();
        let file = paths.config_file();
        assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("config.toml"));
        assert!(file.starts_with(&paths.config));
    }

    #[test]
    fn i3status_config_location() {
        assert!(AppPaths::default_i3status_config().ends_with("i3status/config"));
    }
}
