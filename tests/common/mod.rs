//! Common helpers for integration tests.
//!
//! - `logger`: structured test logging
//! - [`Sandbox`]: runs the binary with fake `gh` / status-line programs first
//!   on `PATH` and an isolated home and config directory.
#![allow(dead_code)]

pub mod logger;

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use copilot_usage::test_utils::TestDir;

pub const BIN: &str = "copilot-usage";

/// Isolated environment for one binary invocation.
pub struct Sandbox {
    pub dir: TestDir,
    bin: PathBuf,
}

impl Sandbox {
    #[must_use]
    pub fn new() -> Self {
        let dir = TestDir::new();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        Self { dir, bin }
    }

    /// Install an executable script as `name` on the sandbox `PATH`.
    pub fn install(&self, name: &str, script: &str) -> PathBuf {
        self.dir.create_script(&format!("bin/{name}"), script)
    }

    /// Write the config file the binary will read.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.dir.create_file("copilot-usage.toml", content)
    }

    /// The binary with a scrubbed environment.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let path = match std::env::var_os("PATH") {
            Some(system) => {
                let mut entries = vec![self.bin.clone()];
                entries.extend(std::env::split_paths(&system));
                std::env::join_paths(entries).expect("join PATH")
            }
            None => self.bin.clone().into_os_string(),
        };

        let mut cmd = Command::cargo_bin(BIN).expect("binary built");
        cmd.env("PATH", path)
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("COPILOT_USAGE_CONFIG", self.dir.file_path("copilot-usage.toml"))
            .env("NO_COLOR", "1")
            .env_remove("GH_COPILOT_PLAN")
            .env_remove("GH_COPILOT_LIMIT")
            .env_remove("COPILOT_USAGE_LOG")
            .env_remove("COPILOT_USAGE_LOG_FILE")
            .env_remove("COPILOT_USAGE_LOG_FORMAT");
        cmd
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}
