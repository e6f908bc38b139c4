//! `--i3bar`: relay the status-line program with a usage element prepended.

use std::path::Path;

use crate::core::github::GhClient;
use crate::core::statusbar::multiplexer::{self, StatusBarMultiplexer, StatusCommand};
use crate::error::Result;
use crate::storage::AppPaths;
use crate::storage::config::StatusBarConfig;

/// Pick the program and config file to relay.
///
/// Flags win over the config file. Without an explicit config path,
/// `~/.config/i3status/config` is passed only when it exists.
#[must_use]
pub fn status_command(
    program: Option<&str>,
    config_path: Option<&Path>,
    config: &StatusBarConfig,
) -> StatusCommand {
    let program = program.unwrap_or(&config.command);
    let config_path = config_path
        .map(Path::to_path_buf)
        .or_else(|| config.config_path.clone())
        .or_else(|| {
            let conventional = AppPaths::default_i3status_config();
            conventional.exists().then_some(conventional)
        });
    StatusCommand::new(program, config_path)
}

/// Stream frames to stdout until the status-line program exits.
///
/// # Errors
///
/// Returns an error if the program cannot be launched, the first usage fetch
/// fails, or stdout is closed.
pub async fn execute(command: &StatusCommand, client: GhClient, limit: u32) -> Result<()> {
    let mut multiplexer = StatusBarMultiplexer::new(client, limit);
    let mut out = std::io::stdout().lock();
    multiplexer::run(command, &mut multiplexer, &mut out).await
}
