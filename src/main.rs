//! copilot-usage - GitHub Copilot premium request usage
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::Parser;

use copilot_usage::cli::Cli;
use copilot_usage::core::logging::{self, LogSettings};
use copilot_usage::render::error::{ErrorStyle, render_error};
use copilot_usage::util::env::should_use_color_stderr;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(&LogSettings::resolve(cli.log_level, cli.verbose));

    match copilot_usage::cli::execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), error = %e, "Exiting with error");
            let style = if cli.json {
                ErrorStyle::Json
            } else if should_use_color_stderr(cli.no_color) {
                ErrorStyle::Rich
            } else {
                ErrorStyle::Plain
            };
            eprintln!("{}", render_error(&e, style));
            e.exit_code().into()
        }
    }
}
