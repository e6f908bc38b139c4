//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::core::logging::LogLevel;

const AFTER_HELP: &str = "\
Environment variables:
  GH_COPILOT_PLAN        Default plan when --plan is not given
  GH_COPILOT_LIMIT       Default request limit when --limit is not given
  COPILOT_USAGE_CONFIG   Path to the config file
  COPILOT_USAGE_LOG      Log level (trace, debug, info, warn, error)

Plans: free (50), pro (300), pro+ (1500), business (300), enterprise (1000)";

/// Show GitHub Copilot premium request usage for the current month.
#[derive(Parser, Debug)]
#[command(name = "copilot-usage")]
#[command(author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Copilot plan (free, pro, pro+, business, enterprise)
    #[arg(short, long, value_name = "PLAN")]
    pub plan: Option<String>,

    /// Monthly premium request limit (overrides the plan's quota)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Print a JSON report instead of the panel
    #[arg(short, long, conflicts_with = "i3bar")]
    pub json: bool,

    /// Relay i3status output with a usage element for i3bar
    #[arg(long)]
    pub i3bar: bool,

    /// Status-line program relayed by --i3bar
    #[arg(long, value_name = "PROGRAM", requires = "i3bar")]
    pub status_command: Option<String>,

    /// Config file passed to the status-line program with -c
    #[arg(long, value_name = "PATH", requires = "i3bar")]
    pub status_config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_arg(s).ok_or_else(|| {
        format!("unknown log level '{s}' (expected trace, debug, info, warn, or error)")
    })
}

/// What the invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Panel,
    Json,
    StatusBar,
}

impl Cli {
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.i3bar {
            Mode::StatusBar
        } else if self.json {
            Mode::Json
        } else {
            Mode::Panel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["copilot-usage", "-p", "pro", "-l", "400", "-j"]).unwrap();
        assert_eq!(cli.plan.as_deref(), Some("pro"));
        assert_eq!(cli.limit, Some(400));
        assert_eq!(cli.mode(), Mode::Json);
    }

    #[test]
    fn negative_limit_reaches_validation() {
        let cli = Cli::try_parse_from(["copilot-usage", "--limit", "-5"]).unwrap();
        assert_eq!(cli.limit, Some(-5));
    }

    #[test]
    fn json_and_i3bar_conflict() {
        assert!(Cli::try_parse_from(["copilot-usage", "--json", "--i3bar"]).is_err());
    }

    #[test]
    fn status_overrides_need_i3bar() {
        assert!(Cli::try_parse_from(["copilot-usage", "--status-command", "x"]).is_err());
        let cli =
            Cli::try_parse_from(["copilot-usage", "--i3bar", "--status-command", "i3blocks"])
                .unwrap();
        assert_eq!(cli.mode(), Mode::StatusBar);
        assert_eq!(cli.status_command.as_deref(), Some("i3blocks"));
    }

    #[test]
    fn log_level_is_validated() {
        assert!(Cli::try_parse_from(["copilot-usage", "--log-level", "loud"]).is_err());
        let cli = Cli::try_parse_from(["copilot-usage", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn defaults_to_panel() {
        let cli = Cli::try_parse_from(["copilot-usage"]).unwrap();
        assert_eq!(cli.mode(), Mode::Panel);
        assert!(cli.plan.is_none() && cli.limit.is_none());
    }
}
