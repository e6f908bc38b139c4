//! CLI argument parsing and command dispatch.

pub mod args;
pub mod i3bar;
pub mod usage;

pub use args::{Cli, Mode};

use crate::core::github::GhClient;
use crate::core::plans::{ENV_LIMIT, ENV_PLAN, Plan, ResolvedLimit, resolve_limit, resolve_plan};
use crate::error::Result;
use crate::storage::Config;
use crate::util::env::should_use_color;

/// Plan and limit after applying flags, environment, and config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub plan: Plan,
    pub limit: ResolvedLimit,
}

impl Quota {
    /// Resolve from the parsed flags, the given environment values, and the config file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown plan or a non-positive limit.
    pub fn resolve(
        cli: &Cli,
        env_plan: Option<&str>,
        env_limit: Option<&str>,
        config: &Config,
    ) -> Result<Self> {
        let plan = resolve_plan(cli.plan.as_deref(), env_plan, config.general.plan.as_deref())?;
        let limit = resolve_limit(cli.limit, env_limit, config.general.limit, Some(plan))?;
        tracing::debug!(%plan, limit = limit.value, source = %limit.source, "Resolved quota");
        Ok(Self { plan, limit })
    }

    /// Resolve using the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub fn from_env(cli: &Cli, config: &Config) -> Result<Self> {
        let env_plan = std::env::var(ENV_PLAN).ok();
        let env_limit = std::env::var(ENV_LIMIT).ok();
        Self::resolve(cli, env_plan.as_deref(), env_limit.as_deref(), config)
    }
}

/// Run the requested mode.
///
/// # Errors
///
/// Returns the first configuration, fetch, or launch error.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let quota = Quota::from_env(cli, &config)?;

    let client = GhClient::new(config.github.binary.clone(), config.github.timeout());

    match cli.mode() {
        Mode::Panel => {
            usage::execute(&client, quota, false, should_use_color(cli.no_color)).await
        }
        Mode::Json => usage::execute(&client, quota, true, false).await,
        Mode::StatusBar => {
            let command = i3bar::status_command(
                cli.status_command.as_deref(),
                cli.status_config.as_deref(),
                &config.status_bar,
            );
            i3bar::execute(&command, client, quota.limit.value).await
        }
    }
}
