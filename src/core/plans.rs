//! Copilot plan table and quota resolution.
//!
//! Plans map to a fixed monthly premium request quota. The effective limit is
//! resolved with strict precedence:
//!
//! 1. `--limit` (must be positive and fit in a `u32`, otherwise an error)
//! 2. `GH_COPILOT_LIMIT` (advisory: ignored unless a positive integer)
//! 3. `[general] limit` in the config file (must be positive)
//! 4. The plan's quota
//! 5. [`FALLBACK_LIMIT`]
//!
//! Plan names follow the same split: names given on the command line or in the
//! config file are validated loudly, while `GH_COPILOT_PLAN` is best-effort and
//! silently ignored when it does not name a known plan.

use std::fmt;

use crate::error::{Result, UsageError};

/// Environment variable holding the advisory default plan.
pub const ENV_PLAN: &str = "GH_COPILOT_PLAN";
/// Environment variable holding the advisory default limit.
pub const ENV_LIMIT: &str = "GH_COPILOT_LIMIT";

/// Limit used when nothing else applies.
pub const FALLBACK_LIMIT: u32 = 1500;

/// A Copilot subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plan {
    Free,
    Pro,
    ProPlus,
    Business,
    Enterprise,
}

impl Plan {
    /// All plans, in table order.
    pub const ALL: &'static [Self] = &[
        Self::Free,
        Self::Pro,
        Self::ProPlus,
        Self::Business,
        Self::Enterprise,
    ];

    /// Plan assumed when none is configured.
    pub const DEFAULT: Self = Self::ProPlus;

    /// Monthly premium request quota.
    #[must_use]
    pub const fn quota(self) -> u32 {
        match self {
            Self::Free => 50,
            Self::Pro | Self::Business => 300,
            Self::ProPlus => 1500,
            Self::Enterprise => 1000,
        }
    }

    /// Identifier accepted by `--plan` and `GH_COPILOT_PLAN`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::ProPlus => "pro+",
            Self::Business => "business",
            Self::Enterprise => "enterprise",
        }
    }

    /// Capitalized name for panel titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::ProPlus => "Pro+",
            Self::Business => "Business",
            Self::Enterprise => "Enterprise",
        }
    }

    /// Look up a plan by identifier. Matching is exact.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|plan| plan.name() == name)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    /// `--limit` / `--plan` flag.
    Cli,
    /// `GH_COPILOT_LIMIT` / `GH_COPILOT_PLAN`.
    Env,
    /// Config file.
    ConfigFile,
    /// The plan table.
    Plan,
    /// Built-in default.
    Default,
}

impl fmt::Display for LimitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Plan => write!(f, "plan table"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A limit together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLimit {
    /// Always greater than zero.
    pub value: u32,
    pub source: LimitSource,
}

/// Resolve the plan name.
///
/// # Errors
///
/// Returns [`UsageError::UnknownPlan`] when the CLI or config file names a plan
/// that is not in the table. An unknown environment value falls through.
pub fn resolve_plan(cli: Option<&str>, env: Option<&str>, config: Option<&str>) -> Result<Plan> {
    if let Some(name) = cli {
        return Plan::from_name(name).ok_or_else(|| UsageError::UnknownPlan(name.to_string()));
    }

    if let Some(name) = env.map(str::trim).filter(|s| !s.is_empty()) {
        match Plan::from_name(name) {
            Some(plan) => return Ok(plan),
            None => tracing::debug!(plan = name, "Ignoring unknown {ENV_PLAN}"),
        }
    }

    if let Some(name) = config {
        return Plan::from_name(name).ok_or_else(|| UsageError::UnknownPlan(name.to_string()));
    }

    Ok(Plan::DEFAULT)
}

/// Resolve the effective limit.
///
/// # Errors
///
/// Returns [`UsageError::InvalidLimit`] when the CLI or config limit is not positive,
/// and [`UsageError::LimitOutOfRange`] when it does not fit in a `u32`.
pub fn resolve_limit(
    cli: Option<i64>,
    env: Option<&str>,
    config: Option<i64>,
    plan: Option<Plan>,
) -> Result<ResolvedLimit> {
    if let Some(value) = cli {
        return positive(value).map(|value| ResolvedLimit {
            value,
            source: LimitSource::Cli,
        });
    }

    if let Some(raw) = env.map(str::trim).filter(|s| !s.is_empty()) {
        match raw.parse::<i64>().ok().and_then(|v| positive(v).ok()) {
            Some(value) => {
                return Ok(ResolvedLimit {
                    value,
                    source: LimitSource::Env,
                });
            }
            None => tracing::debug!(value = raw, "Ignoring invalid {ENV_LIMIT}"),
        }
    }

    if let Some(value) = config {
        return positive(value).map(|value| ResolvedLimit {
            value,
            source: LimitSource::ConfigFile,
        });
    }

    Ok(plan.map_or(
        ResolvedLimit {
            value: FALLBACK_LIMIT,
            source: LimitSource::Default,
        },
        |plan| ResolvedLimit {
            value: plan.quota(),
            source: LimitSource::Plan,
        },
    ))
}

fn positive(value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(UsageError::InvalidLimit(value));
    }
    u32::try_from(value).map_err(|_| UsageError::LimitOutOfRange(value))
}
