//! Usage fetching through the authenticated `gh` CLI.
//!
//! Authentication is entirely delegated to `gh`; we only shell out to
//! `gh api` and parse what it prints.

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use super::cli_runner::{CLI_TIMEOUT, resolve_program, run_json_command, run_text_command};
use super::models::{BillingPeriod, BillingUsageResponse, UsageSnapshot};
use crate::error::Result;

/// Default name of the GitHub CLI binary.
pub const GH_BINARY: &str = "gh";

/// Something that can produce a fresh usage snapshot.
///
/// The status-bar multiplexer refreshes through this seam so the streaming
/// state machine can be driven without a real `gh`.
pub trait UsageSource {
    /// Fetch the current billing period's usage.
    fn fetch(&mut self) -> impl Future<Output = Result<UsageSnapshot>>;
}

/// Billing API path for one user and period.
#[must_use]
pub fn usage_endpoint(username: &str, period: BillingPeriod) -> String {
    format!(
        "/users/{username}/settings/billing/premium_request/usage?year={}&month={}",
        period.year, period.month
    )
}

/// Client for the `gh` CLI.
///
/// The binary is looked up on `PATH` at the first call, not at construction.
#[derive(Debug, Clone)]
pub struct GhClient {
    program: String,
    resolved: OnceLock<String>,
    timeout: Duration,
    username: Option<String>,
}

impl Default for GhClient {
    fn default() -> Self {
        Self::new(GH_BINARY, CLI_TIMEOUT)
    }
}

impl GhClient {
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            resolved: OnceLock::new(),
            timeout,
            username: None,
        }
    }

    /// Full path of the `gh` binary, looked up once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::UsageError::CliNotFound`] if the binary is not installed.
    pub fn program(&self) -> Result<&str> {
        if let Some(path) = self.resolved.get() {
            return Ok(path.as_str());
        }
        let path = resolve_program(&self.program)?.display().to_string();
        tracing::debug!(program = %self.program, %path, "Resolved gh binary");
        Ok(self.resolved.get_or_init(|| path).as_str())
    }

    /// Login of the authenticated user (`gh api /user -q .login`).
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` is missing, fails, or prints nothing.
    pub async fn current_username(&self) -> Result<String> {
        let login = run_text_command(self.program()?, &["api", "/user", "-q", ".login"], self.timeout)
            .await?;
        if login.is_empty() {
            return Err(crate::error::UsageError::ParseResponse(
                "gh returned an empty login".to_string(),
            ));
        }
        Ok(login)
    }

    /// Premium request usage for `username` in `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` fails or the response is not a billing document.
    pub async fn fetch_usage(&self, username: &str, period: BillingPeriod) -> Result<UsageSnapshot> {
        let endpoint = usage_endpoint(username, period);
        tracing::debug!(%endpoint, "Fetching premium request usage");

        let response: BillingUsageResponse =
            run_json_command(self.program()?, &["api", &endpoint], self.timeout).await?;
        tracing::debug!(items = response.usage_items.len(), "Fetched usage items");

        Ok(UsageSnapshot::from_response(username, period, response))
    }

    /// Username, looked up once and then remembered.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::current_username`] failures.
    pub async fn username(&mut self) -> Result<String> {
        if let Some(name) = &self.username {
            return Ok(name.clone());
        }
        let name = self.current_username().await?;
        self.username = Some(name.clone());
        Ok(name)
    }
}

impl UsageSource for GhClient {
    async fn fetch(&mut self) -> Result<UsageSnapshot> {
        let username = self.username().await?;
        self.fetch_usage(&username, BillingPeriod::current()).await
    }
}
