//! Panel and `--json` output: one fetch, one render.

use super::Quota;
use crate::core::aggregate::aggregate;
use crate::core::github::GhClient;
use crate::core::models::{BillingPeriod, UsageSnapshot};
use crate::error::Result;
use crate::render::{PanelContext, UsageReport, render_json, render_panel};

/// Fetch the current month's usage and print it.
///
/// # Errors
///
/// Returns an error if `gh` fails or its output cannot be parsed.
pub async fn execute(client: &GhClient, quota: Quota, json: bool, color: bool) -> Result<()> {
    let username = client.current_username().await?;
    let period = BillingPeriod::current();
    tracing::debug!(%username, year = period.year, month = period.month, "Fetching usage");

    let snapshot = client.fetch_usage(&username, period).await?;
    let output = render_usage(&snapshot, quota, json, color)?;
    println!("{output}");
    Ok(())
}

/// Render a snapshot as the panel or the JSON report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_usage(
    snapshot: &UsageSnapshot,
    quota: Quota,
    json: bool,
    color: bool,
) -> Result<String> {
    let aggregate = aggregate(snapshot, quota.limit.value);
    let ctx = PanelContext {
        username: &snapshot.username,
        plan: quota.plan,
        period: snapshot.period,
    };

    if json {
        render_json(&UsageReport::new(&ctx, &aggregate))
    } else {
        Ok(render_panel(&ctx, &aggregate, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::UsageRecord;
    use crate::core::plans::{LimitSource, Plan, ResolvedLimit};

    fn snapshot() -> UsageSnapshot {
        UsageSnapshot {
            username: "octocat".to_string(),
            period: BillingPeriod {
                year: 2026,
                month: 2,
            },
            records: vec![
                UsageRecord::new("Claude Sonnet 4", 30.0),
                UsageRecord::new("GPT-5", 15.0),
            ],
        }
    }

    fn quota(plan: Plan, limit: u32) -> Quota {
        Quota {
            plan,
            limit: ResolvedLimit {
                value: limit,
                source: LimitSource::Plan,
            },
        }
    }

    #[test]
    fn json_report_uses_resolved_quota() {
        let output = render_usage(&snapshot(), quota(Plan::Pro, 300), true, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["username"], "octocat");
        assert_eq!(value["plan"], "pro");
        assert_eq!(value["limit"], 300);
        assert_eq!(value["used"], 45.0);
        assert_eq!(value["percentage"], "15.0");
        assert_eq!(value["month"], "February 2026");
        assert_eq!(value["models"]["GPT-5"], 15.0);
    }

    #[test]
    fn panel_mentions_plan_and_period() {
        let output = render_usage(&snapshot(), quota(Plan::Enterprise, 1000), false, false).unwrap();
        assert!(output.contains("GitHub Copilot Enterprise - Premium Requests"));
        assert!(output.contains("February 2026 • octocat"));
        assert!(output.contains("Overall:  45/1000 (4.5%)"));
    }
}
