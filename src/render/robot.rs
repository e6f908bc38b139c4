//! Machine-readable JSON report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::aggregate::Aggregate;
use crate::error::Result;
use crate::render::PanelContext;
use crate::util::time::period_label;

/// The `--json` document.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport<'a> {
    pub username: &'a str,
    pub plan: &'static str,
    pub limit: u32,
    pub used: f64,
    /// One decimal, no percent sign.
    pub percentage: String,
    /// e.g. `October 2026`.
    pub month: String,
    pub models: &'a BTreeMap<String, f64>,
}

impl<'a> UsageReport<'a> {
    #[must_use]
    pub fn new(ctx: &PanelContext<'a>, aggregate: &'a Aggregate) -> Self {
        Self {
            username: ctx.username,
            plan: ctx.plan.name(),
            limit: aggregate.limit,
            used: aggregate.total,
            percentage: format!("{:.1}", aggregate.percentage),
            month: period_label(ctx.period),
            models: &aggregate.by_category,
        }
    }
}

/// Render any serializable value as two-space indented JSON.
pub fn render_json<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::core::models::{BillingPeriod, UsageRecord, UsageSnapshot};
    use crate::core::plans::Plan;
    use serde_json::json;

    #[test]
    fn report_has_fixed_keys() {
        let period = BillingPeriod {
            year: 2026,
            month: 10,
        };
        let snapshot = UsageSnapshot {
            username: "octocat".to_string(),
            period,
            records: vec![
                UsageRecord::new("GPT-5", 100.0),
                UsageRecord::new("Claude Sonnet 4", 10.5),
                UsageRecord::new("GPT-5", 0.0),
            ],
        };
        let agg = aggregate(&snapshot, 300);
        let ctx = PanelContext {
            username: "octocat",
            plan: Plan::Pro,
            period,
        };

        let output = render_json(&UsageReport::new(&ctx, &agg)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            json!({
                "username": "octocat",
                "plan": "pro",
                "limit": 300,
                "used": 110.5,
                "percentage": "36.8",
                "month": "October 2026",
                "models": {"GPT-5": 100.0, "Claude Sonnet 4": 10.5}
            })
        );
        assert!(output.contains("\n  \"username\""));
    }

    #[test]
    fn percentage_over_quota_is_not_abbreviated() {
        let agg = Aggregate {
            total: 20000.0,
            by_category: BTreeMap::new(),
            percentage: 1333.333,
            limit: 1500,
        };
        let ctx = PanelContext {
            username: "u",
            plan: Plan::ProPlus,
            period: BillingPeriod {
                year: 2026,
                month: 1,
            },
        };
        assert_eq!(UsageReport::new(&ctx, &agg).percentage, "1333.3");
    }
}
