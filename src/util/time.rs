//! Billing period labels.

use chrono::NaiveDate;

use crate::core::models::BillingPeriod;

/// Month label such as `October 2026`.
#[must_use]
pub fn period_label(period: BillingPeriod) -> String {
    period
        .start()
        .map_or_else(
            || format!("{}-{:02}", period.year, period.month),
            |date| date.format("%B %Y").to_string(),
        )
}

/// Date the quota resets: the first day of the next period.
#[must_use]
pub fn next_reset(period: BillingPeriod) -> Option<NaiveDate> {
    period.next().start()
}

/// Reset line such as `Resets: November 1, 2026 at 00:00 UTC`.
#[must_use]
pub fn reset_label(period: BillingPeriod) -> String {
    next_reset(period).map_or_else(
        || "Resets: start of next month at 00:00 UTC".to_string(),
        |date| format!("Resets: {} at 00:00 UTC", date.format("%B %-d, %Y")),
    )
}
