//! Usage data models.
//!
//! The wire types mirror the GitHub billing API response; everything else is
//! the typed view the rest of the crate works with.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

// =============================================================================
// Wire format
// =============================================================================

/// Response of `/users/{user}/settings/billing/premium_request/usage`.
///
/// Only the fields we consume are modeled; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingUsageResponse {
    pub usage_items: Vec<BillingUsageItem>,
}

/// One line item of the billing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingUsageItem {
    pub gross_quantity: f64,
    #[serde(default)]
    pub model: Option<String>,
}

impl From<BillingUsageItem> for UsageRecord {
    fn from(item: BillingUsageItem) -> Self {
        Self {
            category: item.model.unwrap_or_default(),
            gross_quantity: item.gross_quantity,
        }
    }
}

// =============================================================================
// Domain types
// =============================================================================

/// One billed line item.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    /// Model or service name. May be empty.
    pub category: String,
    /// Units consumed, never negative.
    pub gross_quantity: f64,
}

impl UsageRecord {
    #[must_use]
    pub fn new(category: impl Into<String>, gross_quantity: f64) -> Self {
        Self {
            category: category.into(),
            gross_quantity,
        }
    }
}

/// A calendar month billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl BillingPeriod {
    /// The period containing today (UTC).
    #[must_use]
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self::containing(today)
    }

    /// The period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the period.
    #[must_use]
    pub fn start(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The period after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

/// All usage records for one user and one billing period.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSnapshot {
    pub username: String,
    pub period: BillingPeriod,
    pub records: Vec<UsageRecord>,
}

impl UsageSnapshot {
    /// Build a snapshot from a decoded billing response.
    #[must_use]
    pub fn from_response(
        username: impl Into<String>,
        period: BillingPeriod,
        response: BillingUsageResponse,
    ) -> Self {
        Self {
            username: username.into(),
            period,
            records: response.usage_items.into_iter().map(Into::into).collect(),
        }
    }
}
