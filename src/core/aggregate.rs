//! Reduce usage records to totals.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::models::UsageSnapshot;

/// Bucket for records without a model label.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Totals derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Sum of every record's quantity.
    pub total: f64,
    /// Summed quantity per category.
    pub by_category: BTreeMap<String, f64>,
    /// `100 * total / limit`. Not clamped.
    pub percentage: f64,
    /// Effective limit the percentage was computed against.
    pub limit: u32,
}

impl Aggregate {
    /// Categories ordered by descending quantity, ties by ascending name.
    #[must_use]
    pub fn sorted_categories(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .by_category
            .iter()
            .map(|(name, quantity)| (name.as_str(), *quantity))
            .collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Percentage of the limit used by one quantity.
    #[must_use]
    pub fn share_of_limit(&self, quantity: f64) -> f64 {
        quantity / f64::from(self.limit) * 100.0
    }
}

/// Compute totals for `snapshot` against `limit`.
///
/// `limit` must be positive; [`crate::core::plans::resolve_limit`] guarantees it.
#[must_use]
pub fn aggregate(snapshot: &UsageSnapshot, limit: u32) -> Aggregate {
    let mut total = 0.0;
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();

    for record in &snapshot.records {
        total += record.gross_quantity;
        let label = record.category.trim();
        let key = if label.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            label
        };
        *by_category.entry(key.to_string()).or_default() += record.gross_quantity;
    }

    Aggregate {
        total,
        by_category,
        percentage: total / f64::from(limit) * 100.0,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{BillingPeriod, UsageRecord};

    fn snapshot(records: Vec<UsageRecord>) -> UsageSnapshot {
        UsageSnapshot {
            username: "octocat".to_string(),
            period: BillingPeriod {
                year: 2026,
                month: 10,
            },
            records,
        }
    }

    #[test]
    fn total_is_sum_of_quantities() {
        let agg = aggregate(
            &snapshot(vec![
                UsageRecord::new("a", 1.5),
                UsageRecord::new("b", 2.25),
                UsageRecord::new("a", 10.0),
            ]),
            100,
        );
        crate::assert_float_eq!(agg.total, 13.75, 1e-9);
        crate::assert_float_eq!(agg.by_category["a"], 11.5, 1e-9);
        crate::assert_float_eq!(agg.percentage, 13.75, 1e-9);
    }

    #[test]
    fn grouping_ignores_input_order() {
        let forward = aggregate(
            &snapshot(vec![
                UsageRecord::new("x", 1.0),
                UsageRecord::new("y", 2.0),
                UsageRecord::new("x", 3.0),
            ]),
            10,
        );
        let reversed = aggregate(
            &snapshot(vec![
                UsageRecord::new("x", 3.0),
                UsageRecord::new("y", 2.0),
                UsageRecord::new("x", 1.0),
            ]),
            10,
        );
        assert_eq!(forward.by_category, reversed.by_category);
        assert_eq!(forward.sorted_categories(), reversed.sorted_categories());
    }

    #[test]
    fn sorted_by_quantity_then_name() {
        let agg = aggregate(
            &snapshot(vec![
                UsageRecord::new("beta", 5.0),
                UsageRecord::new("alpha", 5.0),
                UsageRecord::new("gamma", 9.0),
                UsageRecord::new("delta", 1.0),
            ]),
            300,
        );
        let names: Vec<&str> = agg.sorted_categories().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta", "delta"]);
    }

    #[test]
    fn blank_category_goes_to_unknown() {
        let agg = aggregate(
            &snapshot(vec![
                UsageRecord::new("", 2.0),
                UsageRecord::new("   ", 1.0),
                UsageRecord::new("GPT-5", 4.0),
            ]),
            300,
        );
        assert_eq!(agg.by_category.get(UNKNOWN_CATEGORY), Some(&3.0));
        assert_eq!(agg.by_category.len(), 2);
    }

    #[test]
    fn percentage_is_not_clamped() {
        let agg = aggregate(&snapshot(vec![UsageRecord::new("m", 2000.0)]), 1500);
        assert!((agg.percentage - 133.333).abs() < 0.001);
    }

    #[test]
    fn empty_snapshot() {
        let agg = aggregate(&snapshot(Vec::new()), 50);
        assert!(agg.total.abs() < f64::EPSILON);
        assert!(agg.by_category.is_empty());
        assert!(agg.percentage.abs() < f64::EPSILON);
    }
}
