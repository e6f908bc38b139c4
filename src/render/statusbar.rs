//! The synthetic usage element injected into status-line frames.

use serde::Serialize;
use serde_json::Value;

use super::UsageLevel;
use crate::core::aggregate::Aggregate;
use crate::core::statusbar::protocol::StatusElement;
use crate::util::format::{format_percent, usage_bar};

/// `name` of the injected element.
pub const ELEMENT_NAME: &str = "copilot";
/// Width of the bar in the status line.
pub const STATUS_BAR_WIDTH: usize = 10;

/// Status element as defined by the i3bar protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageElement {
    pub name: &'static str,
    pub full_text: String,
    pub color: &'static str,
}

impl UsageElement {
    /// Build the element for an aggregate.
    #[must_use]
    pub fn from_aggregate(aggregate: &Aggregate) -> Self {
        let bar = usage_bar(
            aggregate.total,
            f64::from(aggregate.limit),
            STATUS_BAR_WIDTH,
        );
        Self {
            name: ELEMENT_NAME,
            full_text: format!("Copilot: {bar} {}", format_percent(aggregate.percentage)),
            color: UsageLevel::from_percentage(aggregate.percentage).hex_color(),
        }
    }

    /// The element as a JSON object ready to prepend to a frame.
    #[must_use]
    pub fn to_object(&self) -> StatusElement {
        let mut object = StatusElement::new();
        object.insert("name".to_string(), Value::from(self.name));
        object.insert("full_text".to_string(), Value::from(self.full_text.clone()));
        object.insert("color".to_string(), Value::from(self.color));
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_test_aggregate;
    use std::collections::BTreeMap;

    fn agg(total: f64, limit: u32) -> Aggregate {
        Aggregate {
            total,
            by_category: BTreeMap::new(),
            percentage: total / f64::from(limit) * 100.0,
            limit,
        }
    }

    #[test]
    fn element_text_and_color() {
        let element = UsageElement::from_aggregate(&make_test_aggregate(300));
        assert_eq!(element.name, "copilot");
        assert_eq!(element.full_text, "Copilot: █████░░░░░ 50.0%");
        assert_eq!(element.color, "#00FF00");
    }

    #[test]
    fn element_over_quota() {
        let element = UsageElement::from_aggregate(&agg(2000.0, 1500));
        assert_eq!(element.full_text, "Copilot: ██████████ 133.3%");
        assert_eq!(element.color, "#FF0000");
    }

    #[test]
    fn object_matches_serialized_struct() {
        let element = UsageElement::from_aggregate(&agg(240.0, 300));
        let via_serde = serde_json::to_value(&element).unwrap();
        crate::assert_contains!(&via_serde.to_string(), r#""name":"copilot""#);
        assert_eq!(Value::Object(element.to_object()), via_serde);
        assert_eq!(element.color, "#FFFF00");
    }
}
