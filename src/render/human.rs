//! Human-readable boxed panel.
//!
//! Layout is fixed width so it lines up in any terminal:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                                                        │
//! │         GitHub Copilot Pro+ - Premium Requests         │
//! │                 October 2026 • octocat                 │
//! │                                                        │
//! ├────────────────────────────────────────────────────────┤
//! │ Overall:  412/1500 (27.5%)                             │
//! │ Usage:  ████████████░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░│
//! ...
//! ```

use rich_rust::{Color, ColorSystem, Style};

use super::UsageLevel;
use crate::core::aggregate::Aggregate;
use crate::core::models::BillingPeriod;
use crate::core::plans::Plan;
use crate::util::format::{format_count, format_percent, usage_bar};
use crate::util::time::{period_label, reset_label};

/// Total width of every panel row, borders included.
pub const PANEL_WIDTH: usize = 58;
const INNER_WIDTH: usize = PANEL_WIDTH - 2;
/// Width of the usage bar (the row is `│ Usage:  <bar>│`).
pub const PANEL_BAR_WIDTH: usize = INNER_WIDTH - 9;
const MODEL_COLUMN: usize = 22;

/// Metadata shown around the numbers.
#[derive(Debug, Clone)]
pub struct PanelContext<'a> {
    pub username: &'a str,
    pub plan: Plan,
    pub period: BillingPeriod,
}

/// Apply a named color, or return the text unchanged.
fn paint(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    Color::parse(color).map_or_else(
        |_| text.to_string(),
        |color| Style::new().color(color).render(text, ColorSystem::TrueColor),
    )
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return truncate(s, width);
    }
    let left = (width - len) / 2;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(width - len - left))
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return truncate(s, width);
    }
    format!("{s}{}", " ".repeat(width - len))
}

fn border(left: char, right: char) -> String {
    format!("{left}{}{right}", "─".repeat(INNER_WIDTH))
}

fn blank_row() -> String {
    format!("│{}│", " ".repeat(INNER_WIDTH))
}

fn centered_row(text: &str) -> String {
    format!("│{}│", center(text, INNER_WIDTH))
}

fn text_row(text: &str) -> String {
    format!("│ {}│", pad_right(text, INNER_WIDTH - 1))
}

/// Render the usage panel.
#[must_use]
pub fn render_panel(ctx: &PanelContext<'_>, aggregate: &Aggregate, color: bool) -> String {
    let level = UsageLevel::from_percentage(aggregate.percentage);
    let percent = format_percent(aggregate.percentage);
    let mut lines = Vec::new();

    lines.push(border('┌', '┐'));
    lines.push(blank_row());
    lines.push(centered_row(&format!(
        "GitHub Copilot {} - Premium Requests",
        ctx.plan.display_name()
    )));
    lines.push(centered_row(&format!(
        "{} • {}",
        period_label(ctx.period),
        ctx.username
    )));
    lines.push(blank_row());
    lines.push(border('├', '┤'));

    let overall = text_row(&format!(
        "Overall:  {}/{} ({percent})",
        format_count(aggregate.total),
        aggregate.limit
    ));
    lines.push(overall.replacen(&percent, &paint(&percent, level.color_name(), color), 1));

    let bar = usage_bar(
        aggregate.total,
        f64::from(aggregate.limit),
        PANEL_BAR_WIDTH,
    );
    lines.push(format!("│ Usage:  {}│", paint(&bar, level.color_name(), color)));
    lines.push(blank_row());
    lines.push(text_row(&reset_label(ctx.period)));
    lines.push(border('├', '┤'));

    lines.push(text_row("Per-model usage:"));
    lines.push(blank_row());

    let models: Vec<(&str, f64)> = aggregate
        .sorted_categories()
        .into_iter()
        .filter(|(_, quantity)| *quantity > 0.0)
        .collect();
    if models.is_empty() {
        lines.push(text_row("No premium requests used yet."));
    } else {
        for (model, quantity) in models {
            lines.push(text_row(&format!(
                "{:<width$} {:>5} {:>6.1}%",
                truncate(model, MODEL_COLUMN),
                format_count(quantity),
                aggregate.share_of_limit(quantity),
                width = MODEL_COLUMN,
            )));
        }
    }

    lines.push(blank_row());
    lines.push(border('└', '┘'));

    lines.join("\n")
}
