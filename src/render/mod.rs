//! Output rendering: the human panel, the JSON report, and the status element.

pub mod error;
pub mod human;
pub mod robot;
pub mod statusbar;

pub use human::{PanelContext, render_panel};
pub use robot::{UsageReport, render_json};
pub use statusbar::UsageElement;

/// How close usage is to the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    /// Below 75%.
    Normal,
    /// 75% up to 90%.
    Warning,
    /// 90% and above, including over quota.
    Critical,
}

impl UsageLevel {
    /// Classify a percentage of the limit.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Critical
        } else if percentage >= 75.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Color name understood by the terminal renderer.
    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            Self::Normal => "green",
            Self::Warning => "yellow",
            Self::Critical => "red",
        }
    }

    /// Hex color for the status bar.
    #[must_use]
    pub const fn hex_color(self) -> &'static str {
        match self {
            Self::Normal => "#00FF00",
            Self::Warning => "#FFFF00",
            Self::Critical => "#FF0000",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(UsageLevel::from_percentage(0.0), UsageLevel::Normal);
        assert_eq!(UsageLevel::from_percentage(74.99), UsageLevel::Normal);
        assert_eq!(UsageLevel::from_percentage(75.0), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percentage(89.9), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percentage(90.0), UsageLevel::Critical);
        assert_eq!(UsageLevel::from_percentage(250.0), UsageLevel::Critical);
    }
}
