//! Utility functions.

pub mod env;
pub mod format;
pub mod time;

pub use format::{filled_cells, format_count, format_percent, usage_bar};
pub use time::{period_label, reset_label};
