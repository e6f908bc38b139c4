//! Number formatting utilities.

/// Filled bar glyph.
pub const BAR_FILLED: char = '█';
/// Empty bar glyph.
pub const BAR_EMPTY: char = '░';

/// Format a percentage with one decimal place.
///
/// Values of 1000% and above are abbreviated (`1234.0` becomes `1.2k%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1}k%", value / 1000.0)
    } else {
        format!("{value:.1}%")
    }
}

/// Number of filled cells in a bar of `width` cells.
///
/// Computed as `floor(min(used, limit) * width / limit)`, so it never exceeds
/// `width` even when usage is over the limit.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn filled_cells(used: f64, limit: f64, width: usize) -> usize {
    if limit <= 0.0 || width == 0 || used <= 0.0 {
        return 0;
    }
    let filled = (used.min(limit) * width as f64 / limit).floor() as usize;
    filled.min(width)
}

/// Render a usage bar of exactly `width` glyphs.
#[must_use]
pub fn usage_bar(used: f64, limit: f64, width: usize) -> String {
    let filled = filled_cells(used, limit, width);
    let mut bar = String::with_capacity(width * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(BAR_FILLED, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

/// Format a request count the way the panel shows it (whole requests, truncated).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_count(value: f64) -> String {
    (value.trunc() as i64).to_string()
}
