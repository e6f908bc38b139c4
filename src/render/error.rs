//! Error rendering for copilot-usage.
//!
//! Errors always go to stderr so stdout stays clean for the panel, the JSON
//! report, or the status-line stream.

use rich_rust::{Color, ColorSystem, Segment, Style};
use serde::Serialize;

use crate::error::{FixSuggestion, UsageError};

// =============================================================================
// Public API
// =============================================================================

/// How an error should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// Plain text, no escape codes.
    Plain,
    /// Text with ANSI colors.
    Rich,
    /// Structured JSON for `--json` consumers.
    Json,
}

/// Render an error in the requested style.
#[must_use]
pub fn render_error(error: &UsageError, style: ErrorStyle) -> String {
    match style {
        ErrorStyle::Plain => render_text(error, false),
        ErrorStyle::Rich => render_text(error, true),
        ErrorStyle::Json => render_error_json(error),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &UsageError) -> String {
    serde_json::to_string_pretty(&ErrorJson::from_error(error))
        .unwrap_or_else(|_| render_text(error, false))
}

// =============================================================================
// Text Rendering
// =============================================================================

fn render_text(error: &UsageError, color: bool) -> String {
    let suggestions = error.fix_suggestions();
    let mut segments: Vec<Segment> = Vec::new();

    segments.push(Segment::styled(
        format!("Error: {error}"),
        with_color(Style::new().bold(), "red"),
    ));
    segments.push(Segment::styled(
        format!(" [{}]\n", error.error_code()),
        Style::new().dim(),
    ));

    if let Some(first) = suggestions.first() {
        segments.push(Segment::plain(format!("{}\n", first.context)));
    }

    let commands = fix_commands(&suggestions);
    if !commands.is_empty() {
        segments.push(Segment::styled(
            "How to fix:\n".to_string(),
            Style::new().bold(),
        ));
        for (i, cmd) in commands.iter().enumerate() {
            segments.push(Segment::plain(format!("  {}. ", i + 1)));
            segments.push(Segment::styled(
                format!("{cmd}\n"),
                with_color(Style::new(), "cyan"),
            ));
        }
    }

    if let Some(prevention) = suggestions.first().and_then(|s| s.prevention.as_ref()) {
        segments.push(Segment::styled("Tip: ".to_string(), Style::new().bold()));
        segments.push(Segment::plain(format!("{prevention}\n")));
    }

    if let Some(url) = suggestions.first().and_then(|s| s.doc_url.as_ref()) {
        segments.push(Segment::plain(format!("Docs: {url}\n")));
    }

    segments_to_string(&segments, color)
        .trim_end()
        .to_string()
}

/// Copy-paste ready commands, skipping comment lines.
fn fix_commands(suggestions: &[FixSuggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .flat_map(|s| s.commands.iter())
        .map(String::as_str)
        .filter(|cmd| !cmd.starts_with('#'))
        .collect()
}

// =============================================================================
// JSON Rendering
// =============================================================================

/// JSON representation of an error for machine consumption.
#[derive(Serialize)]
struct ErrorJson {
    error_code: String,
    category: &'static str,
    message: String,
    suggestions: Vec<SuggestionJson>,
}

#[derive(Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_url: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &UsageError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().as_str(),
            message: error.to_string(),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                    doc_url: s.doc_url,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn with_color(style: Style, name: &str) -> Style {
    match Color::parse(name) {
        Ok(color) => style.color(color),
        Err(_) => style,
    }
}

/// Convert segments to a string, styled only when `color` is set.
fn segments_to_string(segments: &[Segment], color: bool) -> String {
    segments
        .iter()
        .map(|seg| match (&seg.style, color) {
            (Some(style), true) => style.render(&seg.text, ColorSystem::TrueColor),
            _ => seg.text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> UsageError {
        UsageError::CliNotFound {
            name: "gh".to_string(),
        }
    }

    #[test]
    fn plain_render_includes_code_and_fix() {
        let output = render_error(&not_found(), ErrorStyle::Plain);
        assert!(output.starts_with("Error: CLI tool not found: gh [CU-T001]"));
        assert!(output.contains("How to fix:"));
        assert!(output.contains("brew install gh"));
        assert!(!output.contains("# Or"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn rich_render_uses_escape_codes() {
        let output = render_error(&not_found(), ErrorStyle::Rich);
        assert!(output.contains('\x1b'));
    }

    #[test]
    fn json_render_is_structured() {
        let output = render_error(&UsageError::UnknownPlan("team".to_string()), ErrorStyle::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error_code"], "CU-C001");
        assert_eq!(value["category"], "configuration");
        assert!(value["message"].as_str().unwrap().contains("team"));
        assert!(value["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn internal_errors_render_without_suggestions() {
        let output = render_error(&UsageError::Io(std::io::Error::other("disk")), ErrorStyle::Plain);
        assert_eq!(output, "Error: I/O error: disk [CU-X001]");
    }
}
