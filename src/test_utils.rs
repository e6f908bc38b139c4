//! Test utilities for copilot-usage.
//!
//! Provides shared helpers, test data factories, and assertion macros
//! for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use copilot_usage::test_utils::*;
//!
//! let snapshot = make_test_snapshot();
//! let dir = TestDir::new();
//! dir.create_script("gh", &fake_gh_script("octocat", &make_test_billing_json()));
//! ```

use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::core::aggregate::{Aggregate, aggregate};
use crate::core::models::{BillingPeriod, UsageRecord, UsageSnapshot};

// =============================================================================
// Test Data Factories
// =============================================================================

/// A fixed billing period (October 2026) so rendered labels are stable.
#[must_use]
pub const fn make_test_period() -> BillingPeriod {
    BillingPeriod {
        year: 2026,
        month: 10,
    }
}

/// Create a test `UsageSnapshot` with three models, 150 requests in total.
///
/// # Examples
///
/// ```rust,ignore
/// use copilot_usage::test_utils::make_test_snapshot;
///
/// let snapshot = make_test_snapshot();
/// assert_eq!(snapshot.records.len(), 4);
/// ```
#[must_use]
pub fn make_test_snapshot() -> UsageSnapshot {
    UsageSnapshot {
        username: "octocat".to_string(),
        period: make_test_period(),
        records: vec![
            UsageRecord::new("Claude Sonnet 4", 90.0),
            UsageRecord::new("GPT-5", 40.0),
            UsageRecord::new("Claude Sonnet 4", 15.0),
            UsageRecord::new("Gemini 2.5 Pro", 5.0),
        ],
    }
}

/// Create a snapshot with no usage at all.
#[must_use]
pub fn make_test_snapshot_empty() -> UsageSnapshot {
    UsageSnapshot {
        username: "octocat".to_string(),
        period: make_test_period(),
        records: Vec::new(),
    }
}

/// Aggregate [`make_test_snapshot`] against `limit`.
#[must_use]
pub fn make_test_aggregate(limit: u32) -> Aggregate {
    aggregate(&make_test_snapshot(), limit)
}

/// Billing API response body matching [`make_test_snapshot`].
#[must_use]
pub fn make_test_billing_json() -> String {
    json!({
        "timePeriod": { "year": 2026, "month": 10 },
        "user": "octocat",
        "usageItems": [
            { "product": "Copilot", "sku": "Copilot Premium Request", "model": "Claude Sonnet 4",
              "unitType": "requests", "grossQuantity": 90.0, "netQuantity": 0.0 },
            { "product": "Copilot", "sku": "Copilot Premium Request", "model": "GPT-5",
              "unitType": "requests", "grossQuantity": 40.0, "netQuantity": 0.0 },
            { "product": "Copilot", "sku": "Copilot Premium Request", "model": "Claude Sonnet 4",
              "unitType": "requests", "grossQuantity": 15.0, "netQuantity": 0.0 },
            { "product": "Copilot", "sku": "Copilot Premium Request", "model": "Gemini 2.5 Pro",
              "unitType": "requests", "grossQuantity": 5.0, "netQuantity": 0.0 }
        ]
    })
    .to_string()
}

/// Sample config file content with every section.
#[must_use]
pub fn make_test_config_toml() -> String {
    r#"[general]
plan = "pro"
limit = 400

[github]
binary = "gh"
timeout_seconds = 15

[status_bar]
command = "i3status"
"#
    .to_string()
}

// =============================================================================
// Fake External Programs
// =============================================================================

/// Shell script standing in for `gh`.
///
/// Answers `gh api /user -q .login` with `login` and any
/// `gh api /users/...` request with `billing_json`.
#[must_use]
pub fn fake_gh_script(login: &str, billing_json: &str) -> String {
    format!(
        r#"#!/bin/sh
case "$2" in
  /user)
    echo "{login}"
    ;;
  /users/*)
    cat <<'JSON'
{billing_json}
JSON
    ;;
  *)
    echo "unexpected gh invocation: $*" >&2
    exit 1
    ;;
esac
"#
    )
}

/// Shell script standing in for `gh` when the user is not logged in.
#[must_use]
pub fn fake_gh_unauthenticated_script() -> String {
    r#"#!/bin/sh
echo "To get started with GitHub CLI, please run:  gh auth login" >&2
exit 4
"#
    .to_string()
}

/// Shell script standing in for `i3status`: prints the protocol preamble and
/// then each of `frames` as one line, in order, and exits.
#[must_use]
pub fn fake_status_script(frames: &[&str]) -> String {
    let mut script = String::from("#!/bin/sh\necho '{\"version\":1}'\necho '['\n");
    for frame in frames {
        script.push_str("cat <<'FRAME'\n");
        script.push_str(frame);
        script.push_str("\nFRAME\n");
    }
    script
}

// =============================================================================
// Test Directory
// =============================================================================

/// An isolated temporary directory, deleted on drop.
///
/// # Examples
///
/// ```rust,ignore
/// use copilot_usage::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let path = dir.create_file("config.toml", "[general]\nplan = \"pro\"");
/// assert_eq!(path, dir.file_path("config.toml"));
/// ```
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file in the temporary directory with the given content.
    ///
    /// Creates parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }

    /// Create an executable script, for use as a fake program on `PATH`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written or made executable.
    pub fn create_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.create_file(name, content);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to make script executable");
        }
        path
    }

    /// Get the full path to a file in the temporary directory.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
///
/// # Examples
///
/// ```rust,ignore
/// use copilot_usage::assert_contains;
///
/// assert_contains!("Overall:  45/300 (15.0%)", "15.0%");
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
    ($haystack:expr, $needle:expr, $($arg:tt)*) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            $($arg)*
        );
    };
}

/// Assert that a string is valid JSON.
#[macro_export]
macro_rules! assert_json_valid {
    ($json:expr) => {
        let json = $json;
        if let Err(e) = serde_json::from_str::<serde_json::Value>(json) {
            panic!(
                "Expected valid JSON, but parsing failed: {}\n\nJSON string:\n{}",
                e, json
            );
        }
    };
}

/// Assert that a string does NOT contain ANSI escape codes.
#[macro_export]
macro_rules! assert_no_ansi_codes {
    ($text:expr) => {
        let text = $text;
        assert!(
            !text.contains('\x1b'),
            "Expected string to NOT contain ANSI escape codes.\n\nActual string:\n{:?}",
            text
        );
    };
}

/// Assert approximate floating point equality.
///
/// ```rust,ignore
/// assert_float_eq!(36.666, 36.67, 0.01);
/// ```
#[macro_export]
macro_rules! assert_float_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_float_eq!($left, $right, f64::EPSILON * 100.0)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let epsilon: f64 = $epsilon;
        assert!(
            (left - right).abs() < epsilon,
            "Float equality assertion failed: {} != {} (epsilon: {})",
            left,
            right,
            epsilon
        );
    };
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Check if a string contains ANSI escape sequences.
#[must_use]
pub fn has_ansi_codes(text: &str) -> bool {
    text.contains('\x1b')
}

/// Strip ANSI escape codes from a string.
///
/// Useful for comparing output content without formatting.
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // CSI sequences end at the first letter.
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::BillingUsageResponse;

    #[test]
    fn billing_json_matches_snapshot() {
        let response: BillingUsageResponse =
            serde_json::from_str(&make_test_billing_json()).unwrap();
        let snapshot = UsageSnapshot::from_response("octocat", make_test_period(), response);
        assert_eq!(snapshot, make_test_snapshot());
    }

    #[test]
    fn test_aggregate_totals() {
        let aggregate = make_test_aggregate(300);
        assert_float_eq!(aggregate.total, 150.0);
        assert_float_eq!(aggregate.percentage, 50.0);
        assert_eq!(aggregate.by_category.len(), 3);
    }

    #[test]
    fn strip_ansi() {
        let colored = "\x1b[1;31mError\x1b[0m: boom";
        assert!(has_ansi_codes(colored));
        assert_eq!(strip_ansi_codes(colored), "Error: boom");
    }

    #[test]
    fn config_toml_parses() {
        let dir = TestDir::new();
        let path = dir.create_file("config.toml", &make_test_config_toml());
        let config = crate::storage::Config::load_from(&path).unwrap();
        assert_eq!(config.general.limit, Some(400));
    }

    #[test]
    fn status_script_has_preamble() {
        let script = fake_status_script(&["[]"]);
        assert_contains!(&script, "{\"version\":1}");
        assert_contains!(&script, "<<'FRAME'\n[]\nFRAME\n");
    }
}
