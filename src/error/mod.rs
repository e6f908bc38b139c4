//! Error types for copilot-usage.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into three categories:
//! - **Configuration**: unknown plan names, non-positive limits, invalid config files
//! - **External tool**: the `gh` CLI or the status-line command failed to start,
//!   exited non-zero, timed out, or printed something we could not parse
//! - **Internal**: I/O and serialization failures of our own output
//!
//! Each error has a stable error code (e.g., `CU-C001`) for programmatic handling.
//!
//! Status-line frames that fail to parse are not errors at all: the multiplexer
//! passes them through untouched.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid plan, limit, or config file.
    Configuration,
    /// The external CLI or status-line command misbehaved.
    ExternalTool,
    /// Unexpected errors, bugs, or unclassified issues.
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration error",
            Self::ExternalTool => "External tool error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Configuration => "C",
            Self::ExternalTool => "T",
            Self::Internal => "X",
        }
    }

    /// Stable machine-readable name used in JSON error output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::ExternalTool => "external_tool",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success, including `--help` and `--version`.
    Success = 0,
    /// Any fetch, parse, launch, or validation failure.
    Failure = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Main error type for copilot-usage operations.
#[derive(Error, Debug)]
pub enum UsageError {
    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// A plan name given on the command line or in the config file is not in the plan table.
    #[error("unknown plan '{0}' (valid plans: free, pro, pro+, business, enterprise)")]
    UnknownPlan(String),

    /// A limit given on the command line was zero or negative.
    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(i64),

    /// A limit too large to count requests against.
    #[error("limit must be at most 4294967295, got {0}")]
    LimitOutOfRange(i64),

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error parsing the config file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    // ==========================================================================
    // External tool errors
    // ==========================================================================
    /// Required CLI tool not found in PATH.
    #[error("CLI tool not found: {name}")]
    CliNotFound { name: String },

    /// The CLI could not be run or exited non-zero.
    #[error("{program} failed: {reason}")]
    CommandFailed { program: String, reason: String },

    /// The CLI printed output we could not parse.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    /// The CLI did not finish in time.
    #[error("{program} timed out after {seconds} seconds")]
    Timeout { program: String, seconds: u64 },

    /// The status-line subprocess could not be started.
    #[error("failed to start status command {program}: {reason}")]
    StatusCommandLaunch { program: String, reason: String },

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UsageError {
    /// Every failure exits with status 1.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownPlan(_)
            | Self::InvalidLimit(_)
            | Self::LimitOutOfRange(_)
            | Self::Config(_)
            | Self::ConfigParse { .. } => ErrorCategory::Configuration,

            Self::CliNotFound { .. }
            | Self::CommandFailed { .. }
            | Self::ParseResponse(_)
            | Self::Timeout { .. }
            | Self::StatusCommandLaunch { .. } => ErrorCategory::ExternalTool,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `CU-{category}{number}` where category is:
    /// - C: Configuration
    /// - T: External tool
    /// - X: Internal
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlan(_) => "CU-C001",
            Self::InvalidLimit(_) => "CU-C002",
            Self::Config(_) => "CU-C003",
            Self::ConfigParse { .. } => "CU-C004",
            Self::LimitOutOfRange(_) => "CU-C005",

            Self::CliNotFound { .. } => "CU-T001",
            Self::CommandFailed { .. } => "CU-T002",
            Self::ParseResponse(_) => "CU-T003",
            Self::Timeout { .. } => "CU-T004",
            Self::StatusCommandLaunch { .. } => "CU-T010",

            Self::Io(_) => "CU-X001",
            Self::Json(_) => "CU-X002",
            Self::Other(_) => "CU-X099",
        }
    }

    /// Returns actionable fix suggestions for this error.
    ///
    /// # Example
    ///
    /// ```
    /// use copilot_usage::error::UsageError;
    ///
    /// let err = UsageError::CliNotFound { name: "gh".to_string() };
    /// let suggestions = err.fix_suggestions();
    /// assert!(!suggestions.is_empty());
    /// ```
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::UnknownPlan(name) => suggestions::unknown_plan_suggestions(name),
            Self::InvalidLimit(value) => suggestions::invalid_limit_suggestions(*value),
            Self::LimitOutOfRange(value) => suggestions::limit_out_of_range_suggestions(*value),
            Self::Config(msg) => vec![FixSuggestion::new(
                vec!["copilot-usage --help".to_string()],
                format!("Configuration error: {msg}"),
            )],
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::CliNotFound { name } => suggestions::cli_not_found_suggestions(name),
            Self::CommandFailed { program, reason } => {
                suggestions::command_failed_suggestions(program, reason)
            }
            Self::ParseResponse(_) => suggestions::parse_response_suggestions(),
            Self::Timeout { program, seconds } => suggestions::timeout_suggestions(program, *seconds),
            Self::StatusCommandLaunch { program, .. } => {
                suggestions::status_command_suggestions(program)
            }
            Self::Io(_) | Self::Json(_) | Self::Other(_) => Vec::new(),
        }
    }
}

/// Result type alias for copilot-usage operations.
pub type Result<T> = std::result::Result<T, UsageError>;
