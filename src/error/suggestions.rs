//! Fix suggestion database for copilot-usage errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Primary fix commands in order of preference.
    /// These should be copy-paste ready for the terminal.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,

    /// Link to documentation for more information.
    pub doc_url: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
            doc_url: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }

    /// Builder: adds documentation URL.
    #[must_use]
    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }
}

const GH_INSTALL_URL: &str = "https://cli.github.com";

// =============================================================================
// Configuration
// =============================================================================

/// Suggestions for an unknown plan name.
#[must_use]
pub fn unknown_plan_suggestions(name: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![
                "copilot-usage --plan pro".to_string(),
                "copilot-usage --limit 300".to_string(),
            ],
            format!(
                "'{name}' is not a known Copilot plan. Use one of: free, pro, pro+, business, enterprise, or pass an explicit --limit."
            ),
        )
        .with_prevention("Set GH_COPILOT_PLAN in your shell profile to avoid passing --plan every time."),
    ]
}

/// Suggestions for a non-positive limit.
#[must_use]
pub fn invalid_limit_suggestions(value: i64) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["copilot-usage --limit 300".to_string()],
        format!("The monthly request limit must be greater than zero; {value} was given."),
    )]
}

/// Suggestions for a limit above the largest supported value.
#[must_use]
pub fn limit_out_of_range_suggestions(value: i64) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["copilot-usage --limit 1500".to_string()],
        format!(
            "The monthly request limit can be at most {}; {value} was given.",
            u32::MAX
        ),
    )]
}

/// Suggestions for a config file that failed to parse.
#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("$EDITOR {path}")],
            format!("The config file could not be read: {message}"),
        )
        .with_prevention("Unset COPILOT_USAGE_CONFIG or remove the file to fall back to defaults."),
    ]
}

// =============================================================================
// External tools
// =============================================================================

/// Suggestions when a CLI binary is missing from PATH.
#[must_use]
pub fn cli_not_found_suggestions(name: &str) -> Vec<FixSuggestion> {
    if name == "gh" || name.ends_with("/gh") {
        vec![
            FixSuggestion::new(
                vec![
                    "brew install gh".to_string(),
                    "# Or see the install guide for your platform".to_string(),
                ],
                "The GitHub CLI (gh) is required to read billing data.",
            )
            .with_doc_url(GH_INSTALL_URL),
        ]
    } else {
        vec![FixSuggestion::new(
            vec![format!("which {name}")],
            format!("'{name}' was not found in PATH."),
        )]
    }
}

/// Suggestions when the CLI ran but failed.
#[must_use]
pub fn command_failed_suggestions(program: &str, reason: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![
                "gh auth status".to_string(),
                "gh auth login".to_string(),
            ],
            format!("{program} could not fetch your usage ({reason}). Is gh CLI authenticated?"),
        )
        .with_prevention("Billing endpoints need the 'user' scope: gh auth refresh -h github.com -s user"),
    ]
}

/// Suggestions when the billing document was malformed.
#[must_use]
pub fn parse_response_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["gh api /user -q .login".to_string()],
        "The billing response was not in the expected format. The API may have changed.",
    )]
}

/// Suggestions for a command timeout.
#[must_use]
pub fn timeout_suggestions(program: &str, seconds: u64) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["gh api /user -q .login".to_string()],
            format!("{program} did not respond within {seconds} seconds."),
        )
        .with_prevention("Raise [github] timeout_seconds in the config file on slow connections."),
    ]
}

/// Suggestions when the status-line command could not be started.
#[must_use]
pub fn status_command_suggestions(program: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![
            format!("which {program}"),
            "copilot-usage --i3bar --status-command <PROGRAM> --status-config <PATH>".to_string(),
        ],
        format!("The status-line command '{program}' could not be started."),
    )]
}
