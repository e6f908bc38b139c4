//! CLI command runner utilities.
//!
//! Provides async subprocess execution for the `gh` CLI.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{Result, UsageError};

/// Default timeout for CLI commands.
pub const CLI_TIMEOUT: Duration = Duration::from_secs(30);

/// Output from a CLI command.
#[derive(Debug)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliOutput {
    /// Check if command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Resolve a program name against PATH.
///
/// Paths containing a separator are returned as-is.
///
/// # Errors
///
/// Returns [`UsageError::CliNotFound`] if the program is not on PATH.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|e| {
        tracing::debug!(program, error = %e, "Program lookup failed");
        UsageError::CliNotFound {
            name: program.to_string(),
        }
    })
}

/// Run a CLI command with timeout.
///
/// # Errors
///
/// Returns error if:
/// - Command not found
/// - Command times out
/// - Command fails to execute
pub async fn run_command(
    program: &str,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<CliOutput> {
    tracing::debug!(program, ?args, "Running command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UsageError::CliNotFound {
                    name: program.to_string(),
                }
            } else {
                UsageError::CommandFailed {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

    let result = timeout(timeout_duration, async {
        // Drain both pipes together; a full stderr pipe would otherwise block the child.
        let stdout_handle = async {
            let mut stdout = String::new();
            if let Some(mut out) = child.stdout.take() {
                out.read_to_string(&mut stdout).await?;
            }
            Ok::<_, std::io::Error>(stdout)
        };

        let stderr_handle = async {
            let mut stderr = String::new();
            if let Some(mut err) = child.stderr.take() {
                err.read_to_string(&mut stderr).await?;
            }
            Ok::<_, std::io::Error>(stderr)
        };

        let (stdout_result, stderr_result) = tokio::join!(stdout_handle, stderr_handle);
        let stdout = stdout_result?;
        let stderr = stderr_result?;

        let status = child.wait().await?;

        Ok::<_, std::io::Error>(CliOutput {
            stdout,
            stderr,
            exit_code: status.code().unwrap_or(-1),
        })
    })
    .await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(UsageError::CommandFailed {
            program: program.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            Err(UsageError::Timeout {
                program: program.to_string(),
                seconds: timeout_duration.as_secs(),
            })
        }
    }
}

/// Run a CLI command and return its trimmed stdout, failing on non-zero exit.
///
/// # Errors
///
/// Returns error if the command cannot run or exits non-zero.
pub async fn run_text_command(
    program: &str,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<String> {
    let output = run_command(program, args, timeout_duration).await?;
    ensure_success(program, &output)?;
    Ok(output.stdout.trim().to_string())
}

/// Run a CLI command and parse JSON output.
///
/// # Errors
///
/// Returns error if command fails or output is not valid JSON.
pub async fn run_json_command<T: serde::de::DeserializeOwned>(
    program: &str,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<T> {
    let output = run_command(program, args, timeout_duration).await?;
    ensure_success(program, &output)?;

    serde_json::from_str(&output.stdout).map_err(|e| {
        UsageError::ParseResponse(format!(
            "{}: {}",
            e,
            output.stdout.chars().take(200).collect::<String>()
        ))
    })
}

fn ensure_success(program: &str, output: &CliOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }
    Err(UsageError::CommandFailed {
        program: program.to_string(),
        reason: format!("exit code {}: {}", output.exit_code, output.stderr.trim()),
    })
}
