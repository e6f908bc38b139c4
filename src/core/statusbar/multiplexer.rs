//! Relay a status-line program's output with a usage element injected.
//!
//! The run moves through these phases:
//!
//! 1. **Prologue**: write the protocol header and the `[` line, flushed, before
//!    anything is read from the child.
//! 2. **Launch**: spawn the status-line command with stdout piped. Failure here
//!    is fatal.
//! 3. **Streaming**: read the child's stdout one line at a time. Framing lines
//!    are dropped. Each content line refreshes the cached usage if it is missing
//!    or older than the refresh interval, gets the usage element prepended (or
//!    is passed through unchanged when it does not parse), and is written out
//!    and flushed immediately.
//! 4. **Terminal**: when the child closes stdout, wait for it and return.
//!
//! Refreshing is a timestamp check made whenever a content line arrives; there
//! is no timer. Everything runs on the caller's task.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

use super::protocol::{
    ARRAY_OPEN, HEADER, StatusElement, StatusLine, frame_bytes, frame_line, prepend_element,
};
use crate::core::aggregate::{Aggregate, aggregate};
use crate::core::github::UsageSource;
use crate::error::{Result, UsageError};
use crate::render::statusbar::UsageElement;

/// How long a fetched usage value is reused.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Default status-line program.
pub const DEFAULT_STATUS_PROGRAM: &str = "i3status";

/// The status-line program to supervise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCommand {
    pub program: String,
    pub config_path: Option<PathBuf>,
}

impl StatusCommand {
    #[must_use]
    pub fn new(program: impl Into<String>, config_path: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config_path,
        }
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.config_path
            .as_ref()
            .map(|path| vec!["-c".to_string(), path.display().to_string()])
            .unwrap_or_default()
    }

    /// Spawn the program with stdout piped.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::StatusCommandLaunch`] if the process cannot start.
    pub fn spawn(&self) -> Result<Child> {
        let args = self.args();
        tracing::debug!(program = %self.program, ?args, "Launching status command");

        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| UsageError::StatusCommandLaunch {
                program: self.program.clone(),
                reason: e.to_string(),
            })
    }
}

/// The most recent successful fetch.
#[derive(Debug, Clone)]
pub struct CachedUsage {
    pub aggregate: Aggregate,
    pub element: StatusElement,
    pub fetched_at: Instant,
}

/// State for the streaming phase.
#[derive(Debug)]
pub struct StatusBarMultiplexer<S> {
    source: S,
    limit: u32,
    refresh_interval: Duration,
    cache: Option<CachedUsage>,
    frames_emitted: u64,
    fetch_attempts: u64,
}

impl<S: UsageSource> StatusBarMultiplexer<S> {
    /// Create a multiplexer refreshing from `source` against `limit`.
    #[must_use]
    pub const fn new(source: S, limit: u32) -> Self {
        Self {
            source,
            limit,
            refresh_interval: REFRESH_INTERVAL,
            cache: None,
            frames_emitted: 0,
            fetch_attempts: 0,
        }
    }

    /// Override the refresh interval.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Number of fetches attempted so far.
    #[must_use]
    pub const fn fetch_attempts(&self) -> u64 {
        self.fetch_attempts
    }

    /// Number of frames written downstream.
    #[must_use]
    pub const fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// The cached usage, if any fetch has succeeded.
    #[must_use]
    pub const fn cached(&self) -> Option<&CachedUsage> {
        self.cache.as_ref()
    }

    /// Access the usage source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn is_stale(&self, now: Instant) -> bool {
        self.cache.as_ref().is_none_or(|cached| {
            now.saturating_duration_since(cached.fetched_at) > self.refresh_interval
        })
    }

    /// Refresh the cached usage if it is missing or stale and return the element.
    ///
    /// A failed refresh keeps the previous value when there is one.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when no value has ever been fetched.
    pub async fn usage_element(&mut self, now: Instant) -> Result<StatusElement> {
        if self.is_stale(now) {
            self.fetch_attempts += 1;
            match self.source.fetch().await {
                Ok(snapshot) => {
                    let aggregate = aggregate(&snapshot, self.limit);
                    tracing::debug!(
                        total = aggregate.total,
                        percentage = aggregate.percentage,
                        "Refreshed usage"
                    );
                    let element = UsageElement::from_aggregate(&aggregate).to_object();
                    self.cache = Some(CachedUsage {
                        aggregate,
                        element,
                        fetched_at: now,
                    });
                }
                Err(e) if self.cache.is_some() => {
                    tracing::warn!(error = %e, "Usage refresh failed, showing previous value");
                }
                Err(e) => return Err(e),
            }
        }

        self.cache
            .as_ref()
            .map(|cached| cached.element.clone())
            .ok_or_else(|| UsageError::Other(anyhow::anyhow!("usage cache empty after refresh")))
    }

    /// Turn one line of child output into the line to emit, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the first fetch fails or a frame cannot be re-serialized.
    pub async fn process_line(&mut self, line: &str, now: Instant) -> Result<Option<String>> {
        let body = match StatusLine::classify(line) {
            StatusLine::Blank | StatusLine::Preamble | StatusLine::ArrayOpen => {
                tracing::trace!(line, "Dropping framing line");
                return Ok(None);
            }
            StatusLine::Frame { elements, .. } => {
                let element = self.usage_element(now).await?;
                prepend_element(&element, elements)?
            }
            StatusLine::Malformed { raw, .. } => {
                self.usage_element(now).await?;
                tracing::debug!(line = raw, "Passing through unparseable frame");
                raw.to_string()
            }
        };

        // The outer array needs a separator before every frame but the first we write.
        let emitted = frame_line(&body, self.frames_emitted > 0);
        self.frames_emitted += 1;
        Ok(Some(emitted))
    }

    /// Like [`Self::process_line`], for a raw line that may not be UTF-8.
    ///
    /// Lines that are not UTF-8 cannot be parsed as frames, so they are relayed
    /// byte for byte like any other malformed frame.
    ///
    /// # Errors
    ///
    /// Same as [`Self::process_line`].
    pub async fn process_bytes(&mut self, line: &[u8], now: Instant) -> Result<Option<Vec<u8>>> {
        if let Ok(text) = std::str::from_utf8(line) {
            return Ok(self.process_line(text, now).await?.map(String::into_bytes));
        }

        let trimmed = line.trim_ascii();
        let body = trimmed.strip_prefix(b",").unwrap_or(trimmed);
        self.usage_element(now).await?;
        tracing::debug!(bytes = body.len(), "Passing through frame that is not UTF-8");

        let emitted = frame_bytes(body, self.frames_emitted > 0);
        self.frames_emitted += 1;
        Ok(Some(emitted))
    }

    /// Relay `reader` to `out` until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error on read/write failure or a fatal first fetch.
    pub async fn stream<R, W>(&mut self, mut reader: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(());
            }
            let line = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if let Some(frame) = self.process_bytes(line, Instant::now()).await? {
                out.write_all(&frame)?;
                out.write_all(b"\n")?;
                out.flush()?;
            }
        }
    }
}

/// Write the protocol header and array opener.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_prologue<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{ARRAY_OPEN}")?;
    out.flush()
}

/// Run the whole status-bar session.
///
/// # Errors
///
/// Returns an error if the command cannot be launched, the first fetch fails,
/// or output cannot be written.
pub async fn run<S, W>(
    command: &StatusCommand,
    multiplexer: &mut StatusBarMultiplexer<S>,
    out: &mut W,
) -> Result<()>
where
    S: UsageSource,
    W: Write,
{
    write_prologue(out)?;

    let mut child = command.spawn()?;
    let stdout = child.stdout.take().ok_or_else(|| UsageError::StatusCommandLaunch {
        program: command.program.clone(),
        reason: "stdout was not captured".to_string(),
    })?;

    // On error the child is dropped here, and `kill_on_drop` stops it.
    multiplexer.stream(BufReader::new(stdout), out).await?;

    let status = child.wait().await?;
    tracing::debug!(
        %status,
        frames = multiplexer.frames_emitted(),
        fetches = multiplexer.fetch_attempts(),
        "Status command exited"
    );
    Ok(())
}
