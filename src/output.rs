// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes; reports poll and probe progress.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::api::{ApiError, ProbeError};
use crate::monitor::{PollResult, Progress};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a warning (stderr in human modes, an event in JSON mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit_err(&JsonEvent::new("warning", message)),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => match self.duration() {
                Some(elapsed) => println!("{message} ({elapsed:.1}s)"),
                None => println!("{message}"),
            },
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                let mut event = JsonEvent::new("success", message);
                event.duration_secs = self.duration();
                self.emit(&event);
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let mut event = JsonEvent::new("error", message);
                event.duration_secs = self.duration();
                self.emit_err(&event);
            }
        }
    }

    fn emit(&self, event: &JsonEvent<'_>) {
        if let Ok(json) = serde_json::to_string(event) {
            println!("{json}");
        }
    }

    fn emit_err(&self, event: &JsonEvent<'_>) {
        if let Ok(json) = serde_json::to_string(event) {
            eprintln!("{json}");
        }
    }
}

impl Progress for Output {
    fn poll(&self, result: &PollResult) {
        match self.mode {
            OutputMode::Normal => println!(
                "  → [{}] status: {} ({})",
                result.attempt,
                result.status,
                result.status.class()
            ),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let status = result.status.to_string();
                let mut event = JsonEvent::new("poll", &status);
                event.attempt = Some(result.attempt);
                self.emit(&event);
            }
        }
    }

    fn poll_error(&self, attempt: u32, error: &ApiError) {
        match self.mode {
            OutputMode::Normal => println!("  → [{attempt}] status query failed: {error}"),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let message = error.to_string();
                let mut event = JsonEvent::new("poll_error", &message);
                event.attempt = Some(attempt);
                self.emit(&event);
            }
        }
    }

    fn probe(&self, attempt: u32, max_attempts: u32, outcome: &Result<u16, ProbeError>) {
        let message = match outcome {
            Ok(status) => format!("healthy (HTTP {status})"),
            Err(e) => format!("not healthy ({e})"),
        };
        match self.mode {
            OutputMode::Normal => println!("  → [{attempt}/{max_attempts}] health: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let mut event = JsonEvent::new("probe", &message);
                event.attempt = Some(attempt);
                self.emit(&event);
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

impl<'a> JsonEvent<'a> {
    fn new(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message,
            at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            attempt: None,
            duration_secs: None,
        }
    }
}
