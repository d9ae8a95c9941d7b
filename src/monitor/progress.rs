// ABOUTME: Observer hooks for per-poll and per-probe progress.
// ABOUTME: The CLI output implements this; library callers can stay silent.

use super::status::PollResult;
use crate::api::ProbeError;

/// Receives one callback per status query and per health probe.
pub trait Progress: Send + Sync {
    fn poll(&self, _result: &PollResult) {}

    fn poll_error(&self, _attempt: u32, _error: &crate::api::ApiError) {}

    fn probe(&self, _attempt: u32, _max_attempts: u32, _outcome: &Result<u16, ProbeError>) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {}
