//! Structured run diagnostics Trait

use crate::types::{InvalidLine, ReconcileStats, RunSummary, UnverifiedAuthority};

/// Receives structured outcomes of a run as they happen.
///
/// The core never decides how diagnostics are rendered; every method has an
/// empty default so implementations pick what they care about.
pub trait RunReporter: Send + Sync {
    /// A line failed validation and was kept verbatim
    fn invalid_line(&self, _line: &InvalidLine) {}

    /// Reconciliation finished and the file is about to be written
    fn reconciled(&self, _stats: &ReconcileStats) {}

    /// Verification is starting for `_count` distinct ids
    fn verification_started(&self, _count: usize) {}

    /// A lookup timed out and was queued again
    fn lookup_retry(&self, _authority_id: &str, _attempt: u32) {}

    fn authority_verified(&self, _authority_id: &str) {}

    fn authority_unverified(&self, _authority: &UnverifiedAuthority) {}

    /// The run completed without a fatal error
    fn finished(&self, _summary: &RunSummary) {}
}

/// Reporter that discards everything.
pub struct NoOpReporter;

impl RunReporter for NoOpReporter {}
