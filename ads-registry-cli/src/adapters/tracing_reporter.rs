//! Run diagnostics rendered as tracing events

use ads_registry_core::{
    ChangeKind, InvalidLine, ReconcileStats, RunReporter, RunSummary, UnverifiedAuthority,
};

use crate::utils::body_preview::body_preview;

/// [`RunReporter`] writing every outcome through `tracing`.
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn invalid_line(&self, line: &InvalidLine) {
        tracing::warn!(
            line_number = line.line_number,
            "{}: manually fix line {:?} and reformat again",
            line.reason,
            line.text
        );
    }

    fn reconciled(&self, stats: &ReconcileStats) {
        match stats.change {
            ChangeKind::Unchanged => tracing::info!("No changes done in the file"),
            ChangeKind::Reordered => tracing::info!("Some lines have been sorted"),
            ChangeKind::Rewritten => {
                if stats.duplicates_removed > 0 {
                    tracing::info!(
                        "{} lines have been deleted because they were duplicated",
                        stats.duplicates_removed
                    );
                }
                if stats.reformatted > 0 {
                    tracing::info!("{} lines have been formatted", stats.reformatted);
                }
            }
        }
        tracing::debug!(
            original = stats.original_count,
            reconciled = stats.final_count,
            "reconciliation finished"
        );
    }

    fn verification_started(&self, count: usize) {
        tracing::info!("Validating {count} certification authority ids");
    }

    fn lookup_retry(&self, authority_id: &str, attempt: u32) {
        tracing::debug!("retrying lookup for {authority_id} due to timeout (retry {attempt})");
    }

    fn authority_verified(&self, authority_id: &str) {
        tracing::debug!("certification authority with id {authority_id} verified");
    }

    fn authority_unverified(&self, authority: &UnverifiedAuthority) {
        tracing::warn!(
            "certification authority with id {} could not be verified and shall be removed",
            authority.authority_id
        );
        tracing::debug!(
            "response body: {}",
            body_preview(&authority.response_body)
        );
    }

    fn finished(&self, summary: &RunSummary) {
        if summary.needs_manual_fix() {
            tracing::error!("There are one or more validation errors that require manual fixing");
        } else {
            tracing::info!("Registry is valid");
        }
    }
}
