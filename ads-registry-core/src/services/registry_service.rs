//! Full reconciliation run: read, reconcile, persist, verify.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{reconcile, VerificationService};
use crate::traits::{LineStore, RunReporter};
use crate::types::RunSummary;

/// Registry service
///
/// The file is always rewritten before verification starts, so a fatal
/// verification error is returned after the reconciled content is already on
/// disk.
pub struct RegistryService {
    store: Arc<dyn LineStore>,
    verifier: Option<VerificationService>,
}

impl RegistryService {
    /// Create a registry service
    ///
    /// Pass `None` as `verifier` to skip certification authority checks.
    #[must_use]
    pub fn new(store: Arc<dyn LineStore>, verifier: Option<VerificationService>) -> Self {
        Self { store, verifier }
    }

    pub async fn run(&self, reporter: &dyn RunReporter) -> CoreResult<RunSummary> {
        let original = self.store.read_lines()?;
        let reconciliation = reconcile(&original);

        for invalid in &reconciliation.invalid_lines {
            reporter.invalid_line(invalid);
        }
        reporter.reconciled(&reconciliation.stats);

        self.store.write_lines(&reconciliation.lines)?;
        log::debug!("wrote {} lines", reconciliation.lines.len());

        let verification = match &self.verifier {
            Some(verifier) => Some(
                verifier
                    .verify_all(reconciliation.authority_ids(), reporter)
                    .await?,
            ),
            None => None,
        };

        let summary = RunSummary {
            stats: reconciliation.stats,
            invalid_lines: reconciliation.invalid_lines,
            verification,
        };
        reporter.finished(&summary);
        Ok(summary)
    }
}
