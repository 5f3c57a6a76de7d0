//! Reconciliation, verification and run outcomes

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::ParseError;
use crate::types::Record;

/// A line the parser rejected. It is kept verbatim in the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    /// 1-based position in the original file
    pub line_number: usize,
    pub text: String,
    pub reason: ParseError,
}

/// Overall effect of a reconciliation on the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Output is byte-identical to the input
    Unchanged,
    /// Same lines, different order
    Reordered,
    /// Lines were reformatted or duplicates dropped
    Rewritten,
}

/// Informational diff between the original and the reconciled line lists.
///
/// `duplicates_removed` is the set-difference approximation
/// `removed - added`; it never affects the error flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub original_count: usize,
    pub final_count: usize,
    /// Original lines with no identical line in the output
    pub removed_count: usize,
    /// Output lines with no identical line in the original
    pub added_count: usize,
    pub duplicates_removed: usize,
    pub reformatted: usize,
    pub change: ChangeKind,
}

/// Result of reconciling one registry file in memory.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Sorted, deduplicated output lines
    pub lines: Vec<String>,
    /// Distinct valid records
    pub records: HashSet<Record>,
    pub invalid_lines: Vec<InvalidLine>,
    pub stats: ReconcileStats,
}

impl Reconciliation {
    pub fn has_errors(&self) -> bool {
        !self.invalid_lines.is_empty()
    }

    /// Distinct certification authority ids referenced by valid records.
    pub fn authority_ids(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(Record::certification_authority_id)
            .filter(|id| !id.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Authority id the registry did not report as active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnverifiedAuthority {
    pub authority_id: String,
    #[serde(skip)]
    pub response_body: String,
}

/// Per-id outcome of a completed verification run.
///
/// Only produced when no fatal condition occurred; ordering of the vectors
/// follows completion order and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub verified: Vec<String>,
    pub unverified: Vec<UnverifiedAuthority>,
    /// Total lookups issued, retries included
    pub lookups: u32,
}

impl VerificationReport {
    pub fn has_errors(&self) -> bool {
        !self.unverified.is_empty()
    }
}

/// Structured outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub stats: ReconcileStats,
    pub invalid_lines: Vec<InvalidLine>,
    /// `None` when verification was disabled
    pub verification: Option<VerificationReport>,
}

impl RunSummary {
    /// Whether a human has to edit the file (malformed lines or unverified ids).
    pub fn needs_manual_fix(&self) -> bool {
        !self.invalid_lines.is_empty()
            || self
                .verification
                .as_ref()
                .is_some_and(VerificationReport::has_errors)
    }
}
