//! In-memory reconciliation of a registry file.

use std::collections::{BTreeSet, HashSet};

use crate::services::parse_record;
use crate::types::{ChangeKind, InvalidLine, ReconcileStats, Reconciliation};

/// Reconcile the raw lines of a registry file.
///
/// Valid lines are replaced by their canonical form, invalid lines are kept
/// verbatim and listed in [`Reconciliation::invalid_lines`]. The output is the
/// deduplicated union of both, sorted by byte order.
pub fn reconcile<S: AsRef<str>>(original: &[S]) -> Reconciliation {
    let mut records = HashSet::new();
    let mut invalid_lines = Vec::new();
    let mut kept = BTreeSet::new();

    for (index, line) in original.iter().enumerate() {
        let line = line.as_ref();
        match parse_record(line) {
            Ok(record) => {
                kept.insert(record.line().to_string());
                records.insert(record);
            }
            Err(reason) => {
                log::debug!("line {} rejected: {reason}", index + 1);
                invalid_lines.push(InvalidLine {
                    line_number: index + 1,
                    text: line.to_string(),
                    reason,
                });
                kept.insert(line.to_string());
            }
        }
    }

    let lines: Vec<String> = kept.into_iter().collect();
    let stats = diff_stats(original, &lines);

    Reconciliation {
        lines,
        records,
        invalid_lines,
        stats,
    }
}

/// Set-difference statistics between the original and reconciled lines.
fn diff_stats<S: AsRef<str>>(original: &[S], lines: &[String]) -> ReconcileStats {
    let original_set: HashSet<&str> = original.iter().map(AsRef::as_ref).collect();
    let final_set: HashSet<&str> = lines.iter().map(String::as_str).collect();

    let removed_count = original_set.difference(&final_set).count();
    let added_count = final_set.difference(&original_set).count();
    let duplicates_removed = removed_count.saturating_sub(added_count);
    let reformatted = removed_count - duplicates_removed;

    let change = if lines
        .iter()
        .map(String::as_str)
        .eq(original.iter().map(AsRef::as_ref))
    {
        ChangeKind::Unchanged
    } else if removed_count == 0 && added_count == 0 && lines.len() == original.len() {
        ChangeKind::Reordered
    } else {
        ChangeKind::Rewritten
    };

    ReconcileStats {
        original_count: original.len(),
        final_count: lines.len(),
        removed_count,
        added_count,
        duplicates_removed,
        reformatted,
        change,
    }
}
