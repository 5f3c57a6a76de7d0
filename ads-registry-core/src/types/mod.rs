//! Type definition module

mod record;
mod report;

pub use record::{Record, Relationship};
pub use report::{
    ChangeKind, InvalidLine, ReconcileStats, Reconciliation, RunSummary, UnverifiedAuthority,
    VerificationReport,
};
