//! Ads Registry Core Library
//!
//! Reconciles `app-ads.txt` style authorization registries:
//! - Record parsing and validation (Record Parser)
//! - Deduplication, canonical sorting and persistence (Reconcile Service)
//! - Bounded-concurrency certification-authority verification (Verification Service)
//!
//! The library is platform-independent. File access, the remote registry and
//! diagnostics output are injected through the traits in [`traits`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, LookupError, ParseError};
pub use services::{
    parse_record, reconcile, RegistryService, VerificationService, VerifierConfig,
};
pub use traits::{AuthorityLookup, LineStore, NoOpReporter, RunReporter};
pub use types::{
    ChangeKind, InvalidLine, ReconcileStats, Reconciliation, Record, Relationship, RunSummary,
    UnverifiedAuthority, VerificationReport,
};
