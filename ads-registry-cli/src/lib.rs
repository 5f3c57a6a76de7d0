//! Command line front end for the ads registry reconciler.
//!
//! Wires the platform adapters (file store, HTTP registry lookup, tracing
//! reporter) into [`ads_registry_core::RegistryService`].

pub mod adapters;
pub mod cli;
pub mod config;
mod utils;

use std::sync::Arc;

use ads_registry_core::{
    AuthorityLookup, CoreResult, RegistryService, RunReporter, RunSummary, VerificationService,
};

pub use adapters::{FileLineStore, HttpAuthorityLookup, TracingReporter};
pub use cli::Cli;
pub use config::AppConfig;

/// Registry is valid
pub const EXIT_OK: u8 = 0;
/// Malformed lines or unverified certification authorities need manual fixing
pub const EXIT_MANUAL_FIX: u8 = 1;
/// Configuration, storage, or fatal verification failure
pub const EXIT_FATAL: u8 = 2;

/// Run one reconciliation against the HTTP registry described by `config`.
pub async fn run(config: &AppConfig, reporter: &dyn RunReporter) -> CoreResult<RunSummary> {
    let lookup: Option<Arc<dyn AuthorityLookup>> = if config.verification.enabled {
        let request_timeout = config.verifier_config()?.request_timeout;
        Some(Arc::new(HttpAuthorityLookup::new(
            &config.verification.lookup_url,
            request_timeout,
        )?))
    } else {
        None
    };
    run_with_lookup(config, lookup, reporter).await
}

/// Run one reconciliation with an explicit lookup implementation.
///
/// `lookup` is ignored when verification is disabled in `config`.
pub async fn run_with_lookup(
    config: &AppConfig,
    lookup: Option<Arc<dyn AuthorityLookup>>,
    reporter: &dyn RunReporter,
) -> CoreResult<RunSummary> {
    config.validate()?;
    let store = Arc::new(FileLineStore::new(&config.file));
    let verifier = match lookup {
        Some(lookup) if config.verification.enabled => Some(VerificationService::new(
            lookup,
            config.verifier_config()?,
        )),
        _ => None,
    };
    RegistryService::new(store, verifier).run(reporter).await
}

/// Map a run result to the process exit code.
pub fn exit_code(result: &CoreResult<RunSummary>) -> u8 {
    match result {
        Ok(summary) if summary.needs_manual_fix() => EXIT_MANUAL_FIX,
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_FATAL,
    }
}
