//! Collaborator abstraction trait definition

mod authority_lookup;
mod line_store;
mod run_reporter;

pub use authority_lookup::AuthorityLookup;
pub use line_store::LineStore;
pub use run_reporter::{NoOpReporter, RunReporter};
