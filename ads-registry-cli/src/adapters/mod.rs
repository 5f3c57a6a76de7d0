//! Platform adapters for the core collaborator traits

mod file_store;
mod http_lookup;
mod tracing_reporter;

pub use file_store::FileLineStore;
pub(crate) use http_lookup::parse_lookup_url;
pub use http_lookup::HttpAuthorityLookup;
pub use tracing_reporter::TracingReporter;
