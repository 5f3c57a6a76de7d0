//! Business logic service layer

mod record_parser;
mod reconcile_service;
mod registry_service;
mod verification_service;

pub use record_parser::parse_record;
pub use reconcile_service::reconcile;
pub use registry_service::RegistryService;
pub use verification_service::{is_active, VerificationService, VerifierConfig};
