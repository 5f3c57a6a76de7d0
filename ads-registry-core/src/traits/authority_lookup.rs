//! Certification authority registry abstract Trait

use async_trait::async_trait;

use crate::error::LookupError;

/// Remote registry answering "is this certification authority id active?".
///
/// Implementations perform exactly one request per call and do not retry;
/// retry and timeout policy belong to
/// [`VerificationService`](crate::services::VerificationService).
#[async_trait]
pub trait AuthorityLookup: Send + Sync {
    /// Fetch the registry page for `authority_id` and return its body.
    ///
    /// # Arguments
    /// * `authority_id` - Raw id as written in the registry file (not escaped)
    async fn lookup(&self, authority_id: &str) -> Result<String, LookupError>;
}
