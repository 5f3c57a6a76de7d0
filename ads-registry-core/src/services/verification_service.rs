//! Certification authority verification with bounded concurrency.

use std::collections::VecDeque;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use regex::Regex;
use tokio::time::timeout;

use crate::error::{CoreError, CoreResult};
use crate::traits::{AuthorityLookup, RunReporter};
use crate::types::{UnverifiedAuthority, VerificationReport};

/// Marker the registry renders for an active certification authority.
#[allow(clippy::expect_used)]
static ACTIVE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<strong>\s*active\.\s*</strong>")
        .expect("active marker is a valid constant regex")
});

/// Whether a registry response body reports the authority as active.
pub fn is_active(body: &str) -> bool {
    ACTIVE_MARKER.is_match(body)
}

/// Tuning knobs of the verification engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Hard ceiling on outstanding lookups
    pub max_concurrency: usize,
    /// Extra attempts allowed after a timeout (first attempt not counted)
    pub max_retries: u32,
    /// Wall-clock budget of every single attempt
    pub request_timeout: Duration,
}

impl VerifierConfig {
    pub const DEFAULT_MAX_CONCURRENCY: usize = 20;
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn validate(&self) -> CoreResult<()> {
        if self.max_concurrency == 0 {
            return Err(CoreError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Outcome of a single lookup attempt.
#[derive(Debug)]
enum Attempt {
    Verified,
    Unverified(String),
    RetryAfterTimeout,
    Fatal(String),
}

/// Drives lookups for a set of authority ids.
///
/// Lookups are multiplexed on the calling task. At most
/// [`VerifierConfig::max_concurrency`] are outstanding at any time; completion
/// order decides processing order.
pub struct VerificationService {
    lookup: Arc<dyn AuthorityLookup>,
    config: VerifierConfig,
}

impl VerificationService {
    #[must_use]
    pub fn new(lookup: Arc<dyn AuthorityLookup>, config: VerifierConfig) -> Self {
        Self { lookup, config }
    }

    /// Verify every id.
    ///
    /// Returns the per-id report when every lookup reached a verdict. A lookup
    /// that still times out after `max_retries` retries, or that fails for any
    /// other reason, aborts the run: queued ids are dropped and outstanding
    /// requests are cancelled.
    pub async fn verify_all<I>(
        &self,
        authority_ids: I,
        reporter: &dyn RunReporter,
    ) -> CoreResult<VerificationReport>
    where
        I: IntoIterator<Item = String>,
    {
        let mut pending: VecDeque<(String, u32)> =
            authority_ids.into_iter().map(|id| (id, 0)).collect();
        let mut in_flight = FuturesUnordered::new();
        let mut report = VerificationReport::default();
        let ceiling = self.config.max_concurrency.max(1);

        reporter.verification_started(pending.len());

        loop {
            while in_flight.len() < ceiling {
                let Some((authority_id, attempt)) = pending.pop_front() else {
                    break;
                };
                report.lookups += 1;
                in_flight.push(self.check(authority_id, attempt));
            }

            let Some((authority_id, attempt, outcome)) = in_flight.next().await else {
                break;
            };

            match outcome {
                Attempt::Verified => {
                    log::debug!("certification authority with id {authority_id} verified");
                    reporter.authority_verified(&authority_id);
                    report.verified.push(authority_id);
                }
                Attempt::Unverified(response_body) => {
                    let unverified = UnverifiedAuthority {
                        authority_id,
                        response_body,
                    };
                    reporter.authority_unverified(&unverified);
                    report.unverified.push(unverified);
                }
                Attempt::RetryAfterTimeout => {
                    let next_attempt = attempt + 1;
                    if next_attempt > self.config.max_retries {
                        return Err(CoreError::RetriesExhausted {
                            authority_id,
                            attempts: next_attempt,
                        });
                    }
                    log::debug!(
                        "retrying lookup for {authority_id} due to timeout (retry {next_attempt}/{})",
                        self.config.max_retries
                    );
                    reporter.lookup_retry(&authority_id, next_attempt);
                    pending.push_back((authority_id, next_attempt));
                }
                Attempt::Fatal(detail) => {
                    return Err(CoreError::LookupFailed {
                        authority_id,
                        detail,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Run one attempt under a fresh timeout budget.
    async fn check(&self, authority_id: String, attempt: u32) -> (String, u32, Attempt) {
        let outcome = match timeout(self.config.request_timeout, self.lookup.lookup(&authority_id))
            .await
        {
            Ok(Ok(body)) if is_active(&body) => Attempt::Verified,
            Ok(Ok(body)) => Attempt::Unverified(body),
            Ok(Err(e)) if e.is_timeout() => Attempt::RetryAfterTimeout,
            Ok(Err(e)) => Attempt::Fatal(e.to_string()),
            Err(_) => Attempt::RetryAfterTimeout,
        };
        (authority_id, attempt, outcome)
    }
}
