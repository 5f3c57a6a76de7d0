//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
///
/// Every variant aborts the current run. Per-line and per-authority problems
/// that only require a manual fix are reported through
/// [`RunSummary`](crate::types::RunSummary) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Reading or rewriting the registry file failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A lookup kept timing out after every allowed retry
    #[error("Lookup for certification authority '{authority_id}' timed out {attempts} times")]
    RetriesExhausted { authority_id: String, attempts: u32 },

    /// Non-timeout transport or protocol failure
    #[error("Lookup for certification authority '{authority_id}' failed: {detail}")]
    LookupFailed {
        authority_id: String,
        detail: String,
    },

    /// Configuration rejected before the run started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Whether the error is caused by user input rather than the environment.
    ///
    /// Returns `true` when the caller should log at `warn` instead of `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

/// Core Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Reason a registry line was rejected by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ParseError {
    #[error("line has empty fields")]
    EmptyField,

    #[error("line is missing some of the required fields ({found} out of 3 required)")]
    MissingFields { found: usize },

    #[error("line has more fields than expected ({found} out of 4 maximum fields)")]
    TooManyFields { found: usize },

    #[error("invalid domain name '{0}'")]
    InvalidDomain(String),

    #[error("unsupported relationship '{0}' (allowed relationships: DIRECT, RESELLER)")]
    InvalidRelationship(String),
}

/// Failure reported by an [`AuthorityLookup`](crate::traits::AuthorityLookup).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum LookupError {
    /// The request did not complete in time. The only retryable failure.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection, TLS, or body read failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The registry answered with a non-2xx status
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },
}

impl LookupError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
