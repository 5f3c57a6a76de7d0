//! Registry record model

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ParseError;

/// Contractual relation between the publisher and the advertising system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Direct,
    Reseller,
}

impl Relationship {
    pub const ALL: [Self; 2] = [Self::Direct, Self::Reseller];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Reseller => "RESELLER",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = ParseError;

    /// Case-insensitive match against `DIRECT` / `RESELLER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::InvalidRelationship(s.to_string()))
    }
}

/// One validated authorization entry.
///
/// Records are only produced by [`parse_record`](crate::services::parse_record)
/// and never change afterwards. Equality and hashing use the canonical line,
/// so two records are the same entry exactly when they serialize identically.
#[derive(Debug, Clone)]
pub struct Record {
    domain: String,
    publisher_account_id: String,
    relationship: Relationship,
    certification_authority_id: Option<String>,
    extension_fields: Option<String>,
    line: String,
}

impl Record {
    pub(crate) fn new(
        domain: String,
        publisher_account_id: String,
        relationship: Relationship,
        certification_authority_id: Option<String>,
        extension_fields: Option<String>,
    ) -> Self {
        let line = canonical_line(
            &domain,
            &publisher_account_id,
            relationship,
            certification_authority_id.as_deref(),
            extension_fields.as_deref(),
        );
        Self {
            domain,
            publisher_account_id,
            relationship,
            certification_authority_id,
            extension_fields,
            line,
        }
    }

    /// Lowercased advertising system domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn publisher_account_id(&self) -> &str {
        &self.publisher_account_id
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn certification_authority_id(&self) -> Option<&str> {
        self.certification_authority_id.as_deref()
    }

    /// Raw text after the first `;`, never interpreted.
    pub fn extension_fields(&self) -> Option<&str> {
        self.extension_fields.as_deref()
    }

    /// Canonical serialized form used for output and deduplication.
    pub fn line(&self) -> &str {
        &self.line
    }
}

fn canonical_line(
    domain: &str,
    publisher_account_id: &str,
    relationship: Relationship,
    certification_authority_id: Option<&str>,
    extension_fields: Option<&str>,
) -> String {
    let mut parts = vec![domain, publisher_account_id, relationship.as_str()];
    if let Some(ca_id) = certification_authority_id {
        parts.push(ca_id);
    }
    let mut line = parts.join(", ");
    if let Some(extension) = extension_fields {
        line.push_str("; ");
        line.push_str(extension);
    }
    line
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::services::parse_record(s)
    }
}
