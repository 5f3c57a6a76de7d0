//! Registry line parser and validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::types::{Record, Relationship};

/// Domain grammar: labels of alphanumerics, `-`, `_` and `.`, followed by a
/// 2-13 letter TLD or a compound suffix such as `co.uk`.
#[allow(clippy::expect_used)]
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?i)(([a-z])|([a-z][a-z])|([a-z][0-9])|([0-9][a-z])|",
        r"([a-z0-9][-_.a-z0-9]{0,61}[a-z0-9]))\.",
        r"([a-z]{2,13}|[a-z0-9-]{2,30}\.[a-z]{2,3})$",
    ))
    .expect("domain pattern is a valid constant regex")
});

/// Parse one registry line into a [`Record`].
///
/// Everything after the first `;` is kept as extension text (surrounding
/// whitespace trimmed, content untouched). The part before it must hold 3 or 4
/// non-empty comma-separated fields.
pub fn parse_record(line: &str) -> Result<Record, ParseError> {
    let (core, extension_fields) = match line.split_once(';') {
        Some((core, extension)) => {
            log::debug!("extension fields found in line {line}");
            (core, Some(extension.trim().to_string()))
        }
        None => (line, None),
    };

    let fields: Vec<&str> = core.split(',').map(str::trim).collect();
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ParseError::EmptyField);
    }
    if fields.len() < 3 {
        return Err(ParseError::MissingFields {
            found: fields.len(),
        });
    }
    if fields.len() > 4 {
        return Err(ParseError::TooManyFields {
            found: fields.len(),
        });
    }

    let domain = validated_domain(fields[0])?;
    let relationship: Relationship = fields[2].parse()?;
    let certification_authority_id = fields.get(3).map(ToString::to_string);

    Ok(Record::new(
        domain,
        fields[1].to_string(),
        relationship,
        certification_authority_id,
        extension_fields,
    ))
}

fn validated_domain(domain: &str) -> Result<String, ParseError> {
    let normalized = domain.to_lowercase();
    if DOMAIN_PATTERN.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(ParseError::InvalidDomain(domain.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== field splitting ====================

    #[test]
    fn test_parse_three_fields() {
        let r = parse_record("example.com, pub-123, DIRECT").unwrap();
        assert_eq!(r.domain(), "example.com");
        assert_eq!(r.publisher_account_id(), "pub-123");
        assert_eq!(r.relationship(), Relationship::Direct);
        assert_eq!(r.certification_authority_id(), None);
        assert_eq!(r.extension_fields(), None);
    }

    #[test]
    fn test_parse_four_fields() {
        let r = parse_record("google.com,pub-0000000000000000,RESELLER,f08c47fec0942fa0").unwrap();
        assert_eq!(r.certification_authority_id(), Some("f08c47fec0942fa0"));
        assert_eq!(
            r.line(),
            "google.com, pub-0000000000000000, RESELLER, f08c47fec0942fa0"
        );
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(
            parse_record("example.com, pub-123"),
            Err(ParseError::MissingFields { found: 2 })
        );
    }

    #[test]
    fn test_parse_too_many_fields() {
        assert_eq!(
            parse_record("example.com, pub-123, DIRECT, abc, extra"),
            Err(ParseError::TooManyFields { found: 5 })
        );
    }

    #[test]
    fn test_parse_empty_field() {
        assert_eq!(
            parse_record("example.com, , DIRECT"),
            Err(ParseError::EmptyField)
        );
        assert_eq!(
            parse_record("example.com, pub-123, DIRECT,"),
            Err(ParseError::EmptyField)
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_record(""), Err(ParseError::EmptyField));
        assert_eq!(parse_record("   "), Err(ParseError::EmptyField));
    }

    // ==================== domain ====================

    #[test]
    fn test_domain_without_tld_rejected() {
        assert_eq!(
            parse_record("invalid_domain,pub-123,DIRECT"),
            Err(ParseError::InvalidDomain("invalid_domain".to_string()))
        );
    }

    #[test]
    fn test_domain_lowercased() {
        let r = parse_record("ExAmple.COM, pub-123, DIRECT").unwrap();
        assert_eq!(r.domain(), "example.com");
    }

    #[test]
    fn test_domain_subdomain_and_compound_suffix() {
        assert!(parse_record("ads.sub.example.com, p, DIRECT").is_ok());
        assert!(parse_record("example.co.uk, p, DIRECT").is_ok());
        assert!(parse_record("x.io, p, DIRECT").is_ok());
    }

    #[test]
    fn test_domain_invalid_characters() {
        assert!(matches!(
            parse_record("exa mple.com, p, DIRECT"),
            Err(ParseError::InvalidDomain(_))
        ));
        assert!(matches!(
            parse_record("-example.com, p, DIRECT"),
            Err(ParseError::InvalidDomain(_))
        ));
        assert!(matches!(
            parse_record("example.c, p, DIRECT"),
            Err(ParseError::InvalidDomain(_))
        ));
    }

    // ==================== relationship ====================

    #[test]
    fn test_relationship_normalized() {
        let r = parse_record("example.com, pub-123, direct").unwrap();
        assert_eq!(r.line(), "example.com, pub-123, DIRECT");
    }

    #[test]
    fn test_relationship_rejected() {
        assert_eq!(
            parse_record("example.com, pub-123, partner"),
            Err(ParseError::InvalidRelationship("partner".to_string()))
        );
    }

    // ==================== extension fields ====================

    #[test]
    fn test_extension_preserved() {
        let r = parse_record("example.com, pub-1, DIRECT; foo=bar").unwrap();
        assert_eq!(r.extension_fields(), Some("foo=bar"));
        assert_eq!(r.line(), "example.com, pub-1, DIRECT; foo=bar");
    }

    #[test]
    fn test_extension_not_validated() {
        let r = parse_record("example.com,pub-1,DIRECT;a=1;  b , c ;; ").unwrap();
        assert_eq!(r.extension_fields(), Some("a=1;  b , c ;;"));
    }

    #[test]
    fn test_extension_does_not_rescue_invalid_core() {
        assert_eq!(
            parse_record("example.com, pub-1; foo=bar"),
            Err(ParseError::MissingFields { found: 2 })
        );
    }

    // ==================== round trip ====================

    #[test]
    fn test_round_trip() {
        for line in [
            "example.com,pub-1,reseller",
            "EXAMPLE.com ,  pub-1 , Direct , abc123 ;  k=v ; z ",
            "a.b.c.co.uk, 42, DIRECT, id; ",
        ] {
            let record = parse_record(line).unwrap();
            let reparsed = parse_record(record.line()).unwrap();
            assert_eq!(record, reparsed);
            assert_eq!(record.line(), reparsed.line());
        }
    }

    #[test]
    fn test_from_str() {
        let r: Record = "example.com, pub-123, DIRECT".parse().unwrap();
        assert_eq!(r.publisher_account_id(), "pub-123");
    }
}
