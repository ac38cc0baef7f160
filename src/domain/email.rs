//! Validated, normalized email addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// A syntactically valid email address, normalized for rate-limit keying.
///
/// Normalization trims surrounding whitespace and lowercases the address so
/// that `A@x.com` and `a@x.com` share one rate-limit budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes a raw email address.
    ///
    /// The check is deliberately syntactic: one `@`, a non-empty local part,
    /// a domain containing a dot, no whitespace. Deliverability is the
    /// identity provider's problem.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidEmail {
                reason: "contains whitespace".to_string(),
            });
        }

        let (local, domain) = normalized.split_once('@').ok_or_else(|| {
            ValidationError::InvalidEmail {
                reason: "missing '@'".to_string(),
            }
        })?;

        if local.is_empty() {
            return Err(ValidationError::InvalidEmail {
                reason: "empty local part".to_string(),
            });
        }
        if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
            return Err(ValidationError::InvalidEmail {
                reason: "invalid domain".to_string(),
            });
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::InvalidEmail {
                reason: "invalid domain".to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masks the address for logging, e.g. `user@example.com` -> `u***@example.com`.
    ///
    /// Log lines must never carry a full recipient address.
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) if local.len() > 1 => {
                let first = &local[..local.char_indices().nth(1).map(|(i, _)| i).unwrap_or(1)];
                format!("{}***@{}", first, domain)
            }
            Some((_, domain)) => format!("*@{}", domain),
            None => "***".to_string(),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_and_normalizes_case_and_whitespace() {
        let email = EmailAddress::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn differently_cased_addresses_normalize_to_the_same_key() {
        let a = EmailAddress::parse("A@x.com").unwrap();
        let b = EmailAddress::parse("a@x.com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            EmailAddress::parse("   "),
            Err(ValidationError::EmptyEmail)
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "no-at-sign",
            "@example.com",
            "user@",
            "user@nodot",
            "user@@example.com",
            "user name@example.com",
            "user@.com",
            "user@example.",
        ] {
            assert!(EmailAddress::parse(raw).is_err(), "should reject {raw:?}");
        }
    }

    #[test]
    fn masks_local_part_for_logging() {
        let email = EmailAddress::parse("user@example.com").unwrap();
        assert_eq!(email.masked(), "u***@example.com");
    }

    #[test]
    fn masks_single_character_local_part_entirely() {
        let email = EmailAddress::parse("u@example.com").unwrap();
        assert_eq!(email.masked(), "*@example.com");
    }

    proptest! {
        #[test]
        fn parsing_is_idempotent(local in "[a-z][a-z0-9]{0,10}", domain in "[a-z]{1,8}\\.[a-z]{2,4}") {
            let raw = format!("{}@{}", local, domain);
            let once = EmailAddress::parse(&raw).unwrap();
            let twice = EmailAddress::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn masked_output_never_reveals_the_full_local_part(
            local in "[a-z]{3,10}", domain in "[a-z]{1,8}\\.[a-z]{2,4}"
        ) {
            let email = EmailAddress::parse(&format!("{}@{}", local, domain)).unwrap();
            let masked = email.masked();
            let (masked_local, _) = masked.split_once('@').unwrap();
            prop_assert_ne!(masked_local, local.as_str());
            prop_assert!(masked_local.ends_with("***"));
        }
    }
}
