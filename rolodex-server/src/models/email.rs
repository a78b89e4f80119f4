//! Email address validation
//!
//! Shape: `local@domain.tld`. The domain is case-insensitive and stored
//! lowercased; the local part is kept as submitted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for an email address (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// Maximum length for the local part
const MAX_LOCAL_LEN: usize = 64;

/// Maximum characters in one domain label
const MAX_LABEL_LEN: usize = 63;

/// Local part of dot-atom characters, domain of dot-separated labels with a TLD.
/// Letters and digits may be any Unicode script (internationalised addresses).
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?(\.[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
    )
    .expect("invalid email regex")
});

/// Validated, normalised email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalise an email address.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Max 254 characters, local part max 64
    /// - Exactly one `@`, a dotted domain with labels of at most 63 characters
    /// - Domain is lowercased
    ///
    /// # Example
    /// ```
    /// use rolodex_server::models::EmailAddress;
    ///
    /// assert!(EmailAddress::parse("john@example.com").is_ok());
    /// assert!(EmailAddress::parse("invalid-email").is_err());
    /// assert_eq!(
    ///     EmailAddress::parse("Jane@Example.COM").unwrap().as_str(),
    ///     "Jane@example.com"
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "value is not a valid email address",
            });
        }

        // The regex guarantees exactly one '@'
        let (local, domain) = trimmed
            .split_once('@')
            .ok_or(ValidationError::InvalidFormat {
                field: "email",
                reason: "value is not a valid email address",
            })?;

        if local.len() > MAX_LOCAL_LEN {
            return Err(ValidationError::TooLong {
                field: "email local part",
                max: MAX_LOCAL_LEN,
            });
        }

        if domain.split('.').any(|label| label.chars().count() > MAX_LABEL_LEN) {
            return Err(ValidationError::TooLong {
                field: "email domain label",
                max: MAX_LABEL_LEN,
            });
        }

        Ok(Self(format!("{}@{}", local, domain.to_lowercase())))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
