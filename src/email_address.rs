//! Normalized email address value

use crate::error::{Error, Result};
use crate::{guard, syntax};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::debug;

/// Longest accepted normalized address
pub const MAX_ADDRESS_LENGTH: usize = 254;

/// Longest accepted local part
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Longest accepted domain
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Longest accepted domain label
pub const MAX_LABEL_LENGTH: usize = 63;

/// A validated, normalized email address without a display name.
///
/// The domain is lowercased and IDN-encoded to ASCII while the local part
/// keeps its casing. Equality, hashing and ordering are nevertheless
/// case-insensitive over the whole normalized value.
///
/// The default value is an empty sentinel: it renders as `""`, equals only
/// another sentinel, sorts before every address and refuses
/// [`EmailAddress::value`].
///
/// # Example
///
/// ```
/// use domain_primitives::EmailAddress;
///
/// let email = EmailAddress::parse("  John.Doe@Example.COM ").unwrap();
/// assert_eq!(email.to_string(), "John.Doe@example.com");
/// assert_eq!(email, EmailAddress::parse("john.doe@example.com").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailAddress {
    value: Option<Box<str>>,
}

impl EmailAddress {
    /// Create an address, failing with [`Error::Argument`] on blank or invalid input.
    pub fn new(value: &str) -> Result<Self> {
        let value = guard::not_blank("value", Some(value))?;
        Self::try_parse(value)
            .ok_or_else(|| Error::argument("value", "not a valid email address"))
    }

    /// Parse an address, failing with [`Error::Format`] on invalid input.
    pub fn parse(value: &str) -> Result<Self> {
        Self::try_parse(value).ok_or_else(|| {
            Error::Format(format!("'{}' is not a valid email address.", value.trim()))
        })
    }

    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::try_parse(value).is_some()
    }

    /// Normalize, then validate `value`.
    ///
    /// Checks run in order: whitespace, overall length, separator position,
    /// no further unquoted `@`, local part length, domain shape, and finally
    /// the mail address syntax parser. A local part that is one quoted
    /// string may contain `@`.
    #[must_use]
    pub fn try_parse(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            return None;
        }

        let normalized = Self::normalize(value);
        if normalized.chars().any(char::is_whitespace) {
            debug!("Email rejected: contains whitespace");
            return None;
        }
        if normalized.chars().count() > MAX_ADDRESS_LENGTH {
            debug!("Email rejected: longer than {MAX_ADDRESS_LENGTH} characters");
            return None;
        }

        let at = syntax::find_separator(&normalized)?;
        if at == 0 || at == normalized.len() - 1 {
            debug!("Email rejected: separator at either end");
            return None;
        }

        let (local, domain) = (&normalized[..at], &normalized[at + 1..]);
        if syntax::find_separator(local).is_some() {
            debug!("Email rejected: unquoted '@' in local part");
            return None;
        }
        if local.chars().count() > MAX_LOCAL_PART_LENGTH {
            debug!("Email rejected: local part longer than {MAX_LOCAL_PART_LENGTH} characters");
            return None;
        }
        if !is_valid_domain(domain) {
            debug!("Email rejected: invalid domain");
            return None;
        }

        // mailparse has no quoted local parts; check those here and let it
        // judge the domain behind a plain stand-in
        let checked = if syntax::is_quoted_local_part(local) {
            format!("quoted@{domain}")
        } else {
            normalized.clone()
        };
        let parsed = syntax::parse_mailbox(&checked)?;
        if parsed.display_name.is_some() || !syntax::is_address_shape(&parsed.address) {
            debug!("Email rejected by address syntax");
            return None;
        }

        Some(Self {
            value: Some(normalized.into_boxed_str()),
        })
    }

    /// Trim `value`, then lowercase and IDN-encode the domain.
    ///
    /// The domain starts after the last `@` outside quotes, so a quoted
    /// local part may itself contain `@`. The local part is kept verbatim.
    /// When IDN encoding fails the domain is only lowercased and left for
    /// validation to reject.
    #[must_use]
    pub fn normalize(value: &str) -> String {
        let trimmed = value.trim();
        let Some(at) = syntax::find_separator(trimmed) else {
            return trimmed.to_string();
        };

        let (local, domain) = (&trimmed[..at], &trimmed[at + 1..]);
        let domain = idna::domain_to_ascii(domain).unwrap_or_else(|e| {
            debug!("IDN encoding failed, falling back to lowercase: {e:?}");
            domain.to_lowercase()
        });

        format!("{local}@{domain}")
    }

    /// The normalized address.
    ///
    /// Fails with [`Error::InvalidOperation`] on the empty sentinel.
    pub fn value(&self) -> Result<&str> {
        self.value.as_deref().ok_or_else(|| {
            Error::InvalidOperation("the email address is not initialized".to_string())
        })
    }

    /// Whether this is the empty sentinel
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Text before the separator; empty on the sentinel.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.split().0
    }

    /// Text after the separator; empty on the sentinel.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        let value = self.value.as_deref().unwrap_or_default();
        syntax::find_separator(value).map_or((value, ""), |at| (&value[..at], &value[at + 1..]))
    }
}

fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= MAX_DOMAIN_LENGTH
        && domain
            .split('.')
            .all(|label| !label.is_empty() && label.chars().count() <= MAX_LABEL_LENGTH)
}

/// Ordinal ignore-case key: compares uppercase-mapped characters.
fn folded(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_uppercase)
}

impl PartialEq for EmailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EmailAddress {}

impl PartialOrd for EmailAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EmailAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.value.as_deref(), other.value.as_deref()) {
            (Some(a), Some(b)) => folded(a).cmp(folded(b)),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl Hash for EmailAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.value.as_deref() {
            Some(value) => {
                state.write_u8(1);
                folded(value).for_each(|c| c.hash(state));
            }
            None => state.write_u8(0),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or_default())
    }
}

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Serde support - serialize as string, the sentinel as ""
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_labels() {
        assert!(is_valid_domain("example.com"));
        assert!(!is_valid_domain("example..com"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain(&format!("{}.com", "a".repeat(64))));
        assert!(is_valid_domain(&format!("{}.com", "a".repeat(63))));
    }
}
