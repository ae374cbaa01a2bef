//! Email address paired with an optional display name

use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::{guard, syntax};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// An email address with an optional, title-cased display name.
///
/// Accepts bare addresses and the combined `Display Name <addr>` form. The
/// address is trimmed and lowercased entirely, so two mailboxes differing
/// only in address case are equal. The display name is trimmed and
/// title-cased; a blank name is dropped.
///
/// Mailboxes order by address, then by display name with a missing name
/// first. The default value is the empty sentinel with an empty address.
///
/// # Example
///
/// ```
/// use domain_primitives::Mailbox;
///
/// let mailbox = Mailbox::new("  JOHN.DOE@Example.COM  ", Some("  jOHN doE  ")).unwrap();
/// assert_eq!(mailbox.address(), "john.doe@example.com");
/// assert_eq!(mailbox.display_name(), Some("John Doe"));
/// assert_eq!(mailbox.to_string(), "\"John Doe\" <john.doe@example.com>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mailbox {
    address: String,
    display_name: Option<String>,
}

impl Mailbox {
    /// Build a mailbox from an address and an optional display name.
    ///
    /// A blank `email` is an [`Error::Argument`]; text the address parser
    /// rejects is an [`Error::Format`]. Without a display name, one
    /// embedded in `email` (`Name <addr>`) is kept.
    pub fn new(email: &str, display_name: Option<&str>) -> Result<Self> {
        Self::with_culture(email, display_name, Culture::Invariant)
    }

    /// Like [`Mailbox::new`], title-casing the display name with `culture`.
    pub fn with_culture(email: &str, display_name: Option<&str>, culture: Culture) -> Result<Self> {
        let email = guard::not_blank("email", Some(email))?;
        let parsed = parse_address(email)?;

        let display_name = match display_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => {
                // Validate the pair together as a single header value
                let combined = syntax::render_name_addr(Some(name.trim()), &parsed.address);
                parse_address(&combined)?;
                Some(name)
            }
            None => parsed.display_name.as_deref(),
        };

        Ok(Self::normalized(&parsed.address, display_name, culture))
    }

    /// Parse a bare address or the `Display Name <addr>` form.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_culture(input, Culture::Invariant)
    }

    pub fn parse_with_culture(input: &str, culture: Culture) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::Format("Email address cannot be empty.".to_string()));
        }
        let parsed = parse_address(input)?;
        Ok(Self::normalized(
            &parsed.address,
            parsed.display_name.as_deref(),
            culture,
        ))
    }

    #[must_use]
    pub fn try_parse(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    fn normalized(address: &str, display_name: Option<&str>, culture: Culture) -> Self {
        Self {
            address: address.trim().to_lowercase(),
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| culture.to_title_case(name)),
        }
    }

    /// The lowercased address; empty on the sentinel.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Render using a format token.
    ///
    /// `A`/`a` renders the address only. `G`/`g`/`F`/`f` and the empty
    /// token render `"Display Name" <address>`, or the bare address when
    /// there is no display name. Other tokens are an [`Error::Format`].
    pub fn format(&self, token: &str) -> Result<String> {
        match token {
            "A" | "a" => Ok(self.address.clone()),
            "" | "G" | "g" | "F" | "f" => Ok(self.general()),
            other => Err(Error::Format(format!(
                "The format string '{other}' is not supported."
            ))),
        }
    }

    pub(crate) fn general(&self) -> String {
        syntax::render_name_addr(self.display_name.as_deref(), &self.address)
    }
}

fn parse_address(input: &str) -> Result<syntax::ParsedMailbox> {
    syntax::parse_mailbox(input.trim())
        .filter(|parsed| syntax::is_address_shape(parsed.address.trim()))
        .ok_or_else(|| {
            debug!("Mailbox rejected by address syntax");
            Error::Format(format!("'{}' is not a valid email address.", input.trim()))
        })
}

/// General format; the alternate flag (`{:#}`) renders the address only.
impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.address)
        } else {
            f.write_str(&self.general())
        }
    }
}

impl FromStr for Mailbox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Serde support - serialize in general format, the sentinel as ""
impl Serialize for Mailbox {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for Mailbox {
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
