//! Mail address adapter handed to mail-sending code

use crate::email_address::EmailAddress;
use crate::error::{Error, Result};
use crate::{guard, syntax};
use data_encoding::{BASE64, HEXUPPER};
use std::fmt;

/// Transfer encoding for non-ASCII display names in header values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeaderEncoding {
    /// RFC 2047 "B" encoding
    #[default]
    Base64,

    /// RFC 2047 "Q" encoding
    QuotedPrintable,
}

/// A syntax-checked mailbox ready to be placed in a message header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailAddress {
    address: String,
    display_name: Option<String>,
    encoding: Option<HeaderEncoding>,
}

impl MailAddress {
    /// Build from an address, optionally overriding its display name.
    ///
    /// `address` may itself be in `Name <addr>` form; a non-blank
    /// `display_name` takes precedence over the embedded name.
    pub fn new(address: &str, display_name: Option<&str>) -> Result<Self> {
        let address = guard::not_blank("address", Some(address))?;
        let parsed = syntax::parse_mailbox(address)
            .filter(|parsed| syntax::is_address_shape(&parsed.address))
            .ok_or_else(|| {
                Error::Format(format!("'{}' is not a valid mail address.", address.trim()))
            })?;

        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or(parsed.display_name);

        Ok(Self {
            address: parsed.address,
            display_name,
            encoding: None,
        })
    }

    /// Like [`MailAddress::new`], with the encoding used for the display name.
    pub fn with_encoding(
        address: &str,
        display_name: Option<&str>,
        encoding: HeaderEncoding,
    ) -> Result<Self> {
        let mut mail_address = Self::new(address, display_name)?;
        mail_address.encoding = Some(encoding);
        Ok(mail_address)
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub const fn encoding(&self) -> Option<HeaderEncoding> {
        self.encoding
    }

    /// Text before the first `@`
    #[must_use]
    pub fn user(&self) -> &str {
        self.address.split_once('@').map_or("", |(user, _)| user)
    }

    /// Text after the first `@`
    #[must_use]
    pub fn host(&self) -> &str {
        self.address.split_once('@').map_or("", |(_, host)| host)
    }

    /// Render for a message header.
    ///
    /// ASCII display names are quoted as in [`fmt::Display`]; others become
    /// a UTF-8 encoded word using the configured encoding, Base64 when none
    /// was chosen.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_ascii() => {
                let word = encoded_word(name, self.encoding.unwrap_or_default());
                format!("{word} <{}>", self.address)
            }
            name => syntax::render_name_addr(name, &self.address),
        }
    }
}

fn encoded_word(text: &str, encoding: HeaderEncoding) -> String {
    match encoding {
        HeaderEncoding::Base64 => format!("=?utf-8?B?{}?=", BASE64.encode(text.as_bytes())),
        HeaderEncoding::QuotedPrintable => {
            let mut encoded = String::with_capacity(text.len() * 3);
            for &byte in text.as_bytes() {
                match byte {
                    b' ' => encoded.push('_'),
                    b if b.is_ascii_alphanumeric() => encoded.push(char::from(b)),
                    b => {
                        encoded.push('=');
                        encoded.push_str(&HEXUPPER.encode(&[b]));
                    }
                }
            }
            format!("=?utf-8?Q?{encoded}?=")
        }
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&syntax::render_name_addr(
            self.display_name.as_deref(),
            &self.address,
        ))
    }
}

impl TryFrom<&EmailAddress> for MailAddress {
    type Error = Error;

    fn try_from(email: &EmailAddress) -> Result<Self> {
        Self::new(email.value()?, None)
    }
}

impl TryFrom<&MailAddress> for EmailAddress {
    type Error = Error;

    fn try_from(mail_address: &MailAddress) -> Result<Self> {
        Self::parse(mail_address.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_word_base64() {
        assert_eq!(
            encoded_word("Zoë", HeaderEncoding::Base64),
            "=?utf-8?B?Wm/Dqw==?="
        );
    }

    #[test]
    fn test_encoded_word_q() {
        assert_eq!(
            encoded_word("Zoë Li", HeaderEncoding::QuotedPrintable),
            "=?utf-8?Q?Zo=C3=AB_Li?="
        );
    }
}
